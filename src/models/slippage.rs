use crate::order::Order;
use crate::security::Security;

/// Price penalty for an order. The value returned is a positive price delta, fill models add it
/// to buys and subtract it from sells.
pub trait SlippageModel {
    fn slippage_approximation(&self, security: &Security, order: &Order) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSlippage;

impl SlippageModel for NullSlippage {
    fn slippage_approximation(&self, _security: &Security, _order: &Order) -> f64 {
        0.0
    }
}

/// Slippage as a fixed fraction of the last price.
#[derive(Clone, Copy, Debug)]
pub struct ConstantSlippage {
    percent: f64,
}

impl ConstantSlippage {
    pub fn new(percent: f64) -> Self {
        Self { percent }
    }
}

impl SlippageModel for ConstantSlippage {
    fn slippage_approximation(&self, security: &Security, _order: &Order) -> f64 {
        security.price * self.percent
    }
}
