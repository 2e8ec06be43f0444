use derive_more::{Display, Error};

use crate::fill::asset_class::AssetClass;

/// Reasons a fill evaluation could not produce an [OrderEvent](crate::order::OrderEvent).
///
/// An order that simply did not fill is not an error, that is returned as an unfilled event.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum FillError {
    /// No subscribed data has produced a usable observation yet. Retry on a later step.
    #[display("no usable market data to fill order for {symbol}")]
    NoData { symbol: String },
    /// The order type cannot be filled for this kind of asset. The order should not have been
    /// routed here.
    #[display("{order_type} orders are not supported for {asset_class} assets")]
    UnsupportedOrderType {
        order_type: &'static str,
        asset_class: AssetClass,
    },
}

impl FillError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FillError::NoData { .. })
    }
}
