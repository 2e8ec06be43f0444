use crate::security::Security;

/// Smallest valid price increment for a security at a given price.
pub trait PriceVariationModel {
    fn minimum_price_variation(&self, security: &Security, price: f64) -> f64;
}

/// Same increment at every price, typical of futures contracts.
#[derive(Clone, Copy, Debug)]
pub struct FixedPriceVariation(pub f64);

impl PriceVariationModel for FixedPriceVariation {
    fn minimum_price_variation(&self, _security: &Security, _price: f64) -> f64 {
        self.0
    }
}

/// Sub-penny increments below one dollar, pennies above.
#[derive(Clone, Copy, Debug, Default)]
pub struct EquityPriceVariation;

impl PriceVariationModel for EquityPriceVariation {
    fn minimum_price_variation(&self, _security: &Security, price: f64) -> f64 {
        if price < 1.0 {
            0.0001
        } else {
            0.01
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EquityPriceVariation, FixedPriceVariation, PriceVariationModel};
    use crate::security::Security;

    #[test]
    fn test_that_equity_increment_depends_on_price() {
        let security = Security::new("ABC");
        assert_eq!(EquityPriceVariation.minimum_price_variation(&security, 0.5), 0.0001);
        assert_eq!(EquityPriceVariation.minimum_price_variation(&security, 10.0), 0.01);
        assert_eq!(FixedPriceVariation(0.25).minimum_price_variation(&security, 10.0), 0.25);
    }
}
