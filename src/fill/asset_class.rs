use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::input::data::DataKind;
use crate::order::OrderType;

/// Market structure a [FillModel](crate::fill::FillModel) is configured for. Each class changes a
/// small number of rules of the base model rather than replacing it.
///
/// - Equity is the base model.
/// - Forex is quote-driven: it never prices from trades and has no session open or close auction,
///   so market-on-open and market-on-close are rejected.
/// - Future is the base model with every fill snapped onto the contract's tick size.
/// - Crypto is the base model with trade bars preferred over quote bars for triggers.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum AssetClass {
    #[display("equity")]
    Equity,
    #[display("forex")]
    Forex,
    #[display("future")]
    Future,
    #[display("crypto")]
    Crypto,
}

impl AssetClass {
    pub fn supports(&self, order_type: &OrderType) -> bool {
        match self {
            AssetClass::Forex => !matches!(
                order_type,
                OrderType::MarketOnOpen | OrderType::MarketOnClose
            ),
            AssetClass::Equity | AssetClass::Future | AssetClass::Crypto => true,
        }
    }

    /// Bar kinds used for trigger evaluation, most preferred first. The security's own OHLC is
    /// used when none of these are available.
    pub fn bar_sources(&self) -> &'static [DataKind] {
        match self {
            AssetClass::Equity | AssetClass::Future => &[DataKind::QuoteBar, DataKind::TradeBar],
            AssetClass::Forex => &[DataKind::QuoteBar],
            AssetClass::Crypto => &[DataKind::TradeBar, DataKind::QuoteBar],
        }
    }

    /// Whether trade prices can stand in for a missing bid or ask.
    pub fn admits_trade_prices(&self) -> bool {
        !matches!(self, AssetClass::Forex)
    }

    pub fn rounds_to_price_variation(&self) -> bool {
        matches!(self, AssetClass::Future)
    }
}
