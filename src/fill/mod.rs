//! Fill models decide whether a pending order fills against the latest market data, and at what
//! price.
//!
//! A [FillModel] is configured with an [AssetClass] and evaluates one order at a time against a
//! [Security] snapshot. Collaborators that are owned by the surrounding backtest (subscriptions,
//! exchange hours, slippage, tick size) are passed in through a [FillContext].
//!
//! Prices come from OHLC bars so the model cannot know the path price took within a bar. Where the
//! path matters the model assumes the outcome that is worse for the trader: stops never fill
//! better than the stop price, limits fill at the limit or the bar extreme, whichever is worse.
//!
//! Orders are evaluated with data that must be newer than the order. Market orders are the
//! exception, they fill on whatever data is available but the event is flagged if that data is
//! older than the stale price threshold.
//!
//! Evaluation is synchronous and holds no state between calls. The only thing carried between
//! evaluations is the order's own status: stop-limit and limit-if-touched orders move to
//! [OrderStatus::Triggered](crate::order::OrderStatus::Triggered) when their trigger is hit and
//! stay there until filled or canceled. Callers must present evaluations for an order in time
//! order.
pub mod adjust;
pub mod asset_class;
pub mod error;
mod orders;
pub mod prices;
pub mod settings;

use log::debug;
use time::Duration;

use crate::input::subscription::DataSubscriptions;
use crate::models::price_variation::{FixedPriceVariation, PriceVariationModel};
use crate::models::slippage::{NullSlippage, SlippageModel};
use crate::order::{Direction, Order, OrderEvent, OrderType};
use crate::security::hours::ExchangeHours;
use crate::security::Security;

pub use asset_class::AssetClass;
pub use error::FillError;
pub use prices::{PriceResolver, Prices, QuoteBarSide};
pub use settings::FillSettings;

static NULL_SLIPPAGE: NullSlippage = NullSlippage;
static NO_PRICE_VARIATION: FixedPriceVariation = FixedPriceVariation(0.0);

/// Collaborators consulted during a single evaluation.
pub struct FillContext<'a> {
    pub subscriptions: &'a dyn DataSubscriptions,
    pub exchange: &'a dyn ExchangeHours,
    pub slippage: &'a dyn SlippageModel,
    pub price_variation: &'a dyn PriceVariationModel,
    pub stale_price_threshold: Duration,
}

impl<'a> FillContext<'a> {
    /// No slippage, no tick size and the default stale price threshold.
    pub fn new(subscriptions: &'a dyn DataSubscriptions, exchange: &'a dyn ExchangeHours) -> Self {
        Self {
            subscriptions,
            exchange,
            slippage: &NULL_SLIPPAGE,
            price_variation: &NO_PRICE_VARIATION,
            stale_price_threshold: FillSettings::default().stale_price_threshold(),
        }
    }

    pub fn with_slippage(mut self, slippage: &'a dyn SlippageModel) -> Self {
        self.slippage = slippage;
        self
    }

    pub fn with_price_variation(mut self, price_variation: &'a dyn PriceVariationModel) -> Self {
        self.price_variation = price_variation;
        self
    }

    pub fn with_stale_price_threshold(mut self, threshold: Duration) -> Self {
        self.stale_price_threshold = threshold;
        self
    }

    pub fn with_settings(self, settings: &FillSettings) -> Self {
        self.with_stale_price_threshold(settings.stale_price_threshold())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FillModel {
    asset_class: AssetClass,
    resolver: PriceResolver,
}

impl FillModel {
    pub fn new(asset_class: AssetClass) -> Self {
        Self {
            asset_class,
            resolver: PriceResolver::for_asset_class(asset_class),
        }
    }

    pub fn equity() -> Self {
        Self::new(AssetClass::Equity)
    }

    pub fn forex() -> Self {
        Self::new(AssetClass::Forex)
    }

    pub fn future() -> Self {
        Self::new(AssetClass::Future)
    }

    pub fn crypto() -> Self {
        Self::new(AssetClass::Crypto)
    }

    pub fn with_quote_bar_side(mut self, side: QuoteBarSide) -> Self {
        self.resolver = self.resolver.with_quote_bar_side(side);
        self
    }

    pub fn with_settings(self, settings: &FillSettings) -> Self {
        match settings.quote_bar_side {
            Some(side) => self.with_quote_bar_side(side),
            None => self,
        }
    }

    pub fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    pub fn resolver(&self) -> &PriceResolver {
        &self.resolver
    }

    /// Evaluates the order with the rules for its type.
    pub fn fill(
        &self,
        security: &Security,
        order: &mut Order,
        ctx: &FillContext,
    ) -> Result<OrderEvent, FillError> {
        match order.order_type {
            OrderType::Market => self.market_fill(security, order, ctx),
            OrderType::MarketOnOpen => self.market_on_open_fill(security, order, ctx),
            OrderType::MarketOnClose => self.market_on_close_fill(security, order, ctx),
            OrderType::Limit { .. } => self.limit_fill(security, order, ctx),
            OrderType::StopMarket { .. } => self.stop_market_fill(security, order, ctx),
            OrderType::StopLimit { .. } => self.stop_limit_fill(security, order, ctx),
            OrderType::LimitIfTouched { .. } => self.limit_if_touched_fill(security, order, ctx),
        }
    }

    fn unsupported(&self, order: &Order) -> FillError {
        FillError::UnsupportedOrderType {
            order_type: order.order_type.name(),
            asset_class: self.asset_class,
        }
    }

    fn check_supported(&self, order: &Order) -> Result<(), FillError> {
        if self.asset_class.supports(&order.order_type) {
            Ok(())
        } else {
            Err(self.unsupported(order))
        }
    }

    /// Canceled and hold orders never fill. Orders also need the exchange to be open, with
    /// `extended` allowing pre and post market sessions.
    fn passes_gates(
        &self,
        security: &Security,
        order: &Order,
        ctx: &FillContext,
        extended: Option<bool>,
    ) -> bool {
        if !order.status().is_open() {
            debug!("FILL: Order for {} is {:?}, skipping", order.symbol, order.status());
            return false;
        }

        if order.direction() == Direction::Hold {
            debug!("FILL: Order for {} has no quantity, skipping", order.symbol);
            return false;
        }

        if let Some(extended) = extended {
            if !ctx.exchange.is_open(security.local_time, extended) {
                debug!(
                    "FILL: Exchange closed for {} at {:?}, skipping",
                    order.symbol, security.local_time
                );
                return false;
            }
        }
        true
    }

    /// Applies the per asset class post-processing to an event.
    fn complete(&self, event: OrderEvent, security: &Security, ctx: &FillContext) -> OrderEvent {
        if self.asset_class.rounds_to_price_variation() {
            adjust::adjust_to_price_variation(event, security, ctx.price_variation)
        } else {
            event
        }
    }
}
