//! # What is Islay?
//!
//! Islay decides how orders fill during a backtest. Given an order and the latest market data for
//! a security it answers whether the order fills on this step and at what price. It is a library
//! for backtest engines: the engine owns the clock, the data feed, the orders and the portfolio,
//! and calls into Islay once per open order per step.
//!
//! # Implementation
//!
//! A single evaluation is composed of:
//! - A [Security](crate::security::Security) which holds scalar prices and a
//! [SecurityCache](crate::input::cache::SecurityCache) of the latest tick, quote bar, trade bar and
//! open interest observation.
//! - The subscriptions for the symbol,
//! [DataSubscriptions](crate::input::subscription::DataSubscriptions), which decide which of the
//! cached observations can be used to price an order.
//! - Exchange hours, [ExchangeHours](crate::security::hours::ExchangeHours), which gate when orders
//! can fill.
//! - Slippage and minimum price variation models from [models](crate::models).
//! - A [FillModel](crate::fill::FillModel) configured for an
//! [AssetClass](crate::fill::AssetClass). The fill model resolves prices with a
//! [PriceResolver](crate::fill::PriceResolver) and applies the rules for the order type.
//!
//! Market, market on open, market on close, limit, stop market, stop limit and limit if touched
//! orders are supported. Prices come from OHLC bars so the path price took within a bar is unknown.
//! Where it matters, fills assume the outcome that is worse for the trader.
//!
//! Evaluation returns an [OrderEvent](crate::order::OrderEvent). Events that are not fills have
//! [FillStatus::None](crate::order::FillStatus::None) and a zero fill price, the caller keeps the
//! order and tries again on the next step. Malformed input, such as an order type the asset class
//! does not support or no usable data, is a [FillError](crate::fill::FillError).
//!
//! Fill behaviour that is tuned per backtest lives in [FillSettings](crate::fill::FillSettings)
//! which can be loaded from JSON.
//!
//! # Concurrency
//!
//! Fill models hold no mutable state so one model can be shared between threads. The only state
//! that changes during evaluation is the trigger status of the order being evaluated, which the
//! caller owns.
pub mod clock;
pub mod fill;
pub mod input;
pub mod models;
pub mod order;
pub mod security;
