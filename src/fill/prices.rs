use log::trace;
use serde::{Deserialize, Serialize};

use crate::clock::DateTime;
use crate::fill::asset_class::AssetClass;
use crate::fill::error::FillError;
use crate::input::data::{Bar, DataKind, MarketData, QuoteBar, Tick, TickType, TradeBar};
use crate::input::subscription::DataSubscriptions;
use crate::order::Direction;
use crate::security::Security;

/// Which side of a quote bar is used to build the bar that triggers are evaluated against.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub enum QuoteBarSide {
    /// Ask bar for buys, bid bar for sells, the side the order would trade against.
    #[default]
    OrderSide,
    Bid,
    Ask,
    Mid,
}

/// Prices an order is filled against, taken from the freshest subscribed data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prices {
    /// Latest end time across the data that was eligible for pricing.
    pub end_time: DateTime,
    pub ask: f64,
    pub bid: f64,
    /// Side price for the order direction: ask for buys, bid for sells.
    pub current: f64,
    pub bar: Bar,
}

//Latest eligible observation of each kind, None if unsubscribed or unusable
#[derive(Default)]
struct Eligible<'a> {
    tick: Option<&'a Tick>,
    quote_bar: Option<&'a QuoteBar>,
    trade_bar: Option<&'a TradeBar>,
    end_time: Option<DateTime>,
}

/// Picks ask, bid and trigger bar from a security's cached data.
///
/// Only kinds the symbol is currently subscribed to are considered. Fill forward placeholders and
/// open interest are never used to price an order or to judge its freshness. Ask and bid prefer
/// ticks, then quote bars, then trade bars (when the asset class admits trade prices) and finally
/// the security's scalar quotes. The bar follows the asset class's bar sources, then a flat bar at
/// the latest tick and finally the security's scalar OHLC.
#[derive(Clone, Copy, Debug)]
pub struct PriceResolver {
    asset_class: AssetClass,
    quote_bar_side: QuoteBarSide,
}

impl PriceResolver {
    pub fn for_asset_class(asset_class: AssetClass) -> Self {
        Self {
            asset_class,
            quote_bar_side: QuoteBarSide::default(),
        }
    }

    pub fn with_quote_bar_side(mut self, side: QuoteBarSide) -> Self {
        self.quote_bar_side = side;
        self
    }

    pub fn quote_bar_side(&self) -> QuoteBarSide {
        self.quote_bar_side
    }

    fn eligible<'a>(
        security: &'a Security,
        subscriptions: &dyn DataSubscriptions,
    ) -> Result<Eligible<'a>, FillError> {
        let no_data = || FillError::NoData {
            symbol: security.symbol.clone(),
        };

        let kinds = subscriptions.subscribed_kinds(&security.symbol);
        if kinds.is_empty() {
            return Err(no_data());
        }

        let mut eligible = Eligible::default();
        for kind in kinds {
            if kind == DataKind::OpenInterest {
                continue;
            }

            let Some(data) = security.cache().get_latest(kind) else {
                continue;
            };
            if data.is_fill_forward() {
                continue;
            }

            let end_time = data.end_time();
            eligible.end_time = Some(match eligible.end_time {
                Some(current) => current.max(end_time),
                None => end_time,
            });

            match data {
                MarketData::Tick(tick) => eligible.tick = Some(tick),
                MarketData::QuoteBar(bar) => eligible.quote_bar = Some(bar),
                MarketData::TradeBar(bar) => eligible.trade_bar = Some(bar),
                MarketData::OpenInterest(_) => {}
            }
        }

        if eligible.end_time.is_none() {
            return Err(no_data());
        }
        Ok(eligible)
    }

    fn side_price(
        &self,
        security: &Security,
        eligible: &Eligible,
        quote_side: fn(&Tick) -> f64,
        bar_side: fn(&QuoteBar) -> Option<Bar>,
        scalar: fn(&Security) -> f64,
    ) -> f64 {
        if let Some(tick) = eligible.tick {
            let quoted = quote_side(tick);
            if quoted > 0.0 {
                return quoted;
            }
            //Quote sides are not available for trade ticks
            if tick.price > 0.0 && self.asset_class.admits_trade_prices() {
                return tick.price;
            }
        }

        if let Some(bar) = eligible.quote_bar.and_then(bar_side) {
            return bar.close;
        }

        if self.asset_class.admits_trade_prices() {
            if let Some(trade_bar) = eligible.trade_bar {
                return trade_bar.bar.close;
            }
        }

        scalar(security)
    }

    fn side_for(&self, direction: Direction) -> QuoteBarSide {
        match (self.quote_bar_side, direction) {
            (QuoteBarSide::OrderSide, Direction::Buy) => QuoteBarSide::Ask,
            (QuoteBarSide::OrderSide, Direction::Sell) => QuoteBarSide::Bid,
            (QuoteBarSide::OrderSide, Direction::Hold) => QuoteBarSide::Mid,
            (side, _) => side,
        }
    }

    fn quote_bar_for(&self, quote_bar: &QuoteBar, direction: Direction) -> Option<Bar> {
        match self.side_for(direction) {
            QuoteBarSide::Ask => quote_bar.ask,
            QuoteBarSide::Bid => quote_bar.bid,
            QuoteBarSide::Mid | QuoteBarSide::OrderSide => quote_bar.bar(),
        }
    }

    // A tick is a single price so the bar is flat. Quote ticks use the same side as quote bars
    fn tick_bar_for(&self, tick: &Tick, direction: Direction) -> Option<Bar> {
        let price = match tick.tick_type {
            TickType::Trade if self.asset_class.admits_trade_prices() => tick.price,
            TickType::Trade => return None,
            TickType::Quote => match self.side_for(direction) {
                QuoteBarSide::Ask => tick.ask_price,
                QuoteBarSide::Bid => tick.bid_price,
                QuoteBarSide::Mid | QuoteBarSide::OrderSide => tick.price,
            },
        };
        if price > 0.0 {
            Some(Bar::flat(price))
        } else {
            None
        }
    }

    fn trigger_bar(&self, security: &Security, eligible: &Eligible, direction: Direction) -> Bar {
        for source in self.asset_class.bar_sources() {
            let bar = match source {
                DataKind::QuoteBar => eligible
                    .quote_bar
                    .and_then(|quote_bar| self.quote_bar_for(quote_bar, direction)),
                DataKind::TradeBar => eligible.trade_bar.map(|trade_bar| trade_bar.bar),
                DataKind::Tick | DataKind::OpenInterest => None,
            };
            if let Some(bar) = bar {
                return bar;
            }
        }

        if let Some(bar) = eligible
            .tick
            .and_then(|tick| self.tick_bar_for(tick, direction))
        {
            return bar;
        }
        security.scalar_bar()
    }

    pub fn resolve(
        &self,
        security: &Security,
        subscriptions: &dyn DataSubscriptions,
        direction: Direction,
    ) -> Result<Prices, FillError> {
        let eligible = Self::eligible(security, subscriptions)?;

        let ask = self.side_price(
            security,
            &eligible,
            |tick| tick.ask_price,
            |quote_bar| quote_bar.ask,
            Security::ask_price,
        );
        let bid = self.side_price(
            security,
            &eligible,
            |tick| tick.bid_price,
            |quote_bar| quote_bar.bid,
            Security::bid_price,
        );
        let current = match direction {
            Direction::Buy => ask,
            Direction::Sell => bid,
            Direction::Hold => security.price,
        };
        let bar = self.trigger_bar(security, &eligible, direction);
        //Checked non-empty in eligible
        let end_time = eligible.end_time.unwrap_or(DateTime::MIN);

        trace!(
            "FILL: Resolved {} prices ask {:?} bid {:?} bar {:?} ending {:?}",
            security.symbol,
            ask,
            bid,
            bar,
            end_time
        );

        Ok(Prices {
            end_time,
            ask,
            bid,
            current,
            bar,
        })
    }
}
