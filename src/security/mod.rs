//! Point-in-time view of a single security: scalar prices, the exchange-local clock and the cache
//! of the most recent market data.
pub mod hours;

use crate::clock::DateTime;
use crate::input::cache::SecurityCache;
use crate::input::data::{Bar, MarketData, TickType};

/// Snapshot of a security as seen by the fill models.
///
/// The scalar fields are the security's last known prices. They are updated whenever data is
/// added and are the last fallback when no subscribed data can price an order. The cache keeps
/// the observations themselves, with their end times, so that fill models can judge freshness.
#[derive(Clone, Debug)]
pub struct Security {
    pub symbol: String,
    pub local_time: DateTime,
    pub price: f64,
    pub bid: f64,
    pub ask: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    cache: SecurityCache,
}

impl Security {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            local_time: DateTime::default(),
            price: 0.0,
            bid: 0.0,
            ask: 0.0,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            close: 0.0,
            volume: 0.0,
            cache: SecurityCache::new(),
        }
    }

    pub fn cache(&self) -> &SecurityCache {
        &self.cache
    }

    pub fn set_local_time(&mut self, now: impl Into<DateTime>) {
        self.local_time = now.into();
    }

    pub fn set_bar(&mut self, bar: Bar) {
        self.open = bar.open;
        self.high = bar.high;
        self.low = bar.low;
        self.close = bar.close;
        self.price = bar.close;
    }

    // A trade tick is one observation, the scalar bar only ever describes the latest one
    fn update_trade_price(&mut self, price: f64, quantity: f64) {
        if price == 0.0 {
            return;
        }
        self.set_bar(Bar::flat(price));
        self.volume = quantity;
    }

    fn update_quote(&mut self, bid: f64, ask: f64) {
        if bid > 0.0 {
            self.bid = bid;
        }
        if ask > 0.0 {
            self.ask = ask;
        }
    }

    /// Adds the observation to the cache and moves the scalar prices.
    pub fn set_market_data(&mut self, data: MarketData) {
        match &data {
            MarketData::Tick(tick) => match tick.tick_type {
                TickType::Trade => self.update_trade_price(tick.price, tick.quantity),
                TickType::Quote => {
                    self.update_quote(tick.bid_price, tick.ask_price);
                    //Quotes only move the last price until the first trade arrives
                    if self.cache.latest_trade_bar().is_none() && self.volume == 0.0 {
                        self.price = tick.price;
                    }
                }
            },
            MarketData::QuoteBar(quote_bar) => {
                let bid = quote_bar.bid.map(|bar| bar.close).unwrap_or(0.0);
                let ask = quote_bar.ask.map(|bar| bar.close).unwrap_or(0.0);
                self.update_quote(bid, ask);
                if self.cache.latest_trade_bar().is_none() {
                    if let Some(bar) = quote_bar.bar() {
                        self.set_bar(bar);
                    }
                }
            }
            MarketData::TradeBar(trade_bar) => {
                self.set_bar(trade_bar.bar);
                self.volume = trade_bar.volume;
            }
            MarketData::OpenInterest(_) => {}
        }
        self.cache.add_data(data);
    }

    /// Best known ask, falls back to the last price when the ask has never been quoted.
    pub fn ask_price(&self) -> f64 {
        if self.ask > 0.0 {
            self.ask
        } else {
            self.price
        }
    }

    pub fn bid_price(&self) -> f64 {
        if self.bid > 0.0 {
            self.bid
        } else {
            self.price
        }
    }

    /// OHLC snapshot. Fields that were never set take the last price.
    pub fn scalar_bar(&self) -> Bar {
        let or_price = |value: f64| if value == 0.0 { self.price } else { value };
        Bar::new(
            or_price(self.open),
            or_price(self.high),
            or_price(self.low),
            or_price(self.close),
        )
    }
}
