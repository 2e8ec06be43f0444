use serde::{Deserialize, Serialize};
use time::Duration;

use crate::clock::DateTime;

/// Open, high, low, close for one sampling interval. The same type is used whether the prices came
/// from quotes or trades.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Bar with every field at the same price, used when only a single price is known.
    pub fn flat(price: f64) -> Self {
        Self::new(price, price, price, price)
    }

    pub fn mid(first: &Bar, second: &Bar) -> Self {
        Self {
            open: (first.open + second.open) / 2.0,
            high: (first.high + second.high) / 2.0,
            low: (first.low + second.low) / 2.0,
            close: (first.close + second.close) / 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum DataKind {
    Tick,
    QuoteBar,
    TradeBar,
    OpenInterest,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum TickType {
    Trade,
    Quote,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Tick {
    pub symbol: String,
    pub time: DateTime,
    pub tick_type: TickType,
    pub price: f64,
    pub quantity: f64,
    pub bid_price: f64,
    pub ask_price: f64,
    pub bid_size: f64,
    pub ask_size: f64,
    pub is_fill_forward: bool,
}

impl Tick {
    pub fn trade(
        symbol: impl Into<String>,
        time: impl Into<DateTime>,
        price: f64,
        quantity: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            time: time.into(),
            tick_type: TickType::Trade,
            price,
            quantity,
            bid_price: 0.0,
            ask_price: 0.0,
            bid_size: 0.0,
            ask_size: 0.0,
            is_fill_forward: false,
        }
    }

    pub fn quote(
        symbol: impl Into<String>,
        time: impl Into<DateTime>,
        bid: f64,
        ask: f64,
    ) -> Self {
        // Quote ticks carry the mid as their price
        let price = if bid > 0.0 && ask > 0.0 {
            (bid + ask) / 2.0
        } else {
            bid.max(ask)
        };
        Self {
            symbol: symbol.into(),
            time: time.into(),
            tick_type: TickType::Quote,
            price,
            quantity: 0.0,
            bid_price: bid,
            ask_price: ask,
            bid_size: 0.0,
            ask_size: 0.0,
            is_fill_forward: false,
        }
    }

    pub fn end_time(&self) -> DateTime {
        self.time
    }
}

/// Bid and ask bars over one period. Either side can be missing when the source only quoted one
/// side of the market.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct QuoteBar {
    pub symbol: String,
    pub time: DateTime,
    pub period_secs: i64,
    pub bid: Option<Bar>,
    pub ask: Option<Bar>,
    pub is_fill_forward: bool,
}

impl QuoteBar {
    pub fn new(
        symbol: impl Into<String>,
        time: impl Into<DateTime>,
        period_secs: i64,
        bid: Option<Bar>,
        ask: Option<Bar>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            time: time.into(),
            period_secs,
            bid,
            ask,
            is_fill_forward: false,
        }
    }

    pub fn end_time(&self) -> DateTime {
        self.time + Duration::seconds(self.period_secs)
    }

    /// Mid of both sides, or whichever side is present.
    pub fn bar(&self) -> Option<Bar> {
        match (&self.bid, &self.ask) {
            (Some(bid), Some(ask)) => Some(Bar::mid(bid, ask)),
            (Some(bid), None) => Some(*bid),
            (None, Some(ask)) => Some(*ask),
            (None, None) => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TradeBar {
    pub symbol: String,
    pub time: DateTime,
    pub period_secs: i64,
    pub bar: Bar,
    pub volume: f64,
    pub is_fill_forward: bool,
}

impl TradeBar {
    pub fn new(
        symbol: impl Into<String>,
        time: impl Into<DateTime>,
        period_secs: i64,
        bar: Bar,
        volume: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            time: time.into(),
            period_secs,
            bar,
            volume,
            is_fill_forward: false,
        }
    }

    pub fn end_time(&self) -> DateTime {
        self.time + Duration::seconds(self.period_secs)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OpenInterest {
    pub symbol: String,
    pub time: DateTime,
    pub value: f64,
}

/// A single observation for one symbol, tagged by kind.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum MarketData {
    Tick(Tick),
    QuoteBar(QuoteBar),
    TradeBar(TradeBar),
    OpenInterest(OpenInterest),
}

impl MarketData {
    pub fn kind(&self) -> DataKind {
        match self {
            MarketData::Tick(_) => DataKind::Tick,
            MarketData::QuoteBar(_) => DataKind::QuoteBar,
            MarketData::TradeBar(_) => DataKind::TradeBar,
            MarketData::OpenInterest(_) => DataKind::OpenInterest,
        }
    }

    pub fn end_time(&self) -> DateTime {
        match self {
            MarketData::Tick(tick) => tick.end_time(),
            MarketData::QuoteBar(bar) => bar.end_time(),
            MarketData::TradeBar(bar) => bar.end_time(),
            MarketData::OpenInterest(oi) => oi.time,
        }
    }

    pub fn is_fill_forward(&self) -> bool {
        match self {
            MarketData::Tick(tick) => tick.is_fill_forward,
            MarketData::QuoteBar(bar) => bar.is_fill_forward,
            MarketData::TradeBar(bar) => bar.is_fill_forward,
            MarketData::OpenInterest(_) => false,
        }
    }
}

impl From<Tick> for MarketData {
    fn from(value: Tick) -> Self {
        MarketData::Tick(value)
    }
}

impl From<QuoteBar> for MarketData {
    fn from(value: QuoteBar) -> Self {
        MarketData::QuoteBar(value)
    }
}

impl From<TradeBar> for MarketData {
    fn from(value: TradeBar) -> Self {
        MarketData::TradeBar(value)
    }
}

impl From<OpenInterest> for MarketData {
    fn from(value: OpenInterest) -> Self {
        MarketData::OpenInterest(value)
    }
}
