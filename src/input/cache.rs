use std::collections::HashMap;

use crate::input::data::{DataKind, MarketData, QuoteBar, Tick, TradeBar};

#[derive(Clone, Debug)]
struct CacheSlot {
    latest: MarketData,
    previous: Option<MarketData>,
}

/// Holds the most recent and previous observation of each kind of data for one security.
///
/// The cache is owned by the security and filled by whatever is feeding data into the backtest,
/// fill models only read from it.
#[derive(Clone, Debug, Default)]
pub struct SecurityCache {
    inner: HashMap<DataKind, CacheSlot>,
}

impl SecurityCache {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    pub fn add_data(&mut self, data: MarketData) {
        let kind = data.kind();
        match self.inner.remove(&kind) {
            Some(slot) => {
                self.inner.insert(
                    kind,
                    CacheSlot {
                        latest: data,
                        previous: Some(slot.latest),
                    },
                );
            }
            None => {
                self.inner.insert(
                    kind,
                    CacheSlot {
                        latest: data,
                        previous: None,
                    },
                );
            }
        }
    }

    pub fn get_latest(&self, kind: DataKind) -> Option<&MarketData> {
        self.inner.get(&kind).map(|slot| &slot.latest)
    }

    pub fn get_previous(&self, kind: DataKind) -> Option<&MarketData> {
        self.inner.get(&kind).and_then(|slot| slot.previous.as_ref())
    }

    pub fn latest_tick(&self) -> Option<&Tick> {
        match self.get_latest(DataKind::Tick) {
            Some(MarketData::Tick(tick)) => Some(tick),
            _ => None,
        }
    }

    pub fn latest_quote_bar(&self) -> Option<&QuoteBar> {
        match self.get_latest(DataKind::QuoteBar) {
            Some(MarketData::QuoteBar(bar)) => Some(bar),
            _ => None,
        }
    }

    pub fn latest_trade_bar(&self) -> Option<&TradeBar> {
        match self.get_latest(DataKind::TradeBar) {
            Some(MarketData::TradeBar(bar)) => Some(bar),
            _ => None,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
