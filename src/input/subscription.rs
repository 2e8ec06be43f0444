use std::collections::HashMap;

use crate::input::data::DataKind;

/// Answers which kinds of data are currently subscribed for a symbol. Fill models only price
/// orders from subscribed kinds so that a stale value left in the cache by a removed
/// subscription is never used.
pub trait DataSubscriptions {
    fn subscribed_kinds(&self, symbol: &str) -> Vec<DataKind>;
    /// Whether any subscription for the symbol includes pre and post market data.
    fn is_extended_market_hours(&self, _symbol: &str) -> bool {
        false
    }
}

#[derive(Clone, Debug)]
struct Subscription {
    kind: DataKind,
    extended_market_hours: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Subscriptions {
    inner: HashMap<String, Vec<Subscription>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    fn insert(&mut self, symbol: &str, kind: DataKind, extended_market_hours: bool) {
        let subscriptions = self.inner.entry(symbol.to_string()).or_default();
        if let Some(existing) = subscriptions.iter_mut().find(|sub| sub.kind == kind) {
            existing.extended_market_hours = extended_market_hours;
        } else {
            subscriptions.push(Subscription {
                kind,
                extended_market_hours,
            });
        }
    }

    pub fn add(&mut self, symbol: &str, kind: DataKind) {
        self.insert(symbol, kind, false);
    }

    pub fn add_extended(&mut self, symbol: &str, kind: DataKind) {
        self.insert(symbol, kind, true);
    }

    pub fn remove(&mut self, symbol: &str, kind: DataKind) {
        if let Some(subscriptions) = self.inner.get_mut(symbol) {
            subscriptions.retain(|sub| sub.kind != kind);
        }
    }
}

impl DataSubscriptions for Subscriptions {
    fn subscribed_kinds(&self, symbol: &str) -> Vec<DataKind> {
        match self.inner.get(symbol) {
            Some(subscriptions) => subscriptions.iter().map(|sub| sub.kind).collect(),
            None => Vec::new(),
        }
    }

    fn is_extended_market_hours(&self, symbol: &str) -> bool {
        self.inner
            .get(symbol)
            .map(|subscriptions| subscriptions.iter().any(|sub| sub.extended_market_hours))
            .unwrap_or(false)
    }
}
