#![allow(dead_code)]

use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::Distribution;

use islay::input::data::{Bar, DataKind, QuoteBar, Tick, TradeBar};
use islay::input::subscription::Subscriptions;
use islay::security::Security;

pub const HOUR: i64 = 3600;
pub const DAY: i64 = 86400;
//Date - 4/1/21 00:00:0000, a Monday
pub const MONDAY: i64 = 1609718400;
pub const MONDAY_10AM: i64 = MONDAY + 10 * HOUR;
pub const SATURDAY_10AM: i64 = MONDAY_10AM + 5 * DAY;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Security with a one minute trade bar ending at `end` and subscriptions for trade bars only.
pub fn trade_bar_security(symbol: &str, end: i64, bar: Bar) -> (Security, Subscriptions) {
    let mut security = Security::new(symbol);
    security.set_market_data(TradeBar::new(symbol, end - 60, 60, bar, 1000.0).into());
    security.set_local_time(end);

    let mut subs = Subscriptions::new();
    subs.add(symbol, DataKind::TradeBar);
    (security, subs)
}

pub fn quote_bar_security(symbol: &str, end: i64, bid: Bar, ask: Bar) -> (Security, Subscriptions) {
    let mut security = Security::new(symbol);
    security.set_market_data(QuoteBar::new(symbol, end - 60, 60, Some(bid), Some(ask)).into());
    security.set_local_time(end);

    let mut subs = Subscriptions::new();
    subs.add(symbol, DataKind::QuoteBar);
    (security, subs)
}

/// Security that has only seen `ticks`, in order, with subscriptions for ticks only.
pub fn tick_security(symbol: &str, now: i64, ticks: Vec<Tick>) -> (Security, Subscriptions) {
    let mut security = Security::new(symbol);
    for tick in ticks {
        security.set_market_data(tick.into());
    }
    security.set_local_time(now);

    let mut subs = Subscriptions::new();
    subs.add(symbol, DataKind::Tick);
    (security, subs)
}

pub fn random_bar(rng: &mut impl Rng) -> Bar {
    let price_dist = Uniform::new(90.0, 100.0);
    let move_dist = Uniform::new(0.0, 5.0);

    let open: f64 = price_dist.sample(rng);
    let close: f64 = price_dist.sample(rng);
    let high = open.max(close) + move_dist.sample(rng);
    let low = open.min(close) - move_dist.sample(rng);
    Bar::new(open, high, low, close)
}

/// Quote tick with a non-negative spread.
pub fn random_quote(symbol: &str, time: i64, rng: &mut impl Rng) -> Tick {
    let price_dist = Uniform::new(90.0, 100.0);
    let spread_dist = Uniform::new(0.0, 0.5);

    let bid: f64 = price_dist.sample(rng);
    let ask = bid + spread_dist.sample(rng);
    Tick::quote(symbol, time, bid, ask)
}
