use criterion::{criterion_group, criterion_main, Criterion};
use rand::distributions::Uniform;
use rand::thread_rng;
use rand_distr::Distribution;

use islay::fill::{FillContext, FillModel};
use islay::input::data::{Bar, DataKind, Tick, TradeBar};
use islay::input::subscription::Subscriptions;
use islay::order::Order;
use islay::security::hours::SessionHours;
use islay::security::Security;

//Date - 4/1/21 10:00:0000, a Monday
const START: i64 = 1609754400;

fn fill_loop_random_data() {
    let price_dist = Uniform::new(90.0, 100.0);
    let mut rng = thread_rng();

    let hours = SessionHours::us_equity();
    let mut subs = Subscriptions::new();
    subs.add("ABC", DataKind::Tick);
    subs.add("ABC", DataKind::TradeBar);
    let ctx = FillContext::new(&subs, &hours);
    let model = FillModel::equity();

    let mut security = Security::new("ABC");
    let mut orders = vec![
        Order::limit("ABC", 100.0, 92.0, START - 60),
        Order::stop_limit("ABC", -100.0, 93.0, 91.0, START - 60),
        Order::limit_if_touched("ABC", 100.0, 91.0, 95.0, START - 60),
    ];

    for i in 0..300 {
        let time = START + i * 60;
        let open = price_dist.sample(&mut rng);
        let close = price_dist.sample(&mut rng);
        let bar = Bar::new(
            open,
            open.max(close) + 1.0,
            open.min(close) - 1.0,
            close,
        );
        security.set_market_data(TradeBar::new("ABC", time, 60, bar, 1000.0).into());
        security.set_market_data(Tick::quote("ABC", time + 60, close - 0.05, close + 0.05).into());
        security.set_local_time(time + 60);

        for order in orders.iter_mut() {
            let _ = model.fill(&security, order, &ctx);
        }
        let _ = model.fill(&security, &mut Order::market("ABC", 10.0, time + 60), &ctx);
    }
}

fn benchmarks(c: &mut Criterion) {
    c.bench_function("fill loop", |b| b.iter(fill_loop_random_data));
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
