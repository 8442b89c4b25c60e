//! Benchmarks for the cartagena attribution engine.
#![allow(missing_docs)]

use cartagena_model::{AttributionEngine, EngineConfig, FactorSpec};
use cartagena_primitives::{Date, PricePoint};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;

fn trading_dates(n: usize) -> Vec<Date> {
    let mut out = Vec::with_capacity(n);
    let mut date = Date::from_ymd_opt(2022, 1, 3).unwrap();
    for _ in 0..n {
        out.push(date);
        date = date.succ_opt().unwrap();
    }
    out
}

fn synthetic_prices(n_days: usize, n_factors: usize) -> Vec<PricePoint> {
    let mut rng = rand::thread_rng();
    let mut factor_levels: Vec<f64> = (0..n_factors).map(|j| 50.0 + 10.0 * j as f64).collect();
    let mut target_level = 4000.0;

    let mut prices = Vec::with_capacity((n_factors + 1) * n_days);
    for date in trading_dates(n_days) {
        let mut target_return = 0.0001;
        for (j, level) in factor_levels.iter_mut().enumerate() {
            let r = rng.r#gen::<f64>() * 0.01 - 0.005;
            let weight = if j % 2 == 0 { 1.5 } else { -0.8 };
            *level *= 1.0 + r;
            target_return += weight * r / n_factors as f64;
            prices.push(PricePoint::new(format!("F{j}"), date, *level));
        }
        target_return += rng.r#gen::<f64>() * 0.002 - 0.001;
        target_level *= 1.0 + target_return;
        prices.push(PricePoint::new("TGT", date, target_level));
    }
    prices
}

fn base_config(n_factors: usize) -> EngineConfig {
    EngineConfig::new(
        "TGT",
        (0..n_factors).map(|j| FactorSpec::new(format!("F{j}").into())).collect(),
    )
}

fn bench_single_date_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_date_run");
    group.sample_size(50);

    // Days and candidate factors spanning a quarter to two years of history
    let scenarios = [
        (150, 2, "two_factors_short_history"),
        (260, 5, "five_factors_one_year"),
        (520, 10, "ten_factors_two_years"),
    ];

    for (n_days, n_factors, name) in scenarios {
        group.throughput(Throughput::Elements(n_factors as u64));
        group.bench_with_input(
            BenchmarkId::new("scenario", name),
            &(n_days, n_factors),
            |b, &(n_days, n_factors)| {
                let prices = synthetic_prices(n_days, n_factors);
                let engine =
                    AttributionEngine::from_prices(&prices, base_config(n_factors)).unwrap();
                let last = *engine.panel().dates().last().unwrap();

                b.iter(|| engine.run(black_box(last)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_regression_window_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("regression_window_scaling");
    group.sample_size(30);

    let prices = synthetic_prices(400, 5);
    for window in [30, 60, 90, 120] {
        group.bench_with_input(
            BenchmarkId::new("regression_window", window),
            &window,
            |b, &window| {
                let mut config = base_config(5);
                config.regression_window = window;
                let engine = AttributionEngine::from_prices(&prices, config).unwrap();
                let last = *engine.panel().dates().last().unwrap();

                b.iter(|| engine.run(black_box(last)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_backfill_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("backfill_range");
    group.sample_size(20);

    let prices = synthetic_prices(260, 5);
    let engine = AttributionEngine::from_prices(&prices, base_config(5)).unwrap();
    let dates = engine.panel().dates();
    let from = dates[dates.len() - 20];
    let to = *dates.last().unwrap();

    group.throughput(Throughput::Elements(20));
    group.bench_function("last_twenty_dates", |b| {
        b.iter(|| engine.backfill(black_box(from), black_box(to)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_date_run,
    bench_regression_window_scaling,
    bench_backfill_range,
);

criterion_main!(benches);
