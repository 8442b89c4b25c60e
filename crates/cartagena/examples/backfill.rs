//! Example: Explaining a Target's Daily Returns
//!
//! This example demonstrates the full attribution pipeline:
//! 1. Build a synthetic market where the target loads on two factors
//! 2. Fit the walk-forward engine and explain the latest date
//! 3. Backfill the last ten trading days
//! 4. Export the latest report as pretty-printed JSON

use cartagena::model::{AttributionEngine, EngineConfig, FactorSpec};
use cartagena::output::{ExportFormat, Exporter, render_summary};
use cartagena::primitives::{Date, PricePoint};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Trading days of synthetic history.
const N_DAYS: usize = 300;

fn trading_dates(n: usize) -> Vec<Date> {
    let mut out = Vec::with_capacity(n);
    let mut date = Date::from_ymd_opt(2023, 6, 1).unwrap();
    for _ in 0..n {
        out.push(date);
        date = date.succ_opt().unwrap();
    }
    out
}

/// The target gains when the dollar index rises and loses when crude rises.
fn synthetic_market(n_days: usize) -> Result<Vec<PricePoint>, rand_distr::NormalError> {
    let mut rng = StdRng::seed_from_u64(2024);
    let factor_shock = Normal::new(0.0, 0.004)?;
    let idio_shock = Normal::new(0.0, 0.0008)?;

    let mut dxy = 104.0_f64;
    let mut brent = 82.0_f64;
    let mut cop = 3900.0_f64;
    let mut prices = Vec::with_capacity(3 * n_days);
    for date in trading_dates(n_days) {
        let r_dxy: f64 = factor_shock.sample(&mut rng);
        let r_brent: f64 = factor_shock.sample(&mut rng);
        let r_cop = 0.0001 + 1.2 * r_dxy - 0.8 * r_brent + idio_shock.sample(&mut rng);

        dxy *= 1.0 + r_dxy;
        brent *= 1.0 + r_brent;
        cop *= 1.0 + r_cop;
        prices.push(PricePoint::new("DX-Y.NYB", date, dxy));
        prices.push(PricePoint::new("BZ=F", date, brent));
        prices.push(PricePoint::new("USDCOP=X", date, cop));
    }
    Ok(prices)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== cartagena: daily factor attribution ===\n");

    // =========================================================================
    // SYNTHETIC MARKET
    // =========================================================================

    let prices = synthetic_market(N_DAYS)?;
    println!("Built {} price rows across 3 instruments\n", prices.len());

    // =========================================================================
    // ENGINE
    // =========================================================================

    let mut config = EngineConfig::new(
        "USDCOP=X",
        vec![
            FactorSpec::new("DX-Y.NYB".into()),
            FactorSpec::new("BZ=F".into()),
            FactorSpec::lagged("BZ=F".into(), 1),
        ],
    );
    config.regression_window = 60;
    config.standardization_window = 60;

    let engine = AttributionEngine::from_prices(&prices, config)?;

    // =========================================================================
    // LATEST DATE
    // =========================================================================

    let latest = *engine.panel().dates().last().ok_or("no dates in the panel")?;
    let report = engine.run(latest)?;
    println!("{}", render_summary(&report));
    println!("Top driver: {}", report.top_rows(1)[0].factor);
    println!("Explained ratio: {:.1}%\n", report.explained_ratio() * 100.0);

    // =========================================================================
    // BACKFILL
    // =========================================================================

    println!("Last ten trading days:");
    let dates = engine.panel().dates();
    let from = dates[dates.len() - 10];
    for (date, result) in engine.backfill(from, latest) {
        match result {
            Ok(day) => println!(
                "  {date}  target {:>+8.3}%  unexplained {:>+8.3}%",
                day.target_return * 100.0,
                day.unexplained * 100.0,
            ),
            Err(e) => println!("  {date}  skipped ({e})"),
        }
    }

    // =========================================================================
    // EXPORT
    // =========================================================================

    let out = std::env::temp_dir().join("cartagena_report.json");
    report.export_to_file(&out, ExportFormat::PrettyJson)?;
    println!("\nLatest report exported to {}", out.display());

    Ok(())
}
