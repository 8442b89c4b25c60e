//! Daily factor attribution CLI.
//!
//! Reads a long CSV of close prices, fits the walk-forward attribution
//! engine, and explains the target's return on one date or over a range.
//!
//! Usage: `cargo run --bin attribute --features cli -- PRICES.csv --target ID --factor ID[:LAG] ...`
//! Example: `attribute closes.csv --target USDCOP=X --factor DX-Y.NYB --factor BZ=F:1 --date 2024-06-03`

use std::env;
use std::path::{Path, PathBuf};

use cartagena::model::{AttributionEngine, EngineConfig, FactorSpec};
use cartagena::output::{ExportFormat, Exporter, render_summary};
use cartagena::primitives::{DailyReport, Date, PricePoint, ReturnHorizon};

/// Export format when `--out` is given without `--format`.
const DEFAULT_FORMAT: ExportFormat = ExportFormat::Csv;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1].starts_with("--") {
        print_usage();
        std::process::exit(1);
    }

    let options = match CliOptions::parse(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}\n");
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage: attribute PRICES.csv --target ID --factor ID[:LAG] [--factor ...]");
    eprintln!("                 [--date YYYY-MM-DD | --from YYYY-MM-DD --to YYYY-MM-DD]");
    eprintln!("                 [--window N] [--std-window N] [--horizon 1d|5d] [--cap F]");
    eprintln!("                 [--out PATH] [--format csv|json|pretty-json]");
    eprintln!();
    eprintln!("The prices file needs an instrument,date,close header row. Without");
    eprintln!("--date or --from/--to the latest date in the file is explained.");
    eprintln!();
    eprintln!("Example: attribute closes.csv --target USDCOP=X --factor DX-Y.NYB --factor BZ=F:1");
}

struct CliOptions {
    prices: PathBuf,
    target: String,
    factors: Vec<FactorSpec>,
    date: Option<Date>,
    from: Option<Date>,
    to: Option<Date>,
    window: Option<usize>,
    std_window: Option<usize>,
    horizon: Option<ReturnHorizon>,
    cap: Option<f64>,
    out: Option<PathBuf>,
    format: Option<ExportFormat>,
}

impl CliOptions {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = Self {
            prices: PathBuf::from(&args[1]),
            target: String::new(),
            factors: Vec::new(),
            date: None,
            from: None,
            to: None,
            window: None,
            std_window: None,
            horizon: None,
            cap: None,
            out: None,
            format: None,
        };

        let mut i = 2;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = args.get(i + 1).ok_or_else(|| format!("{flag} needs a value"))?;
            match flag {
                "--target" => options.target = value.clone(),
                "--factor" => options.factors.push(parse_factor(value)),
                "--date" => options.date = Some(parse_date(value)?),
                "--from" => options.from = Some(parse_date(value)?),
                "--to" => options.to = Some(parse_date(value)?),
                "--window" => options.window = Some(parse_count(flag, value)?),
                "--std-window" => options.std_window = Some(parse_count(flag, value)?),
                "--horizon" => options.horizon = Some(parse_horizon(value)?),
                "--cap" => {
                    options.cap =
                        Some(value.parse().map_err(|_| format!("bad --cap value: {value}"))?);
                }
                "--out" => options.out = Some(PathBuf::from(value)),
                "--format" => options.format = Some(parse_format(value)?),
                other => return Err(format!("unknown flag: {other}")),
            }
            i += 2;
        }

        if options.target.is_empty() {
            return Err("--target is required".to_string());
        }
        if options.factors.is_empty() {
            return Err("at least one --factor is required".to_string());
        }
        if options.from.is_some() != options.to.is_some() {
            return Err("--from and --to must be given together".to_string());
        }
        if options.date.is_some() && options.from.is_some() {
            return Err("--date conflicts with --from/--to".to_string());
        }
        Ok(options)
    }
}

/// `ID` or `ID:LAG`; a suffix that does not parse as a lag is part of the id.
fn parse_factor(raw: &str) -> FactorSpec {
    if let Some((id, lag)) = raw.rsplit_once(':')
        && let Ok(lag) = lag.parse::<usize>()
    {
        FactorSpec::lagged(id.into(), lag)
    } else {
        FactorSpec::new(raw.into())
    }
}

fn parse_date(value: &str) -> Result<Date, String> {
    value.parse::<Date>().map_err(|_| format!("bad date: {value} (expected YYYY-MM-DD)"))
}

fn parse_count(flag: &str, value: &str) -> Result<usize, String> {
    value.parse::<usize>().map_err(|_| format!("bad {flag} value: {value}"))
}

fn parse_horizon(value: &str) -> Result<ReturnHorizon, String> {
    match value {
        "1d" => Ok(ReturnHorizon::OneDay),
        "5d" => Ok(ReturnHorizon::FiveDay),
        other => Err(format!("bad --horizon value: {other} (expected 1d or 5d)")),
    }
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    match value {
        "csv" => Ok(ExportFormat::Csv),
        "json" => Ok(ExportFormat::Json),
        "pretty-json" => Ok(ExportFormat::PrettyJson),
        other => Err(format!("bad --format value: {other} (expected csv, json, or pretty-json)")),
    }
}

fn run(options: &CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let prices = load_prices(&options.prices)?;

    let mut config = EngineConfig::new(options.target.as_str(), options.factors.clone());
    if let Some(window) = options.window {
        config.regression_window = window;
    }
    if let Some(window) = options.std_window {
        config.standardization_window = window;
    }
    if let Some(horizon) = options.horizon {
        config.horizon = horizon;
    }
    if let Some(cap) = options.cap {
        config.cap_fraction = cap;
    }

    let engine = AttributionEngine::from_prices(&prices, config)?;

    if let (Some(from), Some(to)) = (options.from, options.to) {
        run_backfill(&engine, from, to, options)
    } else {
        let date = match options.date {
            Some(date) => date,
            None => *engine.panel().dates().last().ok_or("the price file holds no dates")?,
        };
        let report = engine.run(date)?;
        println!("{}", render_summary(&report));
        export(&report, options)
    }
}

fn run_backfill(
    engine: &AttributionEngine,
    from: Date,
    to: Date,
    options: &CliOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let results = engine.backfill(from, to);
    if results.is_empty() {
        return Err(format!("no panel dates between {from} and {to}").into());
    }

    println!("{:<12} {:>10} {:>11} {:>13}", "date", "target", "explained", "unexplained");
    for (date, result) in &results {
        match result {
            Ok(report) => println!(
                "{:<12} {:>+9.3}% {:>+10.3}% {:>+12.3}%",
                date.to_string(),
                report.target_return * 100.0,
                report.explained * 100.0,
                report.unexplained * 100.0,
            ),
            Err(e) => println!("{:<12} skipped ({e})", date.to_string()),
        }
    }

    let total = results.len();
    let reports: Vec<DailyReport> =
        results.into_iter().filter_map(|(_, result)| result.ok()).collect();
    println!("\n{total} dates in range, {} reports produced", reports.len());
    if reports.is_empty() {
        return Err("no date in the range produced a report".into());
    }

    export(&reports, options)
}

fn export<T: Exporter>(value: &T, options: &CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(out) = &options.out {
        let format = options.format.unwrap_or(DEFAULT_FORMAT);
        value.export_to_file(out, format)?;
        println!("Report written to {}", out.display());
    }
    Ok(())
}

fn load_prices(path: &Path) -> Result<Vec<PricePoint>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut prices = Vec::new();
    for row in reader.deserialize() {
        let point: PricePoint = row?;
        prices.push(point);
    }
    println!("Loaded {} price rows from {}", prices.len(), path.display());
    Ok(prices)
}
