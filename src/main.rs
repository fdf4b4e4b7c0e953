//! Financial Analytics CLI
//!
//! Loads the three statement exports, prints the ratio table, the executive
//! summary and a scenario forecast of revenue and net income.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use fin_analytics::forecast::{ForecastReport, MAX_HORIZON_YEARS};
use fin_analytics::statements::DEFAULT_DATA_DIR;
use fin_analytics::{
    compute_ratios, ExecutiveSummary, FinancialStatements, ForecastConfig, Forecaster, RatioTable,
    Scenario,
};

#[derive(Parser, Debug)]
#[command(version, about = "Financial ratio analysis and scenario forecasting")]
struct Cli {
    /// Directory holding the income, balance sheet and cash flow CSV exports
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Forecast horizon in years
    #[arg(long, default_value_t = ForecastConfig::default().horizon_years, value_parser = clap::value_parser!(u32).range(1..=MAX_HORIZON_YEARS as i64))]
    horizon: u32,

    /// Market scenario: Bear, Conservative, Base, Optimistic or Bull
    #[arg(long, default_value_t = Scenario::Base)]
    scenario: Scenario,

    /// Print everything as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Also write the ratio table to this CSV file
    #[arg(long)]
    ratios_csv: Option<PathBuf>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: &'a ExecutiveSummary,
    ratios: &'a RatioTable,
    forecast: &'a ForecastReport,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let statements = FinancialStatements::load_from(&cli.data_dir).with_context(|| {
        format!(
            "could not load financial statements from {}",
            cli.data_dir.display()
        )
    })?;
    let ratios = compute_ratios(&statements).context("could not derive ratios")?;
    let summary = ExecutiveSummary::from_statements(&statements, &ratios);

    let forecaster = Forecaster::new(ForecastConfig {
        horizon_years: cli.horizon,
        scenario: cli.scenario,
    });
    let report = forecaster
        .run(&statements.income)
        .context("could not build forecast")?;

    if let Some(path) = &cli.ratios_csv {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        ratios.write_csv(file)?;
        eprintln!("Ratio table written to: {}", path.display());
    }

    if cli.json {
        let output = JsonOutput {
            summary: &summary,
            ratios: &ratios,
            forecast: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_summary(&summary);
    print_ratios(&ratios);
    print_forecast(&report);
    Ok(())
}

fn billions(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("${:.1}B", v / 1e9))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}%", v * 100.0))
}

fn print_summary(summary: &ExecutiveSummary) {
    match summary.fiscal_year {
        Some(year) => println!("Reporting Period: Fiscal Year End {}", year),
        None => println!("Reporting Period: unknown"),
    }
    println!("======================================\n");
    println!("  Total Revenue:       {:>10} ({})", billions(summary.revenue), percent(summary.revenue_growth));
    println!("  Net Income:          {:>10} ({})", billions(summary.net_income), percent(summary.net_income_growth));
    println!("  Operating Cash Flow: {:>10}", billions(summary.operating_cash_flow));
    println!("  Free Cash Flow:      {:>10}", billions(summary.free_cash_flow));
    println!("  Net Margin:          {:>10}", percent(summary.net_margin));
    println!();
}

fn print_ratios(ratios: &RatioTable) {
    println!("Financial Ratios:");
    print!("{:>10}", "Period");
    for kind in ratios.kinds() {
        print!(" {:>17}", kind.name());
    }
    println!();
    println!("{}", "-".repeat(10 + 18 * ratios.kinds().count()));

    for (idx, period) in ratios.periods.iter().enumerate() {
        print!("{:>10}", period);
        for kind in ratios.kinds() {
            match ratios.value(kind, idx) {
                Some(v) => print!(" {:>17.4}", v),
                None => print!(" {:>17}", "-"),
            }
        }
        println!();
    }
    println!();
}

fn print_forecast(report: &ForecastReport) {
    let ni_rate = report.net_income.as_ref().map(|ni| ni.projection.effective_rate);
    println!(
        "{} Scenario (x{:.1}): {:.2}% annual Revenue growth, {} Net Income growth",
        report.scenario,
        report.multiplier,
        report.revenue.projection.effective_rate * 100.0,
        ni_rate.map_or_else(|| "n/a".to_string(), |r| format!("{:.2}%", r * 100.0)),
    );
    println!("{:>6} {:>18} {:>18}", "Year", "Revenue", "Net Income");
    println!("{}", "-".repeat(44));
    for row in report.rows() {
        let net_income = row
            .net_income
            .map_or_else(|| "-".to_string(), |v| format!("{:.0}", v));
        println!("{:>6} {:>18.0} {:>18}", row.fiscal_year, row.revenue, net_income);
    }
}
