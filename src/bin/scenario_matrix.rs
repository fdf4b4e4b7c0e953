//! Project revenue and net income under every scenario and horizon
//!
//! Writes one CSV row per (scenario, horizon, projected year).
//! Accepts config via environment variables:
//!   DATA_DIR (default notebooks), OUTPUT (default scenario_matrix.csv)

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use rayon::prelude::*;
use serde::Serialize;

use fin_analytics::forecast::{forecast, ForecastReport, MAX_HORIZON_YEARS};
use fin_analytics::statements::DEFAULT_DATA_DIR;
use fin_analytics::{FinancialStatements, ForecastConfig, Scenario};

#[derive(Debug, Serialize)]
struct MatrixRow {
    scenario: Scenario,
    multiplier: f64,
    horizon_years: u32,
    fiscal_year: i32,
    revenue: f64,
    revenue_rate: f64,
    net_income: Option<f64>,
    net_income_rate: Option<f64>,
}

fn matrix_rows(report: &ForecastReport) -> Vec<MatrixRow> {
    let net_income_rate = report
        .net_income
        .as_ref()
        .map(|ni| ni.projection.effective_rate);
    report
        .rows()
        .into_iter()
        .map(|row| MatrixRow {
            scenario: report.scenario,
            multiplier: report.multiplier,
            horizon_years: report.horizon_years,
            fiscal_year: row.fiscal_year,
            revenue: row.revenue,
            revenue_rate: report.revenue.projection.effective_rate,
            net_income: row.net_income,
            net_income_rate,
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let data_dir: PathBuf = env::var("DATA_DIR")
        .unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string())
        .into();
    let output_path = env::var("OUTPUT").unwrap_or_else(|_| "scenario_matrix.csv".to_string());

    let start = Instant::now();
    let statements = FinancialStatements::load_from(&data_dir)
        .with_context(|| format!("could not load financial statements from {}", data_dir.display()))?;
    println!("Loaded statements in {:?}", start.elapsed());

    let grid: Vec<ForecastConfig> = Scenario::ALL
        .iter()
        .flat_map(|&scenario| {
            (1..=MAX_HORIZON_YEARS).map(move |horizon_years| ForecastConfig {
                horizon_years,
                scenario,
            })
        })
        .collect();

    // Each forecast is independent; the statements are shared read-only
    let reports: Vec<ForecastReport> = grid
        .par_iter()
        .map(|config| forecast(&statements.income, config))
        .collect::<Result<_, _>>()?;
    println!("Ran {} forecasts in {:?}", reports.len(), start.elapsed());

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("unable to create {}", output_path))?;
    let mut written = 0;
    for report in &reports {
        for row in matrix_rows(report) {
            writer.serialize(row)?;
            written += 1;
        }
    }
    writer.flush()?;

    println!("Written {} rows to {}", written, output_path);
    Ok(())
}
