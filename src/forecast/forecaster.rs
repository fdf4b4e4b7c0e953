//! Scenario forecaster for revenue and net income
//!
//! Derives each series' historical CAGR from the income statement, then
//! projects it from the latest reported value under a scenario.

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::growth::compound_growth_rate;
use super::projection::{project, Projection};
use super::scenario::Scenario;
use crate::error::{AnalyticsError, Result};
use crate::statements::{LineItem, StatementKind, StatementTable};

/// Longest horizon offered to interactive callers
pub const MAX_HORIZON_YEARS: u32 = 10;

/// Configuration for a forecast run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastConfig {
    /// Number of future fiscal years to project
    pub horizon_years: u32,

    /// Scenario applied to every projected series
    pub scenario: Scenario,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_years: 5,
            scenario: Scenario::Base,
        }
    }
}

/// Forecast of a single line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesForecast {
    pub item: LineItem,

    /// Latest reported value, NaN if the series is entirely blank
    pub seed: f64,

    /// Historical compound growth rate
    pub cagr: f64,

    pub projection: Projection,
}

impl SeriesForecast {
    /// Forecast one line item of a statement
    pub fn from_statement(
        table: &StatementTable,
        item: LineItem,
        config: &ForecastConfig,
    ) -> Result<Self> {
        let history = table.column(item).ok_or(AnalyticsError::MissingLineItem {
            statement: table.kind(),
            item,
        })?;

        let cagr = compound_growth_rate(history);
        let seed = table.latest(item).unwrap_or(f64::NAN);
        let projection = project(seed, cagr, config.horizon_years, config.scenario.multiplier());
        debug!(
            "{}: seed {:.0}, CAGR {:.4}, effective rate {:.4}",
            item, seed, cagr, projection.effective_rate
        );

        Ok(Self {
            item,
            seed,
            cagr,
            projection,
        })
    }
}

/// One projected fiscal year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub fiscal_year: i32,
    pub revenue: f64,
    pub net_income: Option<f64>,
}

/// Revenue and net income forecast under one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub scenario: Scenario,
    pub multiplier: f64,
    pub horizon_years: u32,

    /// Period end of the last reported fiscal year
    pub base_period: NaiveDate,

    /// Projected fiscal years, `base year + 1 ..= base year + horizon`
    pub fiscal_years: Vec<i32>,

    pub revenue: SeriesForecast,

    /// Absent when the income statement does not report net income
    pub net_income: Option<SeriesForecast>,
}

impl ForecastReport {
    /// Tabulate the projections by fiscal year
    ///
    /// Rows stop at the shortest of the fiscal years and the revenue
    /// projection. A net income projection that runs out leaves `None`.
    pub fn rows(&self) -> Vec<ForecastRow> {
        let mut net_income = self
            .net_income
            .iter()
            .flat_map(|ni| ni.projection.values.iter().copied());

        self.fiscal_years
            .iter()
            .zip(&self.revenue.projection.values)
            .map(|(&fiscal_year, &revenue)| ForecastRow {
                fiscal_year,
                revenue,
                net_income: net_income.next(),
            })
            .collect()
    }
}

/// Forecaster bound to a configuration
///
/// # Example
/// ```ignore
/// let statements = FinancialStatements::load_default()?;
/// let forecaster = Forecaster::new(ForecastConfig::default());
///
/// let base = forecaster.run(&statements.income)?;
/// let every_scenario = forecaster.run_scenarios(&statements.income, &Scenario::ALL)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast revenue and net income under the configured scenario
    pub fn run(&self, income: &StatementTable) -> Result<ForecastReport> {
        forecast(income, &self.config)
    }

    /// Forecast under several scenarios with the configured horizon
    pub fn run_scenarios(&self, income: &StatementTable, scenarios: &[Scenario]) -> Result<Vec<ForecastReport>> {
        scenarios
            .iter()
            .map(|&scenario| {
                let config = ForecastConfig {
                    scenario,
                    ..self.config
                };
                forecast(income, &config)
            })
            .collect()
    }

    /// Forecast under every scenario, Bear through Bull
    pub fn forecast_all(&self, income: &StatementTable) -> Result<Vec<ForecastReport>> {
        self.run_scenarios(income, &Scenario::ALL)
    }
}

/// Forecast revenue and net income from an income statement
pub fn forecast(income: &StatementTable, config: &ForecastConfig) -> Result<ForecastReport> {
    let base_period = income
        .last_period()
        .ok_or(AnalyticsError::EmptyStatement(StatementKind::Income))?;
    let base_year = income.last_fiscal_year().unwrap_or_default();

    let revenue = SeriesForecast::from_statement(income, LineItem::TotalRevenue, config)?;
    let net_income = if income.has(LineItem::NetIncome) {
        Some(SeriesForecast::from_statement(income, LineItem::NetIncome, config)?)
    } else {
        debug!("Net Income not reported; forecasting revenue only");
        None
    };

    let fiscal_years = (1..=config.horizon_years)
        .map(|i| base_year.saturating_add_unsigned(i))
        .collect();
    info!(
        "{} scenario: revenue {:.2}%/yr over {} years",
        config.scenario,
        revenue.projection.effective_rate * 100.0,
        config.horizon_years
    );

    Ok(ForecastReport {
        scenario: config.scenario,
        multiplier: config.scenario.multiplier(),
        horizon_years: config.horizon_years,
        base_period,
        fiscal_years,
        revenue,
        net_income,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::FinancialStatements;
    use approx::assert_relative_eq;

    fn fy(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 9, 30).unwrap()
    }

    fn income() -> StatementTable {
        StatementTable::new(StatementKind::Income, vec![fy(2021), fy(2022), fy(2023), fy(2024)])
            .with_column(
                LineItem::TotalRevenue,
                vec![None, Some(100.0), Some(110.0), Some(121.0)],
            )
            .with_values(LineItem::NetIncome, &[50.0, 40.0, 32.0, 25.6])
    }

    #[test]
    fn test_base_forecast() {
        let config = ForecastConfig {
            horizon_years: 3,
            scenario: Scenario::Base,
        };
        let report = forecast(&income(), &config).unwrap();

        assert_eq!(report.base_period, fy(2024));
        assert_eq!(report.fiscal_years, vec![2025, 2026, 2027]);
        assert_eq!(report.revenue.seed, 121.0);
        assert_relative_eq!(report.revenue.cagr, 0.10, epsilon = 1e-12);
        assert_relative_eq!(report.revenue.projection.values[0], 133.1, epsilon = 1e-9);

        let net_income = report.net_income.as_ref().unwrap();
        assert_relative_eq!(net_income.cagr, -0.2, epsilon = 1e-12);
        assert_relative_eq!(net_income.projection.values[0], 20.48, epsilon = 1e-9);

        let rows = report.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].fiscal_year, 2027);
        assert!(rows[2].net_income.unwrap() < rows[1].net_income.unwrap());
    }

    #[test]
    fn test_run_scenarios_orders_by_multiplier() {
        let forecaster = Forecaster::new(ForecastConfig::default());
        let reports = forecaster.run_scenarios(&income(), &Scenario::ALL).unwrap();

        assert_eq!(reports.len(), 5);
        for pair in reports.windows(2) {
            assert!(pair[0].multiplier < pair[1].multiplier);
            let lower = pair[0].revenue.projection.terminal_value().unwrap();
            let higher = pair[1].revenue.projection.terminal_value().unwrap();
            assert!(lower < higher);
        }
        assert!(reports.iter().all(|r| r.horizon_years == 5));
    }

    #[test]
    fn test_forecast_all_covers_every_scenario() {
        let forecaster = Forecaster::new(ForecastConfig {
            horizon_years: 2,
            scenario: Scenario::Bear,
        });
        let reports = forecaster.forecast_all(&income()).unwrap();

        let scenarios: Vec<Scenario> = reports.iter().map(|r| r.scenario).collect();
        assert_eq!(scenarios, Scenario::ALL.to_vec());
        assert!(reports.iter().all(|r| r.fiscal_years == vec![2025, 2026]));
    }

    #[test]
    fn test_rows_stop_at_shortest_projection() {
        let mut report = forecast(&income(), &ForecastConfig::default()).unwrap();
        report.revenue.projection.values.truncate(3);
        if let Some(ni) = report.net_income.as_mut() {
            ni.projection.values.truncate(1);
        }

        let rows = report.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].fiscal_year, 2025);
        assert!(rows[0].net_income.is_some());
        assert_eq!(rows[1].net_income, None);
        assert_eq!(rows[2].net_income, None);

        report.fiscal_years.truncate(2);
        assert_eq!(report.rows().len(), 2);
    }

    #[test]
    fn test_fiscal_years_saturate_instead_of_wrapping() {
        let late = StatementTable::new(
            StatementKind::Income,
            vec![NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()],
        )
        .with_values(LineItem::TotalRevenue, &[100.0]);
        let config = ForecastConfig {
            horizon_years: 3,
            scenario: Scenario::Base,
        };
        let report = forecast(&late, &config).unwrap();
        assert_eq!(report.fiscal_years, vec![2025, 2026, 2027]);

        assert_eq!(2024_i32.saturating_add_unsigned(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_default_horizon_within_interactive_range() {
        // The CLI takes its default from here and validates 1..=MAX_HORIZON_YEARS
        let horizon = ForecastConfig::default().horizon_years;
        assert!((1..=MAX_HORIZON_YEARS).contains(&horizon));
    }

    #[test]
    fn test_zero_horizon_has_no_rows() {
        let forecaster = Forecaster::new(ForecastConfig {
            horizon_years: 0,
            scenario: Scenario::Bull,
        });
        let report = forecaster.run(&income()).unwrap();

        assert!(report.fiscal_years.is_empty());
        assert!(report.rows().is_empty());
        assert_relative_eq!(report.revenue.projection.effective_rate, 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_revenue_required_net_income_optional() {
        let no_net_income = StatementTable::new(StatementKind::Income, vec![fy(2023), fy(2024)])
            .with_values(LineItem::TotalRevenue, &[100.0, 105.0]);
        let report = forecast(&no_net_income, &ForecastConfig::default()).unwrap();
        assert!(report.net_income.is_none());
        assert!(report.rows().iter().all(|r| r.net_income.is_none()));

        let no_revenue = StatementTable::new(StatementKind::Income, vec![fy(2024)])
            .with_values(LineItem::NetIncome, &[10.0]);
        assert!(matches!(
            forecast(&no_revenue, &ForecastConfig::default()),
            Err(AnalyticsError::MissingLineItem { .. })
        ));

        let empty = StatementTable::new(StatementKind::Income, Vec::new());
        assert!(matches!(
            forecast(&empty, &ForecastConfig::default()),
            Err(AnalyticsError::EmptyStatement(_))
        ));
    }

    #[test]
    fn test_default_data_forecast_skips_blank_first_year() {
        let statements = FinancialStatements::load_default().unwrap();
        let report = Forecaster::default().run(&statements.income).unwrap();

        // Four reported years, three intervals
        let expected = (391_035.0_f64 / 365_817.0).powf(1.0 / 3.0) - 1.0;
        assert_relative_eq!(report.revenue.cagr, expected, max_relative = 1e-12);
        assert_eq!(report.revenue.seed, 391_035_000_000.0);
        assert_eq!(report.fiscal_years, vec![2025, 2026, 2027, 2028, 2029]);
    }
}
