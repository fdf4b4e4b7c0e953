//! Financial analytics - ratio derivation and scenario forecasting from annual statements
//!
//! This library provides:
//! - Loading of income, balance sheet and cash flow statement exports
//! - Profitability, growth, liquidity, solvency and efficiency ratios
//! - Compound annual growth rates and scenario projections
//! - Executive summary metrics for the latest reporting period

pub mod error;
pub mod statements;
pub mod ratios;
pub mod forecast;
pub mod summary;

// Re-export commonly used types
pub use error::{AnalyticsError, Result};
pub use statements::{FinancialStatements, LineItem, StatementCache, StatementKind, StatementTable};
pub use ratios::{compute_ratios, RatioEngine, RatioKind, RatioTable};
pub use forecast::{compound_growth_rate, project, ForecastConfig, Forecaster, Projection, Scenario};
pub use summary::ExecutiveSummary;
