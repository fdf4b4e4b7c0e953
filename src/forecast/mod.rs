//! Growth forecaster: compound growth rates, scenario projections and the
//! revenue / net income forecaster built on them

mod forecaster;
mod growth;
mod projection;
mod scenario;

pub use forecaster::{
    forecast, ForecastConfig, ForecastReport, ForecastRow, Forecaster, SeriesForecast,
    MAX_HORIZON_YEARS,
};
pub use growth::{compound_growth_rate, compound_growth_rate_of};
pub use projection::{project, projected_value, Projection};
pub use scenario::{Scenario, UnknownScenario};
