//! Ratio engine and ratio table

mod engine;
mod table;

pub use engine::{compute_ratios, margin, pct_change, MissingNumerator, RatioConfig, RatioEngine};
pub use table::{RatioKind, RatioTable};
