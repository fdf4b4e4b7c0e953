//! Compound scenario projection from a seed value

use serde::{Deserialize, Serialize};

/// Projected values for future periods 1..=horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub values: Vec<f64>,

    /// Base rate times the scenario multiplier
    pub effective_rate: f64,
}

impl Projection {
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Value at the end of the horizon
    pub fn terminal_value(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Value `period` periods after `seed` at a constant rate
pub fn projected_value(seed: f64, effective_rate: f64, period: u32) -> f64 {
    seed * (1.0 + effective_rate).powf(f64::from(period))
}

/// Compound `seed` forward at `base_rate * multiplier` for `horizon` periods
///
/// Period `i` is `seed * (1 + effective_rate)^i`, compounding from the last
/// actual observation. Negative effective rates are not clamped.
pub fn project(seed: f64, base_rate: f64, horizon: u32, multiplier: f64) -> Projection {
    let effective_rate = base_rate * multiplier;
    let values = (1..=horizon)
        .map(|i| projected_value(seed, effective_rate, i))
        .collect();

    Projection {
        values,
        effective_rate,
    }
}
