//! Named market scenarios and their growth-rate multipliers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named scenario scaling the historical growth rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scenario {
    Bear,
    Conservative,
    #[default]
    Base,
    Optimistic,
    Bull,
}

impl Scenario {
    /// Scenarios from most pessimistic to most optimistic
    pub const ALL: [Scenario; 5] = [
        Scenario::Bear,
        Scenario::Conservative,
        Scenario::Base,
        Scenario::Optimistic,
        Scenario::Bull,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            Scenario::Bear => 0.6,
            Scenario::Conservative => 0.8,
            Scenario::Base => 1.0,
            Scenario::Optimistic => 1.2,
            Scenario::Bull => 1.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Bear => "Bear",
            Scenario::Conservative => "Conservative",
            Scenario::Base => "Base",
            Scenario::Optimistic => "Optimistic",
            Scenario::Bull => "Bull",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown scenario {0:?} (expected Bear, Conservative, Base, Optimistic or Bull)")]
pub struct UnknownScenario(pub String);

impl FromStr for Scenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers() {
        let multipliers: Vec<f64> = Scenario::ALL.iter().map(|s| s.multiplier()).collect();
        assert_eq!(multipliers, vec![0.6, 0.8, 1.0, 1.2, 1.5]);
        assert_eq!(Scenario::default(), Scenario::Base);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("bull".parse::<Scenario>(), Ok(Scenario::Bull));
        assert_eq!(" Conservative ".parse::<Scenario>(), Ok(Scenario::Conservative));
        assert_eq!(
            "sideways".parse::<Scenario>(),
            Err(UnknownScenario("sideways".to_string()))
        );

        for scenario in Scenario::ALL {
            assert_eq!(scenario.to_string().parse::<Scenario>(), Ok(scenario));
        }
    }
}
