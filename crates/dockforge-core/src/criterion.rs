//! Optimization criteria selectable per request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Objective to maximize when assigning ships to docks.
///
/// Priority convention: a larger priority number marks a more urgent ship,
/// and every criterion that involves priority maximizes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationCriterion {
    /// Maximize the summed priority of berthed ships.
    WaitingTime,

    /// Maximize the summed `ship.length / dock.length` ratio.
    DockUtilization,

    /// Summed priority minus a weighted utilization term.
    #[default]
    Balanced,
}

impl OptimizationCriterion {
    /// Wire name of this criterion.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationCriterion::WaitingTime => "waiting_time",
            OptimizationCriterion::DockUtilization => "dock_utilization",
            OptimizationCriterion::Balanced => "balanced",
        }
    }
}

impl fmt::Display for OptimizationCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizationCriterion {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "waiting_time" => Ok(OptimizationCriterion::WaitingTime),
            "dock_utilization" => Ok(OptimizationCriterion::DockUtilization),
            "balanced" => Ok(OptimizationCriterion::Balanced),
            other => Err(InputError::UnknownCriterion(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for criterion in [
            OptimizationCriterion::WaitingTime,
            OptimizationCriterion::DockUtilization,
            OptimizationCriterion::Balanced,
        ] {
            assert_eq!(criterion.as_str().parse::<OptimizationCriterion>(), Ok(criterion));
        }
    }

    #[test]
    fn test_unknown_criterion() {
        assert_eq!(
            "fastest".parse::<OptimizationCriterion>(),
            Err(InputError::UnknownCriterion("fastest".into()))
        );
    }

    #[test]
    fn test_default_is_balanced() {
        assert_eq!(OptimizationCriterion::default(), OptimizationCriterion::Balanced);
    }
}
