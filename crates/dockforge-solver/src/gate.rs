//! Environmental gate: decides whether solving may proceed at all.

use std::fmt;

use dockforge_core::{UnassignedKind, WeatherSnapshot};
use tracing::debug;

/// A violated weather threshold. Tide is checked before wind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeatherViolation {
    TideTooLow { current: f64, minimum: f64 },
    WindTooStrong { current: f64, maximum: f64 },
}

impl WeatherViolation {
    pub fn kind(&self) -> UnassignedKind {
        match self {
            WeatherViolation::TideTooLow { .. } => UnassignedKind::WeatherTide,
            WeatherViolation::WindTooStrong { .. } => UnassignedKind::WeatherWind,
        }
    }
}

impl fmt::Display for WeatherViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherViolation::TideTooLow { current, minimum } => {
                write!(f, "Insufficient tide level ({current}m < {minimum}m)")
            }
            WeatherViolation::WindTooStrong { current, maximum } => {
                write!(f, "Excessive wind speed ({current} > {maximum} knots)")
            }
        }
    }
}

/// Outcome of the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    Open,
    Closed(WeatherViolation),
}

impl GateDecision {
    pub fn is_open(&self) -> bool {
        matches!(self, GateDecision::Open)
    }
}

/// Evaluates a weather snapshot against its thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentalGate;

impl EnvironmentalGate {
    pub fn evaluate(&self, weather: &WeatherSnapshot) -> GateDecision {
        let decision = if weather.tide_too_low() {
            GateDecision::Closed(WeatherViolation::TideTooLow {
                current: weather.tide_current,
                minimum: weather.min_tide_level,
            })
        } else if weather.wind_too_strong() {
            GateDecision::Closed(WeatherViolation::WindTooStrong {
                current: weather.wind_speed,
                maximum: weather.max_wind_speed,
            })
        } else {
            GateDecision::Open
        };

        debug!(
            event = "gate",
            tide = weather.tide_current,
            wind = weather.wind_speed,
            open = decision.is_open(),
        );
        decision
    }
}
