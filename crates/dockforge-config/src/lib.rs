//! Configuration system for Dockforge.
//!
//! Load engine configuration from TOML or YAML to control weather
//! thresholds, objective weights, solver strategy and search budgets
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use dockforge_config::{EngineConfig, StrategyType};
//! use std::time::Duration;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     [weather]
//!     min_tide_level = 2.5
//!
//!     [solver]
//!     strategy = "exhaustive_search"
//!
//!     [termination]
//!     seconds_spent_limit = 1
//!     node_count_limit = 50000
//! "#).unwrap();
//!
//! assert_eq!(config.weather.min_tide_level, 2.5);
//! assert_eq!(config.weather.max_wind_speed, 8.0);
//! assert_eq!(config.solver.strategy, StrategyType::ExhaustiveSearch);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(1)));
//! assert_eq!(config.node_limit(), Some(50_000));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use dockforge_config::EngineConfig;
//!
//! let config = EngineConfig::load("dockforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use dockforge_core::domain::{DEFAULT_MAX_WIND_SPEED, DEFAULT_MIN_TIDE_LEVEL};
use dockforge_core::OptimizationCriterion;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Default safety thresholds, used when a request carries none.
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Objective configuration.
    #[serde(default)]
    pub objective: ObjectiveConfig,

    /// Solver strategy selection.
    #[serde(default)]
    pub solver: SolverStrategyConfig,

    /// Search budget for the exhaustive solver.
    #[serde(default)]
    pub termination: TerminationConfig,

    /// Bounded heuristic tuning.
    #[serde(default)]
    pub heuristic: HeuristicConfig,
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the solver strategy.
    pub fn with_strategy(mut self, strategy: StrategyType) -> Self {
        self.solver.strategy = strategy;
        self
    }

    /// Sets the exhaustive search node budget.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.termination.node_count_limit = Some(nodes);
        self
    }

    /// Sets the exhaustive search wall-clock budget in milliseconds.
    pub fn with_time_limit_millis(mut self, millis: u64) -> Self {
        self.termination.seconds_spent_limit = None;
        self.termination.millis_spent_limit = Some(millis);
        self
    }

    /// Removes the wall-clock budget so only the node budget stops the
    /// exhaustive search.
    pub fn without_time_limit(mut self) -> Self {
        self.termination.seconds_spent_limit = None;
        self.termination.millis_spent_limit = None;
        self
    }

    /// Sets the heuristic random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.heuristic.random_seed = seed;
        self
    }

    /// Sets the criterion used when a request names none.
    pub fn with_default_criterion(mut self, criterion: OptimizationCriterion) -> Self {
        self.objective.default_criterion = criterion;
        self
    }

    /// Sets the default weather thresholds.
    pub fn with_weather_thresholds(mut self, min_tide_level: f64, max_wind_speed: f64) -> Self {
        self.weather = WeatherConfig {
            min_tide_level,
            max_wind_speed,
        };
        self
    }

    /// Returns the exhaustive search time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.time_limit()
    }

    /// Returns the exhaustive search node limit, if configured.
    pub fn node_limit(&self) -> Option<u64> {
        self.termination.node_count_limit
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("weather.min_tide_level", self.weather.min_tide_level),
            ("weather.max_wind_speed", self.weather.max_wind_speed),
            (
                "objective.balanced_utilization_weight",
                self.objective.balanced_utilization_weight,
            ),
            ("heuristic.ruin_fraction", self.heuristic.ruin_fraction),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if self.objective.balanced_utilization_weight < 0.0 {
            return Err(ConfigError::Invalid(
                "objective.balanced_utilization_weight must not be negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.heuristic.ruin_fraction) {
            return Err(ConfigError::Invalid(
                "heuristic.ruin_fraction must lie in [0, 1]".into(),
            ));
        }
        if self.termination.node_count_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "termination.node_count_limit must be positive".into(),
            ));
        }
        if self.time_limit() == Some(Duration::ZERO) {
            return Err(ConfigError::Invalid(
                "termination time limit must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Default weather safety thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct WeatherConfig {
    /// Minimum tide level in meters.
    pub min_tide_level: f64,

    /// Maximum wind speed in knots.
    pub max_wind_speed: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            min_tide_level: DEFAULT_MIN_TIDE_LEVEL,
            max_wind_speed: DEFAULT_MAX_WIND_SPEED,
        }
    }
}

/// Objective configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ObjectiveConfig {
    /// Criterion applied when the request does not name one.
    pub default_criterion: OptimizationCriterion,

    /// Weight of the utilization term subtracted by the balanced criterion.
    pub balanced_utilization_weight: f64,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        Self {
            default_criterion: OptimizationCriterion::Balanced,
            balanced_utilization_weight: 0.5,
        }
    }
}

/// Solver strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverStrategyConfig {
    /// Which solver to run.
    pub strategy: StrategyType,

    /// With `auto`, the exhaustive search runs when the number of eligible
    /// (ship, dock) pairs does not exceed this limit.
    pub exact_pair_limit: usize,
}

impl Default for SolverStrategyConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyType::Auto,
            exact_pair_limit: 400,
        }
    }
}

/// Solver strategy types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// Exhaustive search for small instances, heuristic otherwise.
    #[default]
    Auto,

    /// Branch and bound with a node/time budget.
    ExhaustiveSearch,

    /// Greedy construction with local-search repair.
    BoundedHeuristic,
}

/// Termination configuration for the exhaustive search.
///
/// The node budget is deterministic: the same request stops at the same
/// node on every host. The wall-clock budget is a safety cap; when it fires
/// first, the returned incumbent depends on machine speed. Use
/// [`EngineConfig::without_time_limit`] when results must be reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend searching. Overrides `millis_spent_limit`.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend searching.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of search nodes to explore.
    pub node_count_limit: Option<u64>,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            seconds_spent_limit: None,
            millis_spent_limit: Some(2_000),
            node_count_limit: Some(200_000),
        }
    }
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        match (self.seconds_spent_limit, self.millis_spent_limit) {
            (Some(seconds), _) => Some(Duration::from_secs(seconds)),
            (None, Some(millis)) => Some(Duration::from_millis(millis)),
            (None, None) => None,
        }
    }

    /// A budget with no limits at all.
    pub fn unlimited() -> Self {
        Self {
            seconds_spent_limit: None,
            millis_spent_limit: None,
            node_count_limit: None,
        }
    }
}

/// Bounded heuristic configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct HeuristicConfig {
    /// Seed for the ruin-and-recreate perturbations.
    pub random_seed: u64,

    /// Number of ruin-and-recreate rounds after the first local optimum.
    pub ruin_iterations: u32,

    /// Share of assigned ships released by each ruin round.
    pub ruin_fraction: f64,

    /// Maximum number of improving moves applied by local search per round.
    pub local_search_step_limit: u64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            random_seed: 0,
            ruin_iterations: 50,
            ruin_fraction: 0.3,
            local_search_step_limit: 10_000,
        }
    }
}
