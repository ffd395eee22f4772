//! Weather reading with its safety thresholds.

/// Default minimum tide level, in meters.
pub const DEFAULT_MIN_TIDE_LEVEL: f64 = 3.0;

/// Default maximum wind speed, in knots.
pub const DEFAULT_MAX_WIND_SPEED: f64 = 8.0;

/// Current conditions plus the thresholds they are judged against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherSnapshot {
    pub tide_current: f64,
    pub wind_speed: f64,
    pub min_tide_level: f64,
    pub max_wind_speed: f64,
}

impl WeatherSnapshot {
    /// Creates a snapshot with the default thresholds.
    pub fn new(tide_current: f64, wind_speed: f64) -> Self {
        Self {
            tide_current,
            wind_speed,
            min_tide_level: DEFAULT_MIN_TIDE_LEVEL,
            max_wind_speed: DEFAULT_MAX_WIND_SPEED,
        }
    }

    pub fn with_thresholds(mut self, min_tide_level: f64, max_wind_speed: f64) -> Self {
        self.min_tide_level = min_tide_level;
        self.max_wind_speed = max_wind_speed;
        self
    }

    #[inline]
    pub fn tide_too_low(&self) -> bool {
        self.tide_current < self.min_tide_level
    }

    #[inline]
    pub fn wind_too_strong(&self) -> bool {
        self.wind_speed > self.max_wind_speed
    }
}
