//! Configuration for the matchup core.

use serde::{Deserialize, Serialize};

/// Thresholds and constants used by a matchup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchupConfig {
    /// Matchups whose nearest pixel is farther than this are rejected.
    pub max_distance_km: f64,

    /// Half-width of the statistics window (2 gives 5x5).
    pub window_radius: usize,

    /// A variable is flagged as majority-invalid when at least this fraction
    /// of its window is invalid.
    pub majority_invalid_fraction: f64,

    /// Multiplier applied to the window standard deviation when building the
    /// outlier filter bounds.
    pub outlier_stdev_multiplier: f64,

    /// Sphere radius used by the haversine distance.
    pub earth_radius_km: f64,

    /// Bit-flag variable excluded from statistics.
    pub flag_variable: String,
}

impl Default for MatchupConfig {
    fn default() -> Self {
        Self {
            max_distance_km: 1.0,
            window_radius: 2,
            majority_invalid_fraction: 0.5,
            outlier_stdev_multiplier: 1.5,
            earth_radius_km: 6367.0,
            flag_variable: "l2_flags".to_string(),
        }
    }
}

impl MatchupConfig {
    /// Load configuration from environment variables on top of the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("MATCHUP_MAX_DISTANCE_KM") {
            if let Ok(km) = val.parse() {
                config.max_distance_km = km;
            }
        }

        if let Ok(val) = std::env::var("MATCHUP_WINDOW_RADIUS") {
            if let Ok(radius) = val.parse() {
                config.window_radius = radius;
            }
        }

        if let Ok(val) = std::env::var("MATCHUP_MAJORITY_INVALID_FRACTION") {
            if let Ok(fraction) = val.parse() {
                config.majority_invalid_fraction = fraction;
            }
        }

        if let Ok(val) = std::env::var("MATCHUP_OUTLIER_STDEV_MULTIPLIER") {
            if let Ok(multiplier) = val.parse() {
                config.outlier_stdev_multiplier = multiplier;
            }
        }

        if let Ok(val) = std::env::var("MATCHUP_EARTH_RADIUS_KM") {
            if let Ok(radius) = val.parse() {
                config.earth_radius_km = radius;
            }
        }

        if let Ok(val) = std::env::var("MATCHUP_FLAG_VARIABLE") {
            config.flag_variable = val;
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.max_distance_km > 0.0) {
            return Err("max_distance_km must be > 0".to_string());
        }

        if !(self.earth_radius_km > 0.0) {
            return Err("earth_radius_km must be > 0".to_string());
        }

        if !(self.majority_invalid_fraction > 0.0 && self.majority_invalid_fraction <= 1.0) {
            return Err("majority_invalid_fraction must be in (0, 1]".to_string());
        }

        if !(self.outlier_stdev_multiplier >= 0.0) {
            return Err("outlier_stdev_multiplier must be >= 0".to_string());
        }

        if self.flag_variable.is_empty() {
            return Err("flag_variable must not be empty".to_string());
        }

        Ok(())
    }
}
