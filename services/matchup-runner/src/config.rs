//! Runner configuration.

use anyhow::{Context, Result};
use matchup::MatchupConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use swath_common::SatelliteDirs;
use swath_reader::DEFAULT_EXTENSION;

/// Top-level runner configuration, usually read from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Matchup thresholds
    pub matchup: MatchupConfig,

    /// Field table column holding the sample identifier
    pub id_column: String,

    /// Field table column holding latitude (decimal degrees)
    pub latitude_column: String,

    /// Field table column holding longitude (decimal degrees)
    pub longitude_column: String,

    /// Satellite code to subdirectory table
    pub satellite_dirs: SatelliteDirs,

    /// Swath file extension
    pub extension: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            matchup: MatchupConfig::default(),
            id_column: "ID".to_string(),
            latitude_column: "Latitude_uw".to_string(),
            longitude_column: "Longitude_uw".to_string(),
            satellite_dirs: SatelliteDirs::default(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl RunnerConfig {
    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("invalid runner configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from defaults and `MATCHUP_*` environment
    /// variables when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let yaml = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::from_yaml_str(&yaml)
                    .with_context(|| format!("failed to load config {}", path.display()))
            }
            None => {
                let config = Self {
                    matchup: MatchupConfig::from_env(),
                    ..Self::default()
                };
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.matchup
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid matchup configuration: {}", e))?;

        for (name, value) in [
            ("id_column", &self.id_column),
            ("latitude_column", &self.latitude_column),
            ("longitude_column", &self.longitude_column),
            ("extension", &self.extension),
        ] {
            if value.is_empty() {
                anyhow::bail!("{} must not be empty", name);
            }
        }

        Ok(())
    }
}
