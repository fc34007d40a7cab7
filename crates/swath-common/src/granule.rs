//! Granule identifiers and their on-disk layout.
//!
//! Level-2 granules are named `<S><YYYY><DDD><HHMMSS>`, where `S` is a
//! single-letter satellite code, e.g. `A2019123174500` for an Aqua pass on
//! day 123 of 2019. Files live under
//! `<satellite dir>/<YYYY>/<DDD>/<granule>.<ext>`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::error::{SwathError, SwathResult};

/// Satellite code to subdirectory lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SatelliteDirs(BTreeMap<String, String>);

impl Default for SatelliteDirs {
    fn default() -> Self {
        let mut dirs = BTreeMap::new();
        dirs.insert("S".to_string(), "seawifs".to_string());
        dirs.insert("A".to_string(), "aqua".to_string());
        dirs.insert("T".to_string(), "terra".to_string());
        dirs.insert("V".to_string(), "viirs".to_string());
        Self(dirs)
    }
}

impl SatelliteDirs {
    /// Subdirectory for a satellite code.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    pub fn insert(&mut self, code: impl Into<String>, dir: impl Into<String>) {
        self.0.insert(code.into(), dir.into());
    }
}

/// A parsed granule identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GranuleId {
    raw: String,
    satellite_code: String,
    date: NaiveDate,
}

impl GranuleId {
    /// Parse an identifier such as `A2019123174500`.
    pub fn parse(raw: &str) -> SwathResult<Self> {
        let raw = raw.trim();
        if !raw.is_ascii() || raw.len() < 8 {
            return Err(SwathError::invalid_granule(
                raw,
                "expected <satellite code><YYYY><DDD>...",
            ));
        }

        let satellite_code = raw[0..1].to_string();
        let year: i32 = raw[1..5]
            .parse()
            .map_err(|_| SwathError::invalid_granule(raw, "year is not numeric"))?;
        let day_of_year: u32 = raw[5..8]
            .parse()
            .map_err(|_| SwathError::invalid_granule(raw, "day of year is not numeric"))?;

        let date = NaiveDate::from_yo_opt(year, day_of_year).ok_or_else(|| {
            SwathError::invalid_granule(
                raw,
                format!("day {} does not exist in {}", day_of_year, year),
            )
        })?;

        Ok(Self {
            raw: raw.to_string(),
            satellite_code,
            date,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn satellite_code(&self) -> &str {
        &self.satellite_code
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn day_of_year(&self) -> u32 {
        self.date.ordinal()
    }

    /// Acquisition date encoded in the identifier.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Path of the granule file relative to the satellite root directory.
    pub fn relative_path(&self, dirs: &SatelliteDirs, extension: &str) -> SwathResult<PathBuf> {
        let sat_dir = dirs.get(&self.satellite_code).ok_or_else(|| {
            SwathError::invalid_granule(
                &self.raw,
                format!("unknown satellite code '{}'", self.satellite_code),
            )
        })?;

        Ok(PathBuf::from(sat_dir)
            .join(format!("{:04}", self.year()))
            .join(format!("{:03}", self.day_of_year()))
            .join(format!("{}.{}", self.raw, extension)))
    }
}

impl fmt::Display for GranuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aqua_granule() {
        let id = GranuleId::parse("A2019123174500").unwrap();
        assert_eq!(id.satellite_code(), "A");
        assert_eq!(id.year(), 2019);
        assert_eq!(id.day_of_year(), 123);
        assert_eq!(id.date(), NaiveDate::from_ymd_opt(2019, 5, 3).unwrap());
    }

    #[test]
    fn test_relative_path() {
        let id = GranuleId::parse("T2020005101500").unwrap();
        let path = id.relative_path(&SatelliteDirs::default(), "L2").unwrap();
        assert_eq!(path, PathBuf::from("terra/2020/005/T2020005101500.L2"));
    }

    #[test]
    fn test_unknown_satellite_code() {
        let id = GranuleId::parse("X2020005101500").unwrap();
        let err = id.relative_path(&SatelliteDirs::default(), "L2").unwrap_err();
        assert!(err.to_string().contains("unknown satellite code"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(GranuleId::parse("A20").is_err());
        assert!(GranuleId::parse("Axxxx123").is_err());
        assert!(GranuleId::parse("A2019abc").is_err());
        // 2019 is not a leap year
        assert!(GranuleId::parse("A2019366000000").is_err());
        assert!(GranuleId::parse("A2020366000000").is_ok());
    }

    #[test]
    fn test_custom_dirs() {
        let mut dirs = SatelliteDirs::default();
        dirs.insert("V", "viirs_snpp");
        let id = GranuleId::parse("V2018200000000").unwrap();
        let path = id.relative_path(&dirs, "nc").unwrap();
        assert!(path.starts_with("viirs_snpp"));
        assert!(path.to_string_lossy().ends_with("V2018200000000.nc"));
    }
}
