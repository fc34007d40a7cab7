//! NetCDF loader for Level-2 ocean colour swaths.
//!
//! Level-2 files carry two groups of interest:
//!
//! - `geophysical_data`: one 2-D variable per product (`chlor_a`, `Rrs_443`,
//!   ..., plus the `l2_flags` bit mask)
//! - `navigation_data`: 2-D `latitude` and `longitude`
//!
//! Packed integers are unpacked with `scale_factor`/`add_offset`, and cells
//! equal to `_FillValue` become invalid.
//!
//! # Example
//!
//! ```ignore
//! use swath_common::{SatelliteDirs, SwathSource};
//! use swath_reader::NetCdfSwathSource;
//!
//! let source = NetCdfSwathSource::new("/data/l2", SatelliteDirs::default());
//! let swath = source.load("A2019123174500")?;
//! ```

pub mod native;

use std::path::{Path, PathBuf};

use swath_common::{GranuleId, SatelliteDirs, Swath, SwathError, SwathResult, SwathSource};
use tracing::{debug, instrument};

pub use native::{read_swath, silence_hdf5_errors};

/// Group holding the geophysical product variables.
pub const GEOPHYSICAL_GROUP: &str = "geophysical_data";

/// Group holding the pixel geolocation.
pub const NAVIGATION_GROUP: &str = "navigation_data";

pub const LATITUDE_VARIABLE: &str = "latitude";
pub const LONGITUDE_VARIABLE: &str = "longitude";

/// Default extension of Level-2 granule files.
pub const DEFAULT_EXTENSION: &str = "L2";

/// Loads swaths from a directory tree laid out as
/// `<root>/<satellite dir>/<YYYY>/<DDD>/<granule>.<ext>`.
#[derive(Debug, Clone)]
pub struct NetCdfSwathSource {
    root: PathBuf,
    satellite_dirs: SatelliteDirs,
    extension: String,
}

impl NetCdfSwathSource {
    pub fn new(root: impl Into<PathBuf>, satellite_dirs: SatelliteDirs) -> Self {
        Self {
            root: root.into(),
            satellite_dirs,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use a different file extension (e.g. `nc`).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the absolute file path of a granule.
    pub fn granule_path(&self, granule: &str) -> SwathResult<PathBuf> {
        let id = GranuleId::parse(granule)?;
        Ok(self
            .root
            .join(id.relative_path(&self.satellite_dirs, &self.extension)?))
    }
}

impl SwathSource for NetCdfSwathSource {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self, granule: &str) -> SwathResult<Swath> {
        let path = self.granule_path(granule)?;
        if !path.is_file() {
            return Err(SwathError::NotFound(path));
        }
        debug!(path = %path.display(), "Opening swath file");
        read_swath(&path, granule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granule_path() {
        let source = NetCdfSwathSource::new("/data/l2", SatelliteDirs::default());
        let path = source.granule_path("A2019123174500").unwrap();
        assert_eq!(
            path,
            PathBuf::from("/data/l2/aqua/2019/123/A2019123174500.L2")
        );
    }

    #[test]
    fn test_with_extension() {
        let source =
            NetCdfSwathSource::new("/data", SatelliteDirs::default()).with_extension("nc");
        let path = source.granule_path("S2001001000000").unwrap();
        assert!(path.to_string_lossy().ends_with("seawifs/2001/001/S2001001000000.nc"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = NetCdfSwathSource::new(dir.path(), SatelliteDirs::default());
        let err = source.load("A2019123174500").unwrap_err();
        assert!(matches!(err, SwathError::NotFound(_)));
    }

    #[test]
    fn test_bad_granule_is_rejected_before_io() {
        let source = NetCdfSwathSource::new("/nonexistent", SatelliteDirs::default());
        let err = source.load("Q").unwrap_err();
        assert!(matches!(err, SwathError::InvalidGranule { .. }));
    }
}
