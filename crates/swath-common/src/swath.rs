//! In-memory representation of one satellite swath.

use crate::error::{SwathError, SwathResult};
use crate::grid::Grid2D;

/// Per-pixel geolocation of a swath.
///
/// Latitude and longitude always share one shape; the only constructor
/// checks it.
#[derive(Debug, Clone)]
pub struct Navigation {
    latitude: Grid2D,
    longitude: Grid2D,
}

impl Navigation {
    /// Pair latitude and longitude grids, which must share a shape.
    pub fn new(latitude: Grid2D, longitude: Grid2D) -> SwathResult<Self> {
        if latitude.shape() != longitude.shape() {
            return Err(SwathError::ShapeMismatch {
                name: "longitude".to_string(),
                expected: latitude.shape(),
                found: longitude.shape(),
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Pixel latitudes (decimal degrees)
    pub fn latitude(&self) -> &Grid2D {
        &self.latitude
    }

    /// Pixel longitudes (decimal degrees)
    pub fn longitude(&self) -> &Grid2D {
        &self.longitude
    }

    pub fn shape(&self) -> (usize, usize) {
        self.latitude.shape()
    }
}

/// A named geophysical product grid (e.g. `chlor_a`, `Rrs_443`).
#[derive(Debug, Clone)]
pub struct GeophysicalVariable {
    pub name: String,
    pub grid: Grid2D,
}

impl GeophysicalVariable {
    pub fn new(name: impl Into<String>, grid: Grid2D) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }
}

/// One granule's navigation plus its geophysical variables.
///
/// Variables keep the order in which the loader found them, so output
/// columns follow the file's own variable order.
#[derive(Debug, Clone)]
pub struct Swath {
    granule: String,
    navigation: Navigation,
    variables: Vec<GeophysicalVariable>,
}

impl Swath {
    /// Build a swath, checking every variable against the navigation shape.
    pub fn new(
        granule: impl Into<String>,
        navigation: Navigation,
        variables: Vec<GeophysicalVariable>,
    ) -> SwathResult<Self> {
        let expected = navigation.shape();
        for var in &variables {
            if var.grid.shape() != expected {
                return Err(SwathError::ShapeMismatch {
                    name: var.name.clone(),
                    expected,
                    found: var.grid.shape(),
                });
            }
        }
        Ok(Self {
            granule: granule.into(),
            navigation,
            variables,
        })
    }

    pub fn granule(&self) -> &str {
        &self.granule
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// `(rows, cols)` shared by every grid of the swath.
    pub fn shape(&self) -> (usize, usize) {
        self.navigation.shape()
    }

    pub fn variables(&self) -> &[GeophysicalVariable] {
        &self.variables
    }

    /// Look up a variable by name.
    pub fn variable(&self, name: &str) -> Option<&GeophysicalVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Variables that carry statistics, i.e. everything except the
    /// bit-flag variable named `flag_variable`.
    pub fn statistic_variables<'a>(
        &'a self,
        flag_variable: &'a str,
    ) -> impl Iterator<Item = &'a GeophysicalVariable> + 'a {
        self.variables.iter().filter(move |v| v.name != flag_variable)
    }
}
