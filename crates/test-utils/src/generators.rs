//! Synthetic swath generators.
//!
//! Swaths are laid out on a regular latitude/longitude lattice so that
//! distances between a field point and any pixel are easy to reason about:
//! rows step north, columns step east, and a point displaced purely in
//! latitude from a pixel lies exactly `offset_km` away from it.

use swath_common::{GeophysicalVariable, Grid2D, Navigation, Swath};

/// Sphere radius used by the generators, matching the matchup default.
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// Degrees of latitude spanned by `km` kilometres.
pub fn km_to_lat_degrees(km: f64) -> f64 {
    (km / EARTH_RADIUS_KM).to_degrees()
}

/// Layout of a synthetic swath.
#[derive(Debug, Clone, Copy)]
pub struct SwathSpec {
    pub rows: usize,
    pub cols: usize,
    /// Latitude of pixel (0, 0)
    pub origin_lat: f64,
    /// Longitude of pixel (0, 0)
    pub origin_lon: f64,
    /// Approximate distance between neighbouring pixels
    pub spacing_km: f64,
}

impl SwathSpec {
    pub fn new(rows: usize, cols: usize, spacing_km: f64) -> Self {
        Self {
            rows,
            cols,
            origin_lat: 43.0,
            origin_lon: -70.0,
            spacing_km,
        }
    }

    pub fn with_origin(mut self, lat: f64, lon: f64) -> Self {
        self.origin_lat = lat;
        self.origin_lon = lon;
        self
    }

    fn lat_step(&self) -> f64 {
        km_to_lat_degrees(self.spacing_km)
    }

    fn lon_step(&self) -> f64 {
        self.lat_step() / self.origin_lat.to_radians().cos()
    }

    /// Latitude and longitude of pixel `(row, col)`.
    pub fn pixel_position(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.origin_lat + row as f64 * self.lat_step(),
            self.origin_lon + col as f64 * self.lon_step(),
        )
    }

    /// A point exactly `offset_km` north of pixel `(row, col)`.
    ///
    /// Negative offsets go south.
    pub fn point_north_of(&self, row: usize, col: usize, offset_km: f64) -> (f64, f64) {
        let (lat, lon) = self.pixel_position(row, col);
        (lat + km_to_lat_degrees(offset_km), lon)
    }

    pub fn navigation(&self) -> Navigation {
        let lat = Grid2D::from_fn(self.rows, self.cols, |r, c| self.pixel_position(r, c).0);
        let lon = Grid2D::from_fn(self.rows, self.cols, |r, c| self.pixel_position(r, c).1);
        Navigation::new(lat, lon).expect("generated grids share one shape")
    }
}

/// Creates a grid whose cell value is `row * 1000 + col`.
///
/// This makes it easy to check which cells a window covered.
pub fn create_index_grid(rows: usize, cols: usize) -> Grid2D {
    Grid2D::from_fn(rows, cols, |r, c| (r * 1000 + c) as f64)
}

/// Creates a smooth chlorophyll-like field in mg m^-3.
pub fn create_chlorophyll_grid(rows: usize, cols: usize) -> Grid2D {
    Grid2D::from_fn(rows, cols, |r, c| {
        let x = c as f64 / cols.max(1) as f64;
        let y = r as f64 / rows.max(1) as f64;
        0.2 + 2.0 * x * y
    })
}

/// Replaces every cell where `mask(row, col)` is true with NaN.
pub fn mask_grid(grid: &Grid2D, mask: impl Fn(usize, usize) -> bool) -> Grid2D {
    Grid2D::from_fn(grid.rows(), grid.cols(), |r, c| {
        if mask(r, c) {
            f64::NAN
        } else {
            grid.get(r, c).unwrap_or(f64::NAN)
        }
    })
}

/// Creates a swath with `chlor_a`, `Rrs_443` and an all-zero `l2_flags`.
pub fn create_swath(granule: &str, spec: &SwathSpec) -> Swath {
    let variables = vec![
        GeophysicalVariable::new("chlor_a", create_chlorophyll_grid(spec.rows, spec.cols)),
        GeophysicalVariable::new("Rrs_443", create_index_grid(spec.rows, spec.cols)),
        GeophysicalVariable::new("l2_flags", Grid2D::filled(spec.rows, spec.cols, 0.0)),
    ];
    build_swath(granule, spec.navigation(), variables)
}

/// Creates a swath from explicit variables on the lattice of `spec`.
pub fn create_swath_with(granule: &str, spec: &SwathSpec, variables: Vec<GeophysicalVariable>) -> Swath {
    build_swath(granule, spec.navigation(), variables)
}

/// Creates a swath whose navigation is NaN everywhere.
pub fn create_unnavigable_swath(granule: &str, rows: usize, cols: usize) -> Swath {
    let nan = Grid2D::filled(rows, cols, f64::NAN);
    let navigation = Navigation::new(nan.clone(), nan).expect("generated grids share one shape");
    let variables = vec![GeophysicalVariable::new("chlor_a", create_chlorophyll_grid(rows, cols))];
    build_swath(granule, navigation, variables)
}

fn build_swath(granule: &str, navigation: Navigation, variables: Vec<GeophysicalVariable>) -> Swath {
    Swath::new(granule, navigation, variables).expect("generated grids share one shape")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_positions() {
        let spec = SwathSpec::new(10, 10, 1.0).with_origin(0.0, 0.0);
        let (lat, lon) = spec.pixel_position(1, 1);
        assert!((lat - km_to_lat_degrees(1.0)).abs() < 1e-12);
        // cos(0) = 1, so both steps match at the equator
        assert!((lon - lat).abs() < 1e-12);
    }

    #[test]
    fn test_create_swath_shapes() {
        let swath = create_swath("A2019123174500", &SwathSpec::new(20, 30, 1.0));
        assert_eq!(swath.shape(), (20, 30));
        assert_eq!(swath.variables().len(), 3);
        assert_eq!(swath.variable("Rrs_443").unwrap().grid.get(2, 3), Some(2003.0));
    }

    #[test]
    fn test_mask_grid() {
        let grid = create_index_grid(3, 3);
        let masked = mask_grid(&grid, |r, _| r == 1);
        assert!(masked.get(1, 2).unwrap().is_nan());
        assert_eq!(masked.get(2, 2), Some(2002.0));
    }

    #[test]
    fn test_unnavigable_swath() {
        let swath = create_unnavigable_swath("A2019123174500", 4, 4);
        assert!(swath.navigation().latitude().as_slice().iter().all(|v| v.is_nan()));
    }
}
