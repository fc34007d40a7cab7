//! Great-circle distance from a field point to every swath pixel.

use swath_common::{Grid2D, Navigation};

/// Haversine distance in kilometres on a sphere of `radius_km`.
///
/// Invalid inputs (NaN) propagate to an invalid distance.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius_km: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points. `f64::min`
    // would also replace NaN, so compare explicitly.
    let a = if a > 1.0 { 1.0 } else { a };
    let c = 2.0 * a.sqrt().asin();

    radius_km * c
}

/// Distances (km) from one point to every pixel of a swath.
#[derive(Debug, Clone)]
pub struct DistanceField {
    grid: Grid2D,
}

impl DistanceField {
    /// Compute the field for a point at (`latitude`, `longitude`).
    ///
    /// Pixels with invalid navigation get an invalid distance; a swath with
    /// entirely invalid navigation yields an entirely invalid field.
    pub fn compute(latitude: f64, longitude: f64, navigation: &Navigation, radius_km: f64) -> Self {
        let (lat_grid, lon_grid) = (navigation.latitude(), navigation.longitude());
        let (rows, cols) = navigation.shape();
        let grid = Grid2D::from_fn(rows, cols, |row, col| {
            let flat = lat_grid.flat_index(row, col);
            let lat2 = lat_grid.as_slice()[flat];
            let lon2 = lon_grid.as_slice()[flat];
            haversine_km(latitude, longitude, lat2, lon2, radius_km)
        });
        Self { grid }
    }

    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }
}
