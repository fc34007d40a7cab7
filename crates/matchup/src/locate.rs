//! Nearest valid pixel search over a distance field.

use serde::Serialize;
use swath_common::grid::is_valid;

use crate::distance::DistanceField;

/// The swath pixel closest to a field point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelLocation {
    pub row: usize,
    pub col: usize,
    /// Row-major flat index (`row * cols + col`)
    pub index: usize,
    /// Distance from the field point, km
    pub distance_km: f64,
}

/// Find the minimum valid distance.
///
/// Returns `None` when every entry is invalid, which callers must treat as
/// "navigation entirely invalid" rather than as a numeric result. Ties
/// resolve to the first pixel in row-major order.
pub fn nearest_pixel(field: &DistanceField) -> Option<PixelLocation> {
    let grid = field.grid();
    let (index, distance_km) = grid
        .as_slice()
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, d)| is_valid(*d))
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })?;

    let (row, col) = grid.unravel(index);
    Some(PixelLocation {
        row,
        col,
        index,
        distance_km,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use swath_common::{Grid2D, Navigation};

    fn field_from(lat: Grid2D, lon: Grid2D, point: (f64, f64)) -> DistanceField {
        DistanceField::compute(point.0, point.1, &Navigation::new(lat, lon).unwrap(), 6367.0)
    }

    #[test]
    fn test_finds_nearest() {
        let lat = Grid2D::from_fn(10, 8, |r, _| 40.0 + r as f64 * 0.01);
        let lon = Grid2D::from_fn(10, 8, |_, c| -70.0 + c as f64 * 0.01);
        let field = field_from(lat, lon, (40.0601, -69.9499));

        let pixel = nearest_pixel(&field).expect("valid navigation");
        assert_eq!((pixel.row, pixel.col), (6, 5));
        assert_eq!(pixel.index, 6 * 8 + 5);
        assert!(pixel.distance_km < 0.1);
    }

    #[test]
    fn test_skips_invalid_cells() {
        let mut lat = Grid2D::from_fn(3, 3, |r, _| r as f64 * 0.01);
        let lon = Grid2D::from_fn(3, 3, |_, c| c as f64 * 0.01);
        *lat.get_mut(0, 0).unwrap() = f64::NAN;
        let field = field_from(lat, lon, (0.0, 0.0));

        let pixel = nearest_pixel(&field).unwrap();
        assert_ne!((pixel.row, pixel.col), (0, 0));
        assert!(pixel.distance_km.is_finite());
    }

    #[test]
    fn test_all_invalid_is_none() {
        let lat = Grid2D::filled(4, 4, f64::NAN);
        let lon = Grid2D::filled(4, 4, f64::NAN);
        let field = field_from(lat, lon, (10.0, 10.0));
        assert!(nearest_pixel(&field).is_none());
    }

    #[test]
    fn test_ties_resolve_to_first() {
        let lat = Grid2D::filled(2, 2, 5.0);
        let lon = Grid2D::filled(2, 2, 5.0);
        let field = field_from(lat, lon, (5.0, 5.0));
        let pixel = nearest_pixel(&field).unwrap();
        assert_eq!(pixel.index, 0);
    }
}
