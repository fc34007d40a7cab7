//! Window statistics for geophysical variables.
//!
//! Every reduction ignores invalid cells and returns `None` when nothing
//! valid is left, so "no data" can never be confused with a real zero.
//! Standard deviations are population (divide by `n`) deviations.

use serde::Serialize;
use swath_common::grid::is_valid;
use swath_common::GeophysicalVariable;
use tracing::debug;

use crate::config::MatchupConfig;
use crate::window::GridWindow;

/// Mean of the valid values.
pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, n) = values
        .iter()
        .filter(|v| is_valid(**v))
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// Population standard deviation of the valid values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let (sum_sq, n) = values
        .iter()
        .filter(|v| is_valid(**v))
        .fold((0.0, 0usize), |(acc, n), v| (acc + (v - m).powi(2), n + 1));
    Some((sum_sq / n as f64).sqrt())
}

/// Median of the valid values; the mean of the two middle values when the
/// count is even.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut valid: Vec<f64> = values.iter().copied().filter(|v| is_valid(*v)).collect();
    if valid.is_empty() {
        return None;
    }
    valid.sort_by(|a, b| a.total_cmp(b));
    let mid = valid.len() / 2;
    if valid.len() % 2 == 0 {
        Some((valid[mid - 1] + valid[mid]) / 2.0)
    } else {
        Some(valid[mid])
    }
}

/// Per-variable data quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariableFlag {
    /// Fewer than the majority threshold of cells are invalid.
    Usable,
    /// Every cell in the window is invalid.
    AllInvalid,
    /// At least the majority threshold of cells is invalid.
    MajorityInvalid,
}

impl VariableFlag {
    pub fn classify(invalid: usize, window_size: usize, majority_fraction: f64) -> Self {
        if invalid == window_size {
            VariableFlag::AllInvalid
        } else if invalid as f64 >= window_size as f64 * majority_fraction {
            VariableFlag::MajorityInvalid
        } else {
            VariableFlag::Usable
        }
    }

    /// Integer code written to output records.
    pub fn code(&self) -> u8 {
        match self {
            VariableFlag::Usable => 0,
            VariableFlag::AllInvalid => 1,
            VariableFlag::MajorityInvalid => 2,
        }
    }
}

/// Keep the valid values strictly inside
/// `(k*stdev - mean, k*stdev + mean)`.
///
/// The bounds come from the unfiltered window statistics. Note that the
/// lower bound is `k*stdev - mean`, not `mean - k*stdev`; outputs depend on
/// this exact form.
pub fn outlier_filter(cells: &[f64], mean: Option<f64>, stdev: Option<f64>, k: f64) -> Vec<f64> {
    let (Some(mean), Some(stdev)) = (mean, stdev) else {
        return Vec::new();
    };
    let lower_bound = k * stdev - mean;
    let upper_bound = k * stdev + mean;

    cells
        .iter()
        .copied()
        .filter(|v| is_valid(*v))
        .filter(|v| lower_bound < *v && *v < upper_bound)
        .collect()
}

/// Statistics of one variable over one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableStats {
    pub name: String,
    pub mean: Option<f64>,
    pub stdev: Option<f64>,
    pub median: Option<f64>,
    pub filtered_mean: Option<f64>,
    pub filtered_stdev: Option<f64>,
    pub grid_size: usize,
    pub valid_pixel_count: usize,
    pub filtered_pixel_count: usize,
    pub flag: VariableFlag,
}

impl VariableStats {
    /// Compute raw and outlier-filtered statistics for `variable` inside
    /// `window`.
    pub fn compute(
        variable: &GeophysicalVariable,
        window: &GridWindow,
        config: &MatchupConfig,
    ) -> Self {
        let cells = variable.grid.window(window.rows(), window.cols());
        let grid_size = cells.len();
        let invalid = cells.iter().filter(|v| !is_valid(**v)).count();
        let flag = VariableFlag::classify(invalid, grid_size, config.majority_invalid_fraction);

        let (mean, stdev, median) = match flag {
            VariableFlag::AllInvalid => (None, None, None),
            _ => (self::mean(&cells), std_dev(&cells), self::median(&cells)),
        };

        let kept = outlier_filter(&cells, mean, stdev, config.outlier_stdev_multiplier);

        let stats = Self {
            name: variable.name.clone(),
            mean,
            stdev,
            median,
            filtered_mean: self::mean(&kept),
            filtered_stdev: std_dev(&kept),
            grid_size,
            valid_pixel_count: grid_size - invalid,
            filtered_pixel_count: kept.len(),
            flag,
        };

        debug!(
            variable = %stats.name,
            grid_size,
            valid = stats.valid_pixel_count,
            filtered = stats.filtered_pixel_count,
            flag = flag.code(),
            "Computed window statistics"
        );

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swath_common::Grid2D;

    const NAN: f64 = f64::NAN;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn test_reductions_ignore_invalid() {
        let values = [1.0, NAN, 3.0, f64::INFINITY, 5.0];
        assert!(approx(mean(&values), 3.0));
        assert!(approx(median(&values), 3.0));
        assert!(approx(std_dev(&values), (8.0f64 / 3.0).sqrt()));
    }

    #[test]
    fn test_reductions_distinguish_empty_from_zero() {
        assert_eq!(mean(&[NAN, NAN]), None);
        assert_eq!(std_dev(&[]), None);
        assert_eq!(median(&[NAN]), None);
        assert_eq!(mean(&[0.0, NAN]), Some(0.0));
        assert_eq!(std_dev(&[4.0]), Some(0.0));
    }

    #[test]
    fn test_median_even_count() {
        assert!(approx(median(&[4.0, 1.0, 3.0, 2.0]), 2.5));
    }

    #[test]
    fn test_variable_flag() {
        assert_eq!(VariableFlag::classify(25, 25, 0.5), VariableFlag::AllInvalid);
        assert_eq!(VariableFlag::classify(13, 25, 0.5), VariableFlag::MajorityInvalid);
        assert_eq!(VariableFlag::classify(12, 25, 0.5), VariableFlag::Usable);
        assert_eq!(VariableFlag::classify(8, 16, 0.5), VariableFlag::MajorityInvalid);
        assert_eq!(VariableFlag::classify(0, 25, 0.5).code(), 0);
    }

    #[test]
    fn test_outlier_filter_rejects_everything_for_skewed_window() {
        // mean 22, stdev ~39.01: bounds ~(36.5, 80.5) contain none of the values
        let cells = [1.0, 2.0, NAN, 3.0, 4.0, 100.0];
        let m = mean(&cells);
        let s = std_dev(&cells);
        assert!(approx(m, 22.0));
        let kept = outlier_filter(&cells, m, s, 1.5);
        assert!(kept.is_empty());
        assert_eq!(mean(&kept), None);
        assert_eq!(std_dev(&kept), None);
    }

    #[test]
    fn test_outlier_filter_drops_high_value() {
        // mean 14, stdev 8: bounds (-2, 26)
        let cells = [10.0, 10.0, 10.0, 10.0, 30.0];
        let kept = outlier_filter(&cells, mean(&cells), std_dev(&cells), 1.5);
        assert_eq!(kept, vec![10.0; 4]);
    }

    #[test]
    fn test_outlier_filter_without_stats() {
        assert!(outlier_filter(&[1.0, 2.0], None, None, 1.5).is_empty());
    }

    fn window_5x5() -> GridWindow {
        GridWindow {
            row_min: 0,
            row_max: 5,
            col_min: 0,
            col_max: 5,
        }
    }

    #[test]
    fn test_all_invalid_window() {
        let var = GeophysicalVariable::new("chlor_a", Grid2D::filled(5, 5, NAN));
        let stats = VariableStats::compute(&var, &window_5x5(), &MatchupConfig::default());
        assert_eq!(stats.flag, VariableFlag::AllInvalid);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.stdev, None);
        assert_eq!(stats.median, None);
        assert_eq!(stats.filtered_mean, None);
        assert_eq!(stats.valid_pixel_count, 0);
        assert_eq!(stats.filtered_pixel_count, 0);
        assert_eq!(stats.grid_size, 25);
    }

    #[test]
    fn test_half_invalid_window() {
        // 4x4 window, left half invalid, right half 2.0
        let grid = Grid2D::from_fn(4, 4, |_, c| if c < 2 { NAN } else { 2.0 });
        let var = GeophysicalVariable::new("Rrs_443", grid);
        let window = GridWindow {
            row_min: 0,
            row_max: 4,
            col_min: 0,
            col_max: 4,
        };
        let stats = VariableStats::compute(&var, &window, &MatchupConfig::default());
        assert_eq!(stats.flag, VariableFlag::MajorityInvalid);
        assert_eq!(stats.grid_size, 16);
        assert_eq!(stats.valid_pixel_count, 8);
        assert!(approx(stats.mean, 2.0));
        assert!(approx(stats.stdev, 0.0));
        assert!(approx(stats.median, 2.0));
        // bounds (0 - 2, 0 + 2) exclude 2.0 itself
        assert_eq!(stats.filtered_pixel_count, 0);
    }

    #[test]
    fn test_window_slice_is_used() {
        let grid = Grid2D::from_fn(10, 10, |r, c| if r < 5 && c < 5 { 1.0 } else { 100.0 });
        let var = GeophysicalVariable::new("sst", grid);
        let stats = VariableStats::compute(&var, &window_5x5(), &MatchupConfig::default());
        assert_eq!(stats.flag, VariableFlag::Usable);
        assert!(approx(stats.mean, 1.0));
        assert_eq!(stats.valid_pixel_count, 25);
    }
}
