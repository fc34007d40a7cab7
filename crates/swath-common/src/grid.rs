//! Row-major 2-D grids of swath samples.
//!
//! A cell is either a finite value or invalid. Invalid cells are stored as
//! NaN (the same convention the loaders use for `_FillValue`), but callers
//! should test validity with [`is_valid`] instead of comparing against NaN.

use std::ops::Range;

use crate::error::{SwathError, SwathResult};

/// Whether a stored sample is usable.
#[inline]
pub fn is_valid(value: f64) -> bool {
    value.is_finite()
}

/// A dense 2-D array in row-major order (`data[row * cols + col]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid2D {
    /// Create a grid from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> SwathResult<Self> {
        if data.len() != rows * cols {
            return Err(SwathError::InvalidFormat(format!(
                "grid of {}x{} needs {} values, got {}",
                rows,
                cols,
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Create a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get the 1D array index for a 2D grid position.
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Convert a flat index back to `(row, col)`.
    pub fn unravel(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Cell value, `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[self.flat_index(row, col)])
    }

    /// Mutable cell access, `None` when out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let idx = self.flat_index(row, col);
        self.data.get_mut(idx)
    }

    /// Cells of the half-open sub-region `rows x cols`, in row-major order.
    ///
    /// Ranges are clipped to the grid, so an out-of-range request yields
    /// fewer (possibly zero) cells rather than panicking.
    pub fn window(&self, rows: Range<usize>, cols: Range<usize>) -> Vec<f64> {
        let row_end = rows.end.min(self.rows);
        let col_end = cols.end.min(self.cols);
        let mut out = Vec::new();
        for row in rows.start.min(row_end)..row_end {
            let base = row * self.cols;
            let start = cols.start.min(col_end);
            out.extend_from_slice(&self.data[base + start..base + col_end]);
        }
        out
    }
}
