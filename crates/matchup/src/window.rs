//! Edge-aware neighbourhood windows and the location quality flag.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

use crate::locate::PixelLocation;

/// Half-open rectangular sub-region `[row_min, row_max) x [col_min, col_max)`.
///
/// Bounds always lie inside the swath: near an edge the window is clamped,
/// never wrapped or padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridWindow {
    pub row_min: usize,
    pub row_max: usize,
    pub col_min: usize,
    pub col_max: usize,
}

impl GridWindow {
    pub fn rows(&self) -> Range<usize> {
        self.row_min..self.row_max
    }

    pub fn cols(&self) -> Range<usize> {
        self.col_min..self.col_max
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        (self.row_max - self.row_min) * (self.col_max - self.col_min)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for GridWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{})x[{},{})",
            self.row_min, self.row_max, self.col_min, self.col_max
        )
    }
}

/// Where the nearest pixel sits relative to the swath edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Placement {
    /// A full window fits around the pixel.
    Interior,
    /// The pixel is closer than the window radius to at least one edge.
    Edge,
}

/// Build the statistics window around `pixel` for a swath of `(rows, cols)`.
pub fn window_around(
    pixel: &PixelLocation,
    (rows, cols): (usize, usize),
    radius: usize,
) -> (GridWindow, Placement) {
    let (row, col) = (pixel.row, pixel.col);
    let interior = row >= radius && row + radius < rows && col >= radius && col + radius < cols;

    if interior {
        let window = GridWindow {
            row_min: row - radius,
            row_max: row + radius + 1,
            col_min: col - radius,
            col_max: col + radius + 1,
        };
        return (window, Placement::Interior);
    }

    // Each side is clamped independently.
    let window = GridWindow {
        row_min: row.saturating_sub(radius),
        row_max: (row + radius + 1).min(rows),
        col_min: col.saturating_sub(radius),
        col_max: (col + radius + 1).min(cols),
    };
    (window, Placement::Edge)
}

/// Per-matchup classification of distance and edge quality.
///
/// | value | meaning |
/// |---|---|
/// | 0 | interior pixel within the distance threshold |
/// | 1 | interior pixel beyond the distance threshold |
/// | 2 | edge pixel within the distance threshold |
/// | 3 | edge pixel beyond the distance threshold |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocationFlag {
    Nominal,
    BeyondDistance,
    Edge,
    EdgeBeyondDistance,
}

impl LocationFlag {
    /// Classify a nearest pixel. Edge placement is tested first; exceeding
    /// the distance threshold then raises an edge classification to 3.
    pub fn classify(distance_km: f64, max_distance_km: f64, placement: Placement) -> Self {
        let beyond = distance_km > max_distance_km;
        match (placement, beyond) {
            (Placement::Edge, true) => LocationFlag::EdgeBeyondDistance,
            (Placement::Edge, false) => LocationFlag::Edge,
            (Placement::Interior, true) => LocationFlag::BeyondDistance,
            (Placement::Interior, false) => LocationFlag::Nominal,
        }
    }

    /// Integer code written to output records.
    pub fn code(&self) -> u8 {
        match self {
            LocationFlag::Nominal => 0,
            LocationFlag::BeyondDistance => 1,
            LocationFlag::Edge => 2,
            LocationFlag::EdgeBeyondDistance => 3,
        }
    }
}
