//! Output records for accepted matchups.

use crate::field::FieldPoint;
use crate::locate::PixelLocation;
use crate::stats::VariableStats;
use crate::window::{GridWindow, LocationFlag};

/// Suffixes of the per-variable output columns, in column order.
pub const VARIABLE_COLUMN_SUFFIXES: [&str; 9] = [
    "mean",
    "stdev",
    "median",
    "filtered_mean",
    "filtered_stdev",
    "grid_size",
    "valid_pixel_count",
    "filtered_pixel_count",
    "flag",
];

/// One accepted field point / granule pair.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub field: FieldPoint,
    pub pixel: PixelLocation,
    pub window: GridWindow,
    pub variables: Vec<VariableStats>,
    pub location_flag: LocationFlag,
}

impl OutputRecord {
    /// Column names, matching [`values`](Self::values) one to one.
    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = self.field.attributes.iter().map(|(k, _)| k.clone()).collect();
        headers.push("granid".to_string());
        headers.extend(["Pixel_row", "Pixel_col", "Pixel_idx"].map(String::from));
        for var in &self.variables {
            headers.extend(
                VARIABLE_COLUMN_SUFFIXES
                    .iter()
                    .map(|suffix| format!("{}_{}", var.name, suffix)),
            );
        }
        headers.push("Location_Flag".to_string());
        headers
    }

    /// Row values. Invalid statistics become empty cells.
    pub fn values(&self) -> Vec<String> {
        let mut values: Vec<String> = self.field.attributes.iter().map(|(_, v)| v.clone()).collect();
        values.push(self.field.granule.clone());
        values.push(self.pixel.row.to_string());
        values.push(self.pixel.col.to_string());
        values.push(self.pixel.index.to_string());
        for var in &self.variables {
            values.push(format_optional(var.mean));
            values.push(format_optional(var.stdev));
            values.push(format_optional(var.median));
            values.push(format_optional(var.filtered_mean));
            values.push(format_optional(var.filtered_stdev));
            values.push(var.grid_size.to_string());
            values.push(var.valid_pixel_count.to_string());
            values.push(var.filtered_pixel_count.to_string());
            values.push(var.flag.code().to_string());
        }
        values.push(self.location_flag.code().to_string());
        values
    }

    /// Statistics for one variable.
    pub fn variable(&self, name: &str) -> Option<&VariableStats> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// File name for the per-pair output: `<id>_<granule>.csv`.
    pub fn file_name(&self) -> String {
        format!("{}_{}.csv", self.field.id, self.field.granule)
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
