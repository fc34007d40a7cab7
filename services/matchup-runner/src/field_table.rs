//! The in-situ field table.
//!
//! A CSV file with one row per field measurement. Columns without a name
//! (or with a `Unnamed: N` name, as left behind by an exported index) are
//! dropped; every other column is carried into the output record.

use anyhow::{bail, Context, Result};
use matchup::FieldPoint;
use std::collections::HashMap;
use std::path::Path;

use crate::config::RunnerConfig;

#[derive(Debug, Clone)]
pub struct FieldTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    id_index: usize,
    lat_index: usize,
    lon_index: usize,
    by_id: HashMap<String, Vec<usize>>,
}

fn is_unnamed(header: &str) -> bool {
    let header = header.trim();
    header.is_empty() || header.starts_with("Unnamed:")
}

impl FieldTable {
    pub fn from_path(path: &Path, config: &RunnerConfig) -> Result<Self> {
        let reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open field table {}", path.display()))?;
        Self::from_csv_reader(reader, config)
            .with_context(|| format!("failed to read field table {}", path.display()))
    }

    pub fn from_reader<R: std::io::Read>(reader: R, config: &RunnerConfig) -> Result<Self> {
        Self::from_csv_reader(csv::Reader::from_reader(reader), config)
    }

    fn from_csv_reader<R: std::io::Read>(
        mut reader: csv::Reader<R>,
        config: &RunnerConfig,
    ) -> Result<Self> {
        let raw_headers = reader.headers()?.clone();
        let kept: Vec<usize> = raw_headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !is_unnamed(h))
            .map(|(i, _)| i)
            .collect();
        let headers: Vec<String> = kept.iter().map(|&i| raw_headers[i].to_string()).collect();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .with_context(|| format!("field table has no column {:?}", name))
        };
        let id_index = column(&config.id_column)?;
        let lat_index = column(&config.latitude_column)?;
        let lon_index = column(&config.longitude_column)?;

        let mut rows = Vec::new();
        let mut by_id: HashMap<String, Vec<usize>> = HashMap::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("bad field table row {}", line + 1))?;
            let row: Vec<String> = kept
                .iter()
                .map(|&i| record.get(i).unwrap_or_default().to_string())
                .collect();
            by_id.entry(row[id_index].clone()).or_default().push(rows.len());
            rows.push(row);
        }

        Ok(Self {
            headers,
            rows,
            id_index,
            lat_index,
            lon_index,
            by_id,
        })
    }

    /// Kept column names, in table order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build the field point for sample `id` matched against `granule`.
    ///
    /// Exactly one row must carry `id`.
    pub fn field_point(&self, id: &str, granule: &str) -> Result<FieldPoint> {
        let row = match self.by_id.get(id).map(Vec::as_slice) {
            None | Some([]) => bail!("no field row with id {:?}", id),
            Some([index]) => &self.rows[*index],
            Some(indices) => bail!("{} field rows share id {:?}", indices.len(), id),
        };

        let latitude = parse_coordinate(&row[self.lat_index], &self.headers[self.lat_index], id)?;
        let longitude = parse_coordinate(&row[self.lon_index], &self.headers[self.lon_index], id)?;

        let attributes = self
            .headers
            .iter()
            .cloned()
            .zip(row.iter().cloned())
            .collect();

        Ok(FieldPoint::new(row[self.id_index].clone(), latitude, longitude, granule)
            .with_attributes(attributes))
    }
}

/// A blank coordinate is a missing fix: NaN, rejected later as invalid navigation.
fn parse_coordinate(value: &str, column: &str, id: &str) -> Result<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(f64::NAN);
    }
    value
        .parse::<f64>()
        .with_context(|| format!("field row {:?} has a non-numeric {} {:?}", id, column, value))
}
