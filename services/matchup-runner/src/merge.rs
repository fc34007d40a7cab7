//! Concatenation of per-pair matchup files into one table.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A table assembled from many matchup files.
///
/// Columns are the union of every input header in first-seen order; cells a
/// file does not have are left empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MergedTable {
    fn column(&mut self, name: &str) -> usize {
        match self.headers.iter().position(|h| h == name) {
            Some(index) => index,
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
                self.headers.len() - 1
            }
        }
    }

    /// Append every row of one CSV document.
    pub fn append<R: std::io::Read>(&mut self, reader: R) -> Result<()> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers()?.clone();
        let indices: Vec<usize> = headers.iter().map(|h| self.column(h)).collect();

        for record in reader.records() {
            let record = record?;
            let mut row = vec![String::new(); self.headers.len()];
            for (value, &index) in record.iter().zip(&indices) {
                row[index] = value.to_string();
            }
            self.rows.push(row);
        }
        Ok(())
    }

    /// Stable sort on the text of `column`.
    pub fn sort_by(&mut self, column: &str) -> Result<()> {
        let index = self
            .headers
            .iter()
            .position(|h| h == column)
            .with_context(|| format!("no column {:?} to sort by", column))?;
        self.rows.sort_by(|a, b| a[index].cmp(&b[index]));
        Ok(())
    }

    pub fn write<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Every `*.csv` file directly inside `dir`, sorted by name.
pub fn matchup_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to list matchup directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Merge the matchup files in `dir` into `output`, optionally sorted.
pub fn merge_dir(dir: &Path, output: &Path, sort_by: Option<&str>) -> Result<MergedTable> {
    // The output may live next to its inputs under a different spelling.
    let previous_output = std::fs::canonicalize(output).ok();
    let mut table = MergedTable::default();
    for path in matchup_files(dir)? {
        if previous_output.is_some() && std::fs::canonicalize(&path).ok() == previous_output {
            debug!(path = %path.display(), "Skipping previous merge output");
            continue;
        }
        debug!(path = %path.display(), "Merging matchup file");
        let file = std::fs::File::open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        table
            .append(file)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }

    if let Some(column) = sort_by {
        table.sort_by(column)?;
    }

    let file = std::fs::File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    table.write(file)?;

    info!(rows = table.rows.len(), columns = table.headers.len(), output = %output.display(), "Merged matchups");
    Ok(table)
}
