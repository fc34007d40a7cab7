//! Destinations for matchup outputs.
//!
//! Every evaluated pair ends up in exactly one place: an accepted pair is
//! written as a single-row CSV file, a rejected pair is appended to the
//! shared exclusion log.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::exclusion::ExclusionEntry;
use crate::record::OutputRecord;

/// Receives the outcome of each matchup.
///
/// Implementations must be safe to share between workers running
/// matchups in parallel.
pub trait MatchupSink: Send + Sync {
    fn write_record(&self, record: &OutputRecord) -> Result<()>;

    fn write_exclusion(&self, entry: &ExclusionEntry) -> Result<()>;
}

impl<T: MatchupSink + ?Sized> MatchupSink for &T {
    fn write_record(&self, record: &OutputRecord) -> Result<()> {
        (**self).write_record(record)
    }

    fn write_exclusion(&self, entry: &ExclusionEntry) -> Result<()> {
        (**self).write_exclusion(entry)
    }
}

/// Writes records to `<output_dir>/<id>_<granule>.csv` and exclusions to an
/// append-only log file.
#[derive(Debug, Clone)]
pub struct FileSink {
    output_dir: PathBuf,
    exclusion_log: PathBuf,
}

impl FileSink {
    pub fn new(output_dir: impl Into<PathBuf>, exclusion_log: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            exclusion_log: exclusion_log.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn exclusion_log(&self) -> &Path {
        &self.exclusion_log
    }

    /// Path the record for `record` is written to.
    pub fn record_path(&self, record: &OutputRecord) -> PathBuf {
        self.output_dir.join(record.file_name())
    }
}

impl MatchupSink for FileSink {
    #[instrument(skip(self, record), fields(id = %record.field.id, granule = %record.field.granule))]
    fn write_record(&self, record: &OutputRecord) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;

        // Readers never observe a partially written record.
        let mut tmp = NamedTempFile::new_in(&self.output_dir)?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
            writer.write_record(record.headers())?;
            writer.write_record(record.values())?;
            writer.flush()?;
        }

        let path = self.record_path(record);
        tmp.persist(&path)?;
        debug!(path = %path.display(), "Wrote matchup record");
        Ok(())
    }

    #[instrument(skip(self, entry), fields(id = %entry.id, granule = %entry.granule))]
    fn write_exclusion(&self, entry: &ExclusionEntry) -> Result<()> {
        if let Some(parent) = self.exclusion_log.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.exclusion_log)?;
        // One write per line keeps concurrent appends from interleaving.
        file.write_all(entry.log_line()?.as_bytes())?;
        debug!(reason = entry.reason.code(), "Logged exclusion");
        Ok(())
    }
}

/// Collects outputs in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<OutputRecord>>,
    exclusions: Mutex<Vec<ExclusionEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<OutputRecord> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn exclusions(&self) -> Vec<ExclusionEntry> {
        self.exclusions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The exclusion log as [`FileSink`] would have written it.
    pub fn exclusion_log(&self) -> Result<String> {
        self.exclusions().iter().map(|e| e.log_line()).collect()
    }
}

impl MatchupSink for MemorySink {
    fn write_record(&self, record: &OutputRecord) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());
        Ok(())
    }

    fn write_exclusion(&self, entry: &ExclusionEntry) -> Result<()> {
        self.exclusions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.clone());
        Ok(())
    }
}
