//! Level-2 processing report.
//!
//! Compares the swath files present under the satellite directory with the
//! granules requested in a links file.

use anyhow::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::batch::GranuleLink;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatelliteProgress {
    pub requested: usize,
    pub processed: usize,
}

impl SatelliteProgress {
    pub fn percent(&self) -> f64 {
        percent(self.processed, self.requested)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingReport {
    pub requested: usize,
    pub processed: usize,
    /// Keyed by satellite prefix (e.g. `A`).
    pub satellites: BTreeMap<String, SatelliteProgress>,
}

impl ProcessingReport {
    pub fn percent(&self) -> f64 {
        percent(self.processed, self.requested)
    }

    /// Log overall and per-satellite percentages.
    pub fn log(&self) {
        info!(
            requested = self.requested,
            processed = self.processed,
            percent = self.percent(),
            "Swath files processed to L2"
        );
        for (prefix, progress) in &self.satellites {
            info!(
                satellite = %prefix,
                requested = progress.requested,
                processed = progress.processed,
                percent = progress.percent(),
                "Satellite swath files processed to L2"
            );
        }
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Satellite prefix of a granule id: everything before the 13-character
/// `YYYYDDDHHMMSS` timestamp.
pub fn satellite_prefix(granule: &str) -> &str {
    match granule.len().checked_sub(13) {
        Some(end) if end > 0 && granule.is_char_boundary(end) => &granule[..end],
        _ => granule.get(..1).unwrap_or(granule),
    }
}

/// Names of every `*.<extension>` file below `root`.
pub fn find_swath_files(root: &Path, extension: &str) -> Vec<String> {
    let suffix = format!(".{}", extension);
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(String::from))
        .filter(|name| name.ends_with(&suffix))
        .collect()
}

/// Build the report for the unique granules of `links`.
pub fn build_report(links: &[GranuleLink], swath_files: &[String]) -> ProcessingReport {
    let requested: BTreeSet<&str> = links.iter().map(|l| l.granule.as_str()).collect();

    let mut satellites: BTreeMap<String, SatelliteProgress> = BTreeMap::new();
    for granule in &requested {
        satellites
            .entry(satellite_prefix(granule).to_string())
            .or_insert(SatelliteProgress {
                requested: 0,
                processed: 0,
            })
            .requested += 1;
    }

    let mut processed = 0;
    for name in swath_files {
        processed += 1;
        if let Some(progress) = satellites
            .iter_mut()
            .find(|(prefix, _)| name.starts_with(prefix.as_str()))
            .map(|(_, progress)| progress)
        {
            progress.processed += 1;
        }
    }

    ProcessingReport {
        requested: requested.len(),
        processed,
        satellites,
    }
}

/// Walk `sat_dir` and report against `links`.
pub fn report(sat_dir: &Path, extension: &str, links: &[GranuleLink]) -> Result<ProcessingReport> {
    if !sat_dir.is_dir() {
        anyhow::bail!("satellite directory {} does not exist", sat_dir.display());
    }
    let files = find_swath_files(sat_dir, extension);
    Ok(build_report(links, &files))
}
