//! Rejected matchups and their log line format.

use serde::Serialize;
use std::fmt;

use crate::error::Result;

/// Why a field point / granule pair produced no output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExclusionReason {
    /// The swath could not be loaded (missing, unreadable or malformed).
    FileImportError,
    /// Every pixel of the swath has invalid navigation.
    NavigationAllInvalid,
    /// The nearest pixel is farther than the distance threshold.
    DistanceExceedsThreshold,
}

impl ExclusionReason {
    /// Code written to the exclusion log.
    pub fn code(&self) -> &'static str {
        match self {
            ExclusionReason::FileImportError => "FIE",
            ExclusionReason::NavigationAllInvalid => "Nav",
            ExclusionReason::DistanceExceedsThreshold => "1km",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One rejected pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExclusionEntry {
    pub id: String,
    pub granule: String,
    pub reason: ExclusionReason,
    /// Human-readable explanation; not part of the log line.
    pub detail: String,
}

impl ExclusionEntry {
    pub fn new(
        id: impl Into<String>,
        granule: impl Into<String>,
        reason: ExclusionReason,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            granule: granule.into(),
            reason,
            detail: detail.into(),
        }
    }

    /// The complete log line, newline included: `id,granule,code\n`.
    ///
    /// Fields containing commas, quotes or newlines are CSV-quoted.
    pub fn log_line(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record([self.id.as_str(), self.granule.as_str(), self.reason.code()])?;
        writer.flush()?;
        Ok(String::from_utf8_lossy(writer.get_ref()).into_owned())
    }
}
