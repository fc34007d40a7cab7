//! Counts of outcomes across many matchups.

use serde::Serialize;
use std::fmt;

use crate::exclusion::ExclusionReason;
use crate::pipeline::MatchupOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchupSummary {
    pub accepted: usize,
    pub file_import_errors: usize,
    pub navigation_invalid: usize,
    pub beyond_distance: usize,
}

impl MatchupSummary {
    pub fn record(&mut self, outcome: &MatchupOutcome) {
        match outcome.exclusion_reason() {
            None => self.accepted += 1,
            Some(ExclusionReason::FileImportError) => self.file_import_errors += 1,
            Some(ExclusionReason::NavigationAllInvalid) => self.navigation_invalid += 1,
            Some(ExclusionReason::DistanceExceedsThreshold) => self.beyond_distance += 1,
        }
    }

    /// Combine two partial summaries, e.g. from parallel workers.
    pub fn merge(mut self, other: Self) -> Self {
        self.accepted += other.accepted;
        self.file_import_errors += other.file_import_errors;
        self.navigation_invalid += other.navigation_invalid;
        self.beyond_distance += other.beyond_distance;
        self
    }

    pub fn excluded(&self) -> usize {
        self.file_import_errors + self.navigation_invalid + self.beyond_distance
    }

    pub fn total(&self) -> usize {
        self.accepted + self.excluded()
    }
}

impl fmt::Display for MatchupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pairs: {} accepted, {} FIE, {} Nav, {} 1km",
            self.total(),
            self.accepted,
            self.file_import_errors,
            self.navigation_invalid,
            self.beyond_distance
        )
    }
}

impl FromIterator<MatchupOutcome> for MatchupSummary {
    fn from_iter<I: IntoIterator<Item = MatchupOutcome>>(iter: I) -> Self {
        let mut summary = Self::default();
        for outcome in iter {
            summary.record(&outcome);
        }
        summary
    }
}
