//! The acceptance gate: one field point against one granule.

use swath_common::{Swath, SwathSource};
use tracing::{info, instrument, warn};

use crate::config::MatchupConfig;
use crate::distance::DistanceField;
use crate::error::{MatchupError, Result};
use crate::exclusion::{ExclusionEntry, ExclusionReason};
use crate::field::FieldPoint;
use crate::locate::nearest_pixel;
use crate::record::OutputRecord;
use crate::sink::MatchupSink;
use crate::stats::VariableStats;
use crate::window::{window_around, LocationFlag};

/// Result of evaluating one pair. Exactly one of these is produced per pair.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchupOutcome {
    Accepted(OutputRecord),
    Excluded(ExclusionEntry),
}

impl MatchupOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MatchupOutcome::Accepted(_))
    }

    pub fn exclusion_reason(&self) -> Option<ExclusionReason> {
        match self {
            MatchupOutcome::Accepted(_) => None,
            MatchupOutcome::Excluded(entry) => Some(entry.reason),
        }
    }
}

/// Runs matchups with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct MatchupEngine {
    config: MatchupConfig,
}

impl MatchupEngine {
    /// Create an engine, rejecting an invalid configuration.
    pub fn new(config: MatchupConfig) -> Result<Self> {
        config.validate().map_err(MatchupError::Config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchupConfig {
        &self.config
    }

    /// Load the field point's granule from `source` and evaluate it.
    #[instrument(skip(self, field, source), fields(id = %field.id, granule = %field.granule))]
    pub fn evaluate<S: SwathSource + ?Sized>(&self, field: &FieldPoint, source: &S) -> MatchupOutcome {
        match source.load(&field.granule) {
            Ok(swath) => self.evaluate_swath(field, &swath),
            Err(e) => excluded(
                field,
                ExclusionReason::FileImportError,
                format!("{}: {}", e.kind(), e),
            ),
        }
    }

    /// Evaluate a field point against an already loaded swath.
    pub fn evaluate_swath(&self, field: &FieldPoint, swath: &Swath) -> MatchupOutcome {
        let config = &self.config;
        let distances = DistanceField::compute(
            field.latitude,
            field.longitude,
            swath.navigation(),
            config.earth_radius_km,
        );

        let Some(pixel) = nearest_pixel(&distances) else {
            return excluded(
                field,
                ExclusionReason::NavigationAllInvalid,
                "navigation is invalid for every pixel",
            );
        };

        if pixel.distance_km > config.max_distance_km {
            return excluded(
                field,
                ExclusionReason::DistanceExceedsThreshold,
                format!(
                    "nearest pixel is {:.3} km away (limit {} km)",
                    pixel.distance_km, config.max_distance_km
                ),
            );
        }

        let (window, placement) = window_around(&pixel, swath.shape(), config.window_radius);
        let location_flag =
            LocationFlag::classify(pixel.distance_km, config.max_distance_km, placement);

        let variables: Vec<VariableStats> = swath
            .statistic_variables(&config.flag_variable)
            .map(|var| VariableStats::compute(var, &window, config))
            .collect();

        info!(
            id = %field.id,
            granule = %field.granule,
            row = pixel.row,
            col = pixel.col,
            distance_km = pixel.distance_km,
            window = %window,
            location_flag = location_flag.code(),
            variables = variables.len(),
            "Matchup accepted"
        );

        MatchupOutcome::Accepted(OutputRecord {
            field: field.clone(),
            pixel,
            window,
            variables,
            location_flag,
        })
    }

    /// Evaluate a pair and hand the outcome to `sink`.
    ///
    /// Errors are only returned when the sink fails; rejections are
    /// reported through the returned outcome.
    pub fn run<S, K>(&self, field: &FieldPoint, source: &S, sink: &K) -> Result<MatchupOutcome>
    where
        S: SwathSource + ?Sized,
        K: MatchupSink + ?Sized,
    {
        let outcome = self.evaluate(field, source);
        match &outcome {
            MatchupOutcome::Accepted(record) => sink.write_record(record)?,
            MatchupOutcome::Excluded(entry) => sink.write_exclusion(entry)?,
        }
        Ok(outcome)
    }
}

fn excluded(field: &FieldPoint, reason: ExclusionReason, detail: impl Into<String>) -> MatchupOutcome {
    let entry = ExclusionEntry::new(&field.id, &field.granule, reason, detail);
    warn!(
        id = %entry.id,
        granule = %entry.granule,
        reason = reason.code(),
        detail = %entry.detail,
        "Matchup excluded"
    );
    MatchupOutcome::Excluded(entry)
}
