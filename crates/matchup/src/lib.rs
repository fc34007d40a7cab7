//! Matching of in-situ field measurements against satellite swaths.
//!
//! For one field point and one granule the engine:
//!
//! 1. loads the swath through a [`SwathSource`](swath_common::SwathSource)
//! 2. computes the great-circle distance from the point to every pixel
//! 3. picks the nearest pixel with valid navigation
//! 4. rejects the pair if that pixel is beyond the distance threshold
//! 5. computes raw and outlier-filtered statistics of every geophysical
//!    variable over a small window around the pixel
//!
//! Each pair produces exactly one [`MatchupOutcome`]: an [`OutputRecord`] or
//! an [`ExclusionEntry`], which a [`MatchupSink`] persists.

pub mod config;
pub mod distance;
pub mod error;
pub mod exclusion;
pub mod field;
pub mod locate;
pub mod pipeline;
pub mod record;
pub mod sink;
pub mod stats;
pub mod summary;
pub mod window;

pub use config::MatchupConfig;
pub use distance::{haversine_km, DistanceField};
pub use error::{MatchupError, Result};
pub use exclusion::{ExclusionEntry, ExclusionReason};
pub use field::FieldPoint;
pub use locate::{nearest_pixel, PixelLocation};
pub use pipeline::{MatchupEngine, MatchupOutcome};
pub use record::OutputRecord;
pub use sink::{FileSink, MatchupSink, MemorySink};
pub use stats::{VariableFlag, VariableStats};
pub use summary::MatchupSummary;
pub use window::{window_around, GridWindow, LocationFlag, Placement};
