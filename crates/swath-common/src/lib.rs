//! Common types and utilities shared across the satellite matchup workspace.

pub mod error;
pub mod granule;
pub mod grid;
pub mod source;
pub mod swath;

pub use error::{SwathError, SwathResult};
pub use granule::{GranuleId, SatelliteDirs};
pub use grid::Grid2D;
pub use source::SwathSource;
pub use swath::{GeophysicalVariable, Navigation, Swath};
