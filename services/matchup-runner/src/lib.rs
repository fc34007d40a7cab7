//! Matchup runner library.
//!
//! File-level plumbing around the `matchup` core: configuration loading,
//! the field table, granule link files, parallel batch runs and
//! processing reports.

pub mod batch;
pub mod config;
pub mod field_table;
pub mod merge;
pub mod report;
