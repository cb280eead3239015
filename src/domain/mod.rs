//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run configuration (`AnalysisConfig`)
//! - normalized API records (`SearchRecord`, `StatsRecord`)
//! - joined/derived rows (`JoinedRecord`, `MergedRecord`) and report rows (`ReportRow`)

pub mod types;

pub use types::*;
