//! Input/output helpers.
//!
//! - API response normalization (`ingest`)
//! - report CSV export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
