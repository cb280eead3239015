//! `yt-analysis` library crate.
//!
//! The binary is a thin wrapper around this library so that the pipeline
//! can be exercised in tests against canned API responses.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
