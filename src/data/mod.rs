//! Remote data sources.

pub mod youtube;

pub use youtube::{VideoSource, YoutubeClient};
