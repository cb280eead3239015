//! Shared domain types.
//!
//! Every record here lives for a single run: built from the API responses,
//! consumed by the next pipeline stage, and finally flattened into CSV cells.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Largest `maxResults` / id-list length the platform accepts in one request.
pub const MAX_BATCH: u32 = 50;

/// Run configuration resolved from CLI arguments.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub keyword: String,
    /// Bounds both the search result count and the statistics batch size.
    pub max_counts: u32,
    pub output_dir: PathBuf,
}

/// One search hit, flattened from `search.list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub video_id: String,
    pub published_at: DateTime<Utc>,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
}

/// Engagement counters for one video, flattened from `videos.list`.
///
/// Counters the platform omits (hidden likes, removed dislikes) are `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRecord {
    pub video_id: String,
    pub view_count: u64,
    pub like_count: u64,
    pub dislike_count: u64,
    pub comment_count: u64,
}

/// A search hit joined with its statistics, before derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRecord {
    pub search: SearchRecord,
    pub stats: StatsRecord,
}

/// A joined row extended with URLs, rates and the display date.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub video_id: String,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
    /// `YYYY-MM-DD`, UTC.
    pub published_date: String,
    pub video_url: String,
    pub channel_url: String,
    pub view_count: u64,
    pub like_count: u64,
    pub dislike_count: u64,
    pub comment_count: u64,
    /// Percent of views, 3 decimals. `None` when the video has zero views.
    pub good_rate: Option<f64>,
    pub bad_rate: Option<f64>,
    pub comment_rate: Option<f64>,
}

/// Number of columns in every report row.
pub const REPORT_COLUMNS: usize = 13;

/// One output line: display cells in label order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub cells: [String; REPORT_COLUMNS],
}
