//! Report projection and terminal output.
//!
//! The label table fixes both the display names and the column order of the
//! CSV; anything not listed (ids) is dropped.

use std::path::Path;

use crate::domain::{MergedRecord, REPORT_COLUMNS, ReportRow};

/// A report column. Each variant maps to exactly one `MergedRecord` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    ChannelTitle,
    PublishedAt,
    VideoUrl,
    ChannelUrl,
    ViewCount,
    LikeCount,
    DislikeCount,
    CommentCount,
    GoodRate,
    BadRate,
    CommentRate,
    Description,
}

impl Column {
    /// Canonical (pre-localization) column key.
    pub fn key(self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::ChannelTitle => "channelTitle",
            Column::PublishedAt => "publishedAt",
            Column::VideoUrl => "video_url",
            Column::ChannelUrl => "channel_url",
            Column::ViewCount => "viewCount",
            Column::LikeCount => "likeCount",
            Column::DislikeCount => "dislikeCount",
            Column::CommentCount => "commentCount",
            Column::GoodRate => "good_rate",
            Column::BadRate => "bad_rate",
            Column::CommentRate => "comment_rate",
            Column::Description => "description",
        }
    }
}

/// Column -> display label, in output order.
pub const REPORT_LABELS: [(Column, &str); REPORT_COLUMNS] = [
    (Column::Title, "タイトル"),
    (Column::ChannelTitle, "チャンネル名"),
    (Column::PublishedAt, "公開日付"),
    (Column::VideoUrl, "動画URL"),
    (Column::ChannelUrl, "チャンネルURL"),
    (Column::ViewCount, "視聴数"),
    (Column::LikeCount, "GOOD数"),
    (Column::DislikeCount, "BAD数"),
    (Column::CommentCount, "コメント数"),
    (Column::GoodRate, "GOOD率"),
    (Column::BadRate, "BAD率"),
    (Column::CommentRate, "コメント率"),
    (Column::Description, "説明"),
];

/// Project merged rows onto the 13 report columns.
pub fn format_report_rows(merged: &[MergedRecord]) -> Vec<ReportRow> {
    merged.iter().map(to_report_row).collect()
}

fn to_report_row(m: &MergedRecord) -> ReportRow {
    ReportRow {
        cells: REPORT_LABELS.map(|(column, _)| cell(m, column)),
    }
}

fn cell(m: &MergedRecord, column: Column) -> String {
    match column {
        Column::Title => m.title.clone(),
        Column::ChannelTitle => m.channel_title.clone(),
        Column::PublishedAt => m.published_date.clone(),
        Column::VideoUrl => m.video_url.clone(),
        Column::ChannelUrl => m.channel_url.clone(),
        Column::ViewCount => m.view_count.to_string(),
        Column::LikeCount => m.like_count.to_string(),
        Column::DislikeCount => m.dislike_count.to_string(),
        Column::CommentCount => m.comment_count.to_string(),
        Column::GoodRate => format_rate(m.good_rate),
        Column::BadRate => format_rate(m.bad_rate),
        Column::CommentRate => format_rate(m.comment_rate),
        Column::Description => m.description.clone(),
    }
}

/// Rates keep at least one decimal (`5.0`, `0.125`); a missing rate is an empty cell.
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        None => String::new(),
        Some(v) if v.fract() == 0.0 => format!("{v:.1}"),
        Some(v) => format!("{v}"),
    }
}

/// Short terminal summary of a finished run.
pub fn format_run_summary(
    keyword: &str,
    searched: usize,
    with_stats: usize,
    merged: &[MergedRecord],
    path: &Path,
    top_n: usize,
) -> String {
    let mut out = String::new();

    out.push_str("=== yt-analysis ===\n");
    out.push_str(&format!("Keyword: {keyword}\n"));
    out.push_str(&format!(
        "Videos: searched={searched} | with statistics={with_stats} | reported={}\n",
        merged.len()
    ));
    out.push_str(&format!("Output: {}\n", path.display()));

    if merged.is_empty() {
        return out;
    }

    let mut top: Vec<&MergedRecord> = merged.iter().collect();
    top.sort_by(|a, b| b.view_count.cmp(&a.view_count));

    out.push_str("\nTop by views:\n");
    out.push_str(&format!(
        "{:<4} {:>12} {:>9} {:>9}  {}\n",
        "#", "views", "good%", "comment%", "title"
    ));
    for (i, m) in top.iter().take(top_n).enumerate() {
        out.push_str(&format!(
            "{:<4} {:>12} {:>9} {:>9}  {}\n",
            i + 1,
            m.view_count,
            format_rate(m.good_rate),
            format_rate(m.comment_rate),
            truncate(&m.title, 48),
        ));
    }

    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    t.push('…');
    t
}
