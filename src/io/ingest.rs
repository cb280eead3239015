//! API response normalization.
//!
//! Turns the nested JSON items returned by `search.list` and `videos.list`
//! into flat, typed records. Only the fields named in the path tables below
//! are read; everything else in the response is ignored.
//!
//! - required text fields must be present and be strings (`MissingField` otherwise)
//! - counters default to `0` when absent or `null`
//! - the same input always produces the same records

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{SearchRecord, StatsRecord};
use crate::error::AppError;

/// `search.list` item path -> canonical key.
pub const SEARCH_FIELDS: [(&str, &str); 6] = [
    ("id.videoId", "videoId"),
    ("snippet.publishedAt", "publishedAt"),
    ("snippet.channelId", "channelId"),
    ("snippet.title", "title"),
    ("snippet.description", "description"),
    ("snippet.channelTitle", "channelTitle"),
];

/// `videos.list` item path -> canonical key.
pub const STATS_FIELDS: [(&str, &str); 5] = [
    ("id", "videoId"),
    ("statistics.viewCount", "viewCount"),
    ("statistics.likeCount", "likeCount"),
    ("statistics.dislikeCount", "dislikeCount"),
    ("statistics.commentCount", "commentCount"),
];

/// Normalize every `search.list` item. The first malformed item aborts.
pub fn normalize_search_items(items: &[Value]) -> Result<Vec<SearchRecord>, AppError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_search_item(index, item))
        .collect()
}

/// Normalize every `videos.list` item. The first malformed item aborts.
pub fn normalize_stats_items(items: &[Value]) -> Result<Vec<StatsRecord>, AppError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_stats_item(index, item))
        .collect()
}

fn normalize_search_item(index: usize, item: &Value) -> Result<SearchRecord, AppError> {
    let row = FlatRow::extract(item, &SEARCH_FIELDS, "search", index);

    Ok(SearchRecord {
        video_id: row.required_str("videoId")?,
        published_at: row.timestamp("publishedAt")?,
        channel_id: row.required_str("channelId")?,
        title: row.required_str("title")?,
        description: row.required_str("description")?,
        channel_title: row.required_str("channelTitle")?,
    })
}

fn normalize_stats_item(index: usize, item: &Value) -> Result<StatsRecord, AppError> {
    let row = FlatRow::extract(item, &STATS_FIELDS, "statistics", index);

    Ok(StatsRecord {
        video_id: row.required_str("videoId")?,
        view_count: row.count("viewCount")?,
        like_count: row.count("likeCount")?,
        dislike_count: row.count("dislikeCount")?,
        comment_count: row.count("commentCount")?,
    })
}

/// One item reduced to the fields of a path table, keyed by canonical name.
struct FlatRow<'a> {
    source: &'static str,
    index: usize,
    fields: Vec<(&'static str, &'static str, Option<&'a Value>)>,
}

impl<'a> FlatRow<'a> {
    fn extract(
        item: &'a Value,
        table: &[(&'static str, &'static str)],
        source: &'static str,
        index: usize,
    ) -> Self {
        let fields = table
            .iter()
            .map(|&(path, key)| (path, key, lookup_path(item, path)))
            .collect();
        Self { source, index, fields }
    }

    fn field(&self, key: &str) -> (&'static str, Option<&'a Value>) {
        self.fields
            .iter()
            .find(|(_, k, _)| *k == key)
            .map(|&(path, _, value)| (path, value))
            .unwrap_or(("<unmapped>", None))
    }

    fn required_str(&self, key: &str) -> Result<String, AppError> {
        let (path, value) = self.field(key);
        match value {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Null) | None => Err(self.error(path, "missing")),
            Some(_) => Err(self.error(path, "not a string")),
        }
    }

    fn count(&self, key: &str) -> Result<u64, AppError> {
        let (path, value) = self.field(key);
        match value {
            None | Some(Value::Null) => Ok(0),
            Some(Value::String(s)) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| self.error(path, &format!("invalid count '{s}'"))),
            Some(Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| self.error(path, &format!("invalid count {n}"))),
            Some(_) => Err(self.error(path, "invalid count")),
        }
    }

    fn timestamp(&self, key: &str) -> Result<DateTime<Utc>, AppError> {
        let (path, _) = self.field(key);
        let raw = self.required_str(key)?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| self.error(path, &format!("invalid timestamp '{raw}' ({e})")))
    }

    fn error(&self, path: &str, what: &str) -> AppError {
        AppError::missing_field(format!(
            "Malformed {} item #{}: `{path}` {what}.",
            self.source, self.index
        ))
    }
}

/// Follow a dotted path (`snippet.title`) through nested JSON objects.
fn lookup_path<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(item, |node, segment| node.get(segment))
}
