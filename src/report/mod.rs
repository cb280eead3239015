//! Reporting utilities: join, derived metrics, and formatting.

use log::warn;

use crate::domain::{JoinedRecord, MergedRecord, SearchRecord, StatsRecord};

pub mod format;

pub use format::*;

pub const VIDEO_URL: &str = "https://www.youtube.com/watch?v=";
pub const CHANNEL_URL: &str = "https://www.youtube.com/channel/";

/// Inner-join search hits with statistics on `video_id`.
///
/// Output follows search order; within one search hit, matches follow
/// statistics order. Repeated ids on either side multiply out.
pub fn join_records(search: &[SearchRecord], stats: &[StatsRecord]) -> Vec<JoinedRecord> {
    let mut out = Vec::with_capacity(search.len());
    let mut unmatched = 0usize;

    for s in search {
        let before = out.len();
        out.extend(
            stats
                .iter()
                .filter(|st| st.video_id == s.video_id)
                .map(|st| JoinedRecord {
                    search: s.clone(),
                    stats: st.clone(),
                }),
        );
        if out.len() == before {
            unmatched += 1;
        }
    }

    if unmatched > 0 {
        warn!("{unmatched} search result(s) had no statistics and were dropped");
    }
    out
}

/// Add URLs, engagement rates and the display date to each joined row.
pub fn derive_metrics(joined: &[JoinedRecord]) -> Vec<MergedRecord> {
    joined.iter().map(derive_one).collect()
}

fn derive_one(row: &JoinedRecord) -> MergedRecord {
    let s = &row.search;
    let st = &row.stats;

    if st.view_count == 0 {
        warn!("video {} reports zero views; rates left empty", s.video_id);
    }

    MergedRecord {
        video_id: s.video_id.clone(),
        channel_id: s.channel_id.clone(),
        title: s.title.clone(),
        description: s.description.clone(),
        channel_title: s.channel_title.clone(),
        published_date: s.published_at.format("%Y-%m-%d").to_string(),
        video_url: format!("{VIDEO_URL}{}", s.video_id),
        channel_url: format!("{CHANNEL_URL}{}", s.channel_id),
        view_count: st.view_count,
        like_count: st.like_count,
        dislike_count: st.dislike_count,
        comment_count: st.comment_count,
        good_rate: engagement_rate(st.like_count, st.view_count),
        bad_rate: engagement_rate(st.dislike_count, st.view_count),
        comment_rate: engagement_rate(st.comment_count, st.view_count),
    }
}

/// `count / views` as a percentage rounded to 3 decimals; `None` for zero views.
///
/// Ties round to even (`0.0125` -> `0.012`).
pub fn engagement_rate(count: u64, views: u64) -> Option<f64> {
    if views == 0 {
        return None;
    }
    let pct = count as f64 / views as f64 * 100.0;
    Some((pct * 1000.0).round_ties_even() / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn search(id: &str) -> SearchRecord {
        SearchRecord {
            video_id: id.to_string(),
            published_at: Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 59).unwrap(),
            channel_id: format!("UC-{id}"),
            title: format!("title {id}"),
            description: String::new(),
            channel_title: "chan".to_string(),
        }
    }

    fn stats(id: &str, views: u64) -> StatsRecord {
        StatsRecord {
            video_id: id.to_string(),
            view_count: views,
            like_count: 50,
            dislike_count: 5,
            comment_count: 1,
        }
    }

    #[test]
    fn rate_examples() {
        assert_eq!(engagement_rate(50, 1000), Some(5.0));
        assert_eq!(engagement_rate(1, 3), Some(33.333));
        assert_eq!(engagement_rate(2, 3), Some(66.667));
        assert_eq!(engagement_rate(0, 10), Some(0.0));
    }

    #[test]
    fn rate_ties_round_to_even() {
        assert_eq!(engagement_rate(1, 8000), Some(0.012));
        assert_eq!(engagement_rate(3, 8000), Some(0.038));
        assert_eq!(engagement_rate(5, 8000), Some(0.062));
    }

    #[test]
    fn zero_views_yield_no_rate_every_time() {
        assert_eq!(engagement_rate(5, 0), None);
        assert_eq!(engagement_rate(0, 0), None);
        assert_eq!(engagement_rate(5, 0), engagement_rate(5, 0));
    }

    #[test]
    fn join_keeps_only_ids_present_on_both_sides() {
        let s = vec![search("v1"), search("v2"), search("v3")];
        let st = vec![stats("v3", 10), stats("v1", 10), stats("zz", 10)];
        let joined = join_records(&s, &st);

        let ids: Vec<&str> = joined.iter().map(|j| j.search.video_id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v3"]);
        for j in &joined {
            assert_eq!(j.search.video_id, j.stats.video_id);
            assert!(s.iter().any(|x| x.video_id == j.search.video_id));
            assert!(st.iter().any(|x| x.video_id == j.stats.video_id));
        }
    }

    #[test]
    fn missing_statistics_drop_the_search_row() {
        let joined = join_records(&[search("v1"), search("v2")], &[stats("v2", 10)]);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].search.video_id, "v2");
    }

    #[test]
    fn duplicate_statistics_ids_cross_product() {
        let joined = join_records(&[search("abc")], &[stats("abc", 10), stats("abc", 20)]);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].stats.view_count, 10);
        assert_eq!(joined[1].stats.view_count, 20);
    }

    #[test]
    fn derived_fields() {
        let joined = join_records(&[search("v1"), search("v0")], &[stats("v1", 1000), stats("v0", 0)]);
        let merged = derive_metrics(&joined);

        let m = &merged[0];
        assert_eq!(m.video_url, "https://www.youtube.com/watch?v=v1");
        assert_eq!(m.channel_url, "https://www.youtube.com/channel/UC-v1");
        assert_eq!(m.published_date, "2020-12-31");
        assert_eq!(m.good_rate, Some(5.0));
        assert_eq!(m.bad_rate, Some(0.5));
        assert_eq!(m.comment_rate, Some(0.1));

        let zero = &merged[1];
        assert_eq!(zero.view_count, 0);
        assert_eq!((zero.good_rate, zero.bad_rate, zero.comment_rate), (None, None, None));
    }
}
