//! The analysis pipeline, independent of where the data comes from.
//!
//! search -> normalize -> statistics -> normalize -> join -> derive -> format -> write
//!
//! Taking the source as a `VideoSource` lets tests drive the whole run
//! with canned responses.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use log::{info, warn};

use crate::data::VideoSource;
use crate::data::youtube::check_batch;
use crate::domain::{AnalysisConfig, MergedRecord, ReportRow, SearchRecord, StatsRecord};
use crate::error::AppError;
use crate::io::{normalize_search_items, normalize_stats_items, report_file_name, write_report_csv};
use crate::report::{derive_metrics, format_report_rows, join_records};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub searched: Vec<SearchRecord>,
    pub stats: Vec<StatsRecord>,
    pub merged: Vec<MergedRecord>,
    pub rows: Vec<ReportRow>,
    pub path: PathBuf,
}

/// Execute the full pipeline and write the report. `now` stamps the file name.
pub fn run_analysis(
    source: &impl VideoSource,
    config: &AnalysisConfig,
    now: NaiveDateTime,
) -> Result<RunOutput, AppError> {
    check_batch(config.max_counts as usize, "--max-counts")?;

    // 1) Search.
    let raw_search = source.search(&config.keyword, config.max_counts)?;
    let searched = normalize_search_items(&raw_search)?;
    info!("search returned {} video(s)", searched.len());

    // 2) Statistics for the ids found. Nothing to ask for when the search was empty.
    let stats = if searched.is_empty() {
        warn!("no videos found for '{}'; writing an empty report", config.keyword);
        Vec::new()
    } else {
        let ids = unique_video_ids(&searched);
        let raw_stats = source.statistics(&ids, config.max_counts)?;
        normalize_stats_items(&raw_stats)?
    };
    info!("statistics returned for {} video(s)", stats.len());

    // 3) Join, derive, project.
    let joined = join_records(&searched, &stats);
    let merged = derive_metrics(&joined);
    let rows = format_report_rows(&merged);

    // 4) Write.
    let path = config.output_dir.join(report_file_name(&config.keyword, now));
    write_report_csv(&path, &rows)?;
    info!("wrote {} row(s) to {}", rows.len(), path.display());

    Ok(RunOutput {
        searched,
        stats,
        merged,
        rows,
        path,
    })
}

/// Video ids in search order, each once.
fn unique_video_ids(records: &[SearchRecord]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::with_capacity(records.len());
    for r in records {
        if !ids.contains(&r.video_id) {
            ids.push(r.video_id.clone());
        }
    }
    ids
}
