//! Write the localized report to CSV.
//!
//! UTF-8, comma-delimited, one header line of display labels, no index column.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::domain::ReportRow;
use crate::error::AppError;
use crate::report::format::REPORT_LABELS;

/// `video_analysis_{YYMMDD_HHMM}_{keyword}.csv`
///
/// Path separators in the keyword become `_` so the file stays in the output directory.
pub fn report_file_name(keyword: &str, now: NaiveDateTime) -> String {
    let keyword: String = keyword
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("video_analysis_{}_{keyword}.csv", now.format("%y%m%d_%H%M"))
}

/// Write the header plus one line per row, replacing any existing file.
pub fn write_report_csv(path: &Path, rows: &[ReportRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::io(format!("Failed to create report CSV '{}': {e}", path.display())))?;

    writer
        .write_record(REPORT_LABELS.iter().map(|(_, label)| *label))
        .map_err(|e| AppError::io(format!("Failed to write report CSV header: {e}")))?;

    for row in rows {
        writer
            .write_record(&row.cells)
            .map_err(|e| AppError::io(format!("Failed to write report CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush report CSV '{}': {e}", path.display())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::REPORT_COLUMNS;
    use crate::error::ErrorKind;
    use chrono::NaiveDate;

    #[test]
    fn file_name_embeds_stamp_and_keyword() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 9)
            .unwrap()
            .and_hms_opt(7, 5, 59)
            .unwrap();
        assert_eq!(report_file_name("cats", now), "video_analysis_240109_0705_cats.csv");
        assert_eq!(report_file_name("猫 動画", now), "video_analysis_240109_0705_猫 動画.csv");
        assert_eq!(report_file_name("a/b", now), "video_analysis_240109_0705_a_b.csv");
    }

    #[test]
    fn header_and_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut cells: [String; REPORT_COLUMNS] = Default::default();
        cells[0] = "Cats, \"the\" movie".to_string();
        cells[12] = "line one\nline two".to_string();
        write_report_csv(&path, &[ReportRow { cells }]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "タイトル,チャンネル名,公開日付,動画URL,チャンネルURL,視聴数,GOOD数,BAD数,コメント数,GOOD率,BAD率,コメント率,説明"
        );
        assert!(text.contains("\"Cats, \"\"the\"\" movie\""));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), REPORT_COLUMNS);
        assert_eq!(&records[0][12], "line one\nline two");
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-subdir").join("out.csv");
        let err = write_report_csv(&path, &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
