//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging
//! - parses CLI arguments into an `AnalysisConfig`
//! - builds the YouTube client from the environment
//! - runs the pipeline and prints a summary

use chrono::Local;
use clap::Parser;
use log::info;

use crate::cli::{Cli, rewrite_args};
use crate::data::YoutubeClient;
use crate::data::youtube::check_batch;
use crate::domain::AnalysisConfig;
use crate::error::AppError;

pub mod pipeline;

const SUMMARY_TOP_N: usize = 10;

/// Entry point for the `yt-analysis` binary.
pub fn run() -> Result<(), AppError> {
    init_logger();

    let Some(cli) = parse_cli(rewrite_args(std::env::args().collect()))? else {
        return Ok(());
    };
    let config = analysis_config_from_args(&cli)?;

    // Credential check happens before any request is made.
    let client = YoutubeClient::from_env()?;
    info!("searching for '{}' (max {})", config.keyword, config.max_counts);

    let now = Local::now().naive_local();
    let run = pipeline::run_analysis(&client, &config, now)?;

    println!(
        "{}",
        crate::report::format_run_summary(
            &config.keyword,
            run.searched.len(),
            run.stats.len(),
            &run.merged,
            &run.path,
            SUMMARY_TOP_N,
        )
    );

    Ok(())
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

/// Parse argv without letting clap exit the process.
///
/// `--help` / `--version` are printed here and yield `None`; malformed
/// arguments become a `Usage` error.
pub fn parse_cli(argv: Vec<String>) -> Result<Option<Cli>, AppError> {
    match Cli::try_parse_from(argv) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            Ok(None)
        }
        Err(err) => Err(AppError::usage(err.to_string().trim_end())),
    }
}

/// Validate CLI values and fold them into a run configuration.
///
/// The keyword is kept exactly as given; it is only trimmed to reject blanks.
pub fn analysis_config_from_args(cli: &Cli) -> Result<AnalysisConfig, AppError> {
    if cli.keyword.trim().is_empty() {
        return Err(AppError::config("Keyword must not be empty."));
    }
    check_batch(cli.max_counts as usize, "--max-counts")?;

    Ok(AnalysisConfig {
        keyword: cli.keyword.clone(),
        max_counts: cli.max_counts,
        output_dir: cli.output_dir.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(rewrite_args(args.iter().map(|s| s.to_string()).collect()))
    }

    #[test]
    fn config_from_args() {
        let config = analysis_config_from_args(&cli(&["yt-analysis", "cats", "-mc", "2"])).unwrap();
        assert_eq!(config.keyword, "cats");
        assert_eq!(config.max_counts, 2);
    }

    #[test]
    fn out_of_range_max_counts_is_rejected() {
        for n in ["0", "51", "500"] {
            let err = analysis_config_from_args(&cli(&["yt-analysis", "cats", "-mc", n])).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "max_counts={n}");
        }
    }

    #[test]
    fn keyword_is_kept_verbatim() {
        let config = analysis_config_from_args(&cli(&["yt-analysis", " cute cats "])).unwrap();
        assert_eq!(config.keyword, " cute cats ");
    }

    #[test]
    fn bad_arguments_are_usage_errors() {
        fn argv(args: &[&str]) -> Vec<String> {
            args.iter().map(|s| s.to_string()).collect()
        }

        let err = parse_cli(argv(&["yt-analysis"])).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Usage);

        let err = parse_cli(argv(&["yt-analysis", "cats", "--max-counts", "many"])).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_ne!(err.exit_code(), ErrorKind::Config.exit_code());

        assert!(parse_cli(argv(&["yt-analysis", "--help"])).unwrap().is_none());
        assert_eq!(parse_cli(argv(&["yt-analysis", "cats"])).unwrap().unwrap().keyword, "cats");
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let err = analysis_config_from_args(&cli(&["yt-analysis", "  "])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
