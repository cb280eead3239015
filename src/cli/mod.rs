//! Command-line parsing for the keyword video analysis.
//!
//! Argument parsing only; validation of the values happens when the
//! arguments are folded into an `AnalysisConfig` (see `app`).

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "yt-analysis",
    version,
    about = "Search YouTube for a keyword and write a CSV of engagement statistics"
)]
pub struct Cli {
    /// Search keyword.
    pub keyword: String,

    /// Maximum number of videos to search for and fetch statistics of (1-50).
    ///
    /// `-mc` is accepted as an alias.
    #[arg(short = 'm', long = "max-counts", default_value_t = 50)]
    pub max_counts: u32,

    /// Directory the report CSV is written to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

/// Rewrite argv so the two-letter `-mc` short form parses.
///
/// Rules:
/// - `-mc N`   -> `--max-counts N`
/// - `-mc=N`   -> `--max-counts=N`
/// - anything after `--` is left untouched
pub fn rewrite_args(argv: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(argv.len());
    let mut passthrough = false;

    for (i, arg) in argv.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        if arg == "-mc" {
            out.push("--max-counts".to_string());
        } else if let Some(value) = arg.strip_prefix("-mc=") {
            out.push(format!("--max-counts={value}"));
        } else {
            out.push(arg);
        }
    }

    out
}
