//! FILENAME: app/src/config.rs
// PURPOSE: Command-line configuration for the `sheet` host.

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// Environment variable holding the default log level.
pub const LOG_ENV: &str = "SHEET_LOG";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sheet",
    about = "Evaluate a column of spreadsheet formulas, one per line (rows A0, A1, ...)."
)]
pub struct Args {
    /// Sheet file. Reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Print the results as JSON.
    #[arg(long, conflicts_with = "tokens")]
    pub json: bool,

    /// Print the tokens of each formula instead of evaluating it.
    #[arg(long)]
    pub tokens: bool,

    /// off, error, warn, info, debug or trace. Defaults to $SHEET_LOG, then warn.
    #[arg(long, value_name = "LEVEL", value_parser = parse_level)]
    pub log_level: Option<LevelFilter>,

    /// Also write log lines to this file (truncated on start).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// The effective log level: the flag, then the environment, then `warn`.
    pub fn log_level(&self) -> LevelFilter {
        resolve_log_level(self.log_level, std::env::var(LOG_ENV).ok().as_deref())
    }
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("unknown log level '{value}' (expected: off|error|warn|info|debug|trace)"))
}

pub fn resolve_log_level(flag: Option<LevelFilter>, env: Option<&str>) -> LevelFilter {
    flag.or_else(|| env.and_then(|value| parse_level(value).ok()))
        .unwrap_or(LevelFilter::Warn)
}
