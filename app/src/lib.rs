//! FILENAME: app/src/lib.rs
// PURPOSE: Library root of the `sheet` host: configuration, logging and
// the report pipeline, wired together by `run`.

pub mod config;
pub mod logging;
pub mod report;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::Path;

pub use config::Args;
pub use report::{evaluate_rows, render_text, render_tokens, sheet_lines, ReportRow};

/// Produces the report `args` asks for from the sheet text `input`.
pub fn execute(args: &Args, input: &str) -> Result<String> {
    let lines = sheet_lines(input);
    if args.tokens {
        return Ok(render_tokens(&lines));
    }

    let rows = evaluate_rows(&lines);
    if args.json {
        let mut json = serde_json::to_string_pretty(&rows).context("failed to encode report")?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_text(&rows))
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level(), args.log_file.as_deref())?;
    log::debug!(target: "APP", "{:?}", args);

    let input = read_input(args.file.as_deref())?;
    let report = execute(&args, &input)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(report.as_bytes())?;
    handle.flush()?;
    log::logger().flush();
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
