//! FILENAME: app/src/main.rs
// PURPOSE: Command-line entry point with unified logging on stderr.
// FORMAT: seq|level|category|message

fn main() -> anyhow::Result<()> {
    app_lib::run()
}
