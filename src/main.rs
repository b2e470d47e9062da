//! # Tablescout Command-Line Entry Point
//!
//! ```bash
//! tablescout datasets warehouse.duckdb
//! tablescout classify "CREATE TABLE t (a INT); SELECT 1"
//! ```
//!
//! Output goes to stdout; logs go to stderr (`RUST_LOG=debug` for detail).

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    tablescout::logging::init(cli.log_file)?;
    if cli.log_file {
        let log_path = tablescout::logging::get_current_log_path()?;
        tracing::info!(path = %log_path.display(), "Writing logs to file");
    }

    cli::run_command(cli.command)
}
