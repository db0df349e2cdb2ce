//! Questsmith schema tool
//!
//! Usage:
//!   questsmith flags encode --universe item Glow Invisible
//!   questsmith flags decode --universe status 34
//!   questsmith fields --kind 11
//!   questsmith --schema room.toml check room.json

use anyhow::Result;
use clap::Parser;
use questsmith_cli::{Cli, run};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let output = run(&cli)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
