//! Spritemill - publishes raw game art into the served assets directory.
//!
//! Textures are re-encoded as-is; sprites get their background stripped and
//! come out as transparency-enabled PNGs.

mod asset;
mod cli;
mod config;
mod image;
mod logger;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::PipelineConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = PipelineConfig::load(&cli)?;
    let summary = asset::publish_assets(&config);

    if summary.failed > 0 {
        log!("assets"; "done: {} published, {} failed", summary.processed, summary.failed);
    } else {
        log!("assets"; "done: {} published", summary.processed);
    }

    // Per-file failures stay in the log; the run itself still succeeds.
    Ok(())
}
