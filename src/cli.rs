//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Spritemill asset pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root that relative input/output paths resolve against
    #[arg(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub root: PathBuf,

    /// Config file path (default: spritemill.toml)
    #[arg(short = 'C', long, default_value = "spritemill.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}
