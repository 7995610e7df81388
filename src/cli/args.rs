//! CLI argument parsing using clap

use crate::types::NormalizerKind;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for kanafold commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// kanafold CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "kanafold")]
#[command(about = "Normalize Japanese text: width folding, sound marks, whitespace and kana")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (overrides kanafold.toml)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (defaults to ./kanafold.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available kanafold subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print normalized text (reads stdin when no files are given)
    Normalize {
        /// Normalizer to apply (overrides kanafold.toml)
        #[arg(short, long)]
        kind: Option<NormalizerKind>,

        /// Files to normalize
        files: Vec<PathBuf>,
    },

    /// Report files whose content is not normalized
    Check {
        /// Paths to check (defaults to current directory)
        #[arg(default_value = ".")]
        paths: Vec<String>,

        /// Normalizer to check against (overrides kanafold.toml)
        #[arg(short, long)]
        kind: Option<NormalizerKind>,

        /// Output format (overrides kanafold.toml)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Print the effective pre and post rule chains
    List {
        /// Normalizer to describe (overrides kanafold.toml)
        #[arg(short, long)]
        kind: Option<NormalizerKind>,

        /// Output format (overrides kanafold.toml)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Write a commented kanafold.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
