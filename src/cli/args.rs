//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Check an extension's locales against the baseline locale
//! - `init`: Write a default `.checklocrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use log::LevelFilter;

use crate::core::Check;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Log level selected by `-v` / `-q`.
    pub fn log_level(&self) -> LevelFilter {
        match &self.command {
            Some(Command::Check(args)) if args.quiet => LevelFilter::Off,
            Some(Command::Check(args)) if args.verbose => LevelFilter::Info,
            _ => LevelFilter::Warn,
        }
    }
}

/// How `check` prints its diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Cargo-style diagnostics in emission order.
    Text,
    /// Diagnostics under one header per locale.
    Grouped,
    /// A single JSON document, grouped by locale.
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Extension directory containing chrome.manifest (or the manifest file itself)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Only run these checks (default: all). Can be repeated: --only keys --only files
    #[arg(long, value_enum)]
    pub only: Vec<Check>,

    /// Baseline locale every other locale is compared against (overrides config file)
    #[arg(long, value_name = "CODE")]
    pub baseline: Option<String>,

    /// Treat every subfolder of PATH as a locale and skip registration checks
    #[arg(long)]
    pub locales_only: bool,

    /// Group diagnostics by locale
    #[arg(long)]
    pub group_by_language: bool,

    /// Print results as JSON (implies --group-by-language)
    #[arg(long)]
    pub json: bool,

    /// Print progress information
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print diagnostics
    #[arg(short, long)]
    pub quiet: bool,
}

impl CheckArgs {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.group_by_language {
            OutputFormat::Grouped
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check locale files, substitutions and locale registrations against the baseline
    Check(CheckArgs),
    /// Initialize a new .checklocrc.json configuration file
    Init,
}
