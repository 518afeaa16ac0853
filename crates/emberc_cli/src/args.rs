//! the args for running emberc

use clap::{ArgAction, Args as ClapArgs, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Scans and validates ember source code")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan and validate a source file, then print its tokens, comments and verdict
    Analyze {
        /// The source file to analyze. Reads from stdin when absent or `-`
        #[clap(value_name = "source file", value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// How the report is printed
        #[clap(short, long, value_enum, default_value_t = Format::Json, env = "EMBERC_FORMAT")]
        format: Format,
    },
    /// Print an example program that the grammar accepts
    Example,
}

impl Command {
    /// The file to read source from, `None` meaning stdin
    pub fn input(&self) -> Option<&Path> {
        match self {
            Command::Analyze { file: Some(file), .. } if file != Path::new("-") => Some(file),
            _ => None,
        }
    }
}

/// Report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// The `{"success", "tokens", "comments", "parse"}` object
    Json,
    /// A table of tokens and comments, and the verdict pointing into the source
    Pretty,
}

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, ClapArgs)]
pub struct LoggingArgs {
    /// Log more, can be repeated
    #[clap(short = 'v', action = ArgAction::Count, global = true, conflicts_with = "quiet")]
    verbose: u8,
    /// Log less, can be repeated
    #[clap(short = 'q', action = ArgAction::Count, global = true, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// Gets the logging level based on whether `-v[v[v]]` or `-q[q]` has been used. Warnings are
    /// shown by default.
    pub fn log_level_filter(&self) -> LevelFilter {
        let sum = (i16::from(self.verbose) - i16::from(self.quiet)).clamp(-2, 3);
        match sum {
            -2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
