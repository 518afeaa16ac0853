use crate::args::{Args, Command, Format};
use crate::report::Report;
use clap::Parser;
use ember_parsing::{analyze, EXAMPLE_SOURCE};
use eyre::WrapErr;
use std::io::{self, stdin, stdout, Read};
use std::path::Path;
use std::process::ExitCode;
use tracing::metadata::LevelFilter;
use tracing::{debug, info, trace};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

mod args;
mod report;

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting emberc with args: {args:?}");
    debug!("emberc version: {}", env!("CARGO_PKG_VERSION"));

    match &args.command {
        Command::Example => {
            print!("{EXAMPLE_SOURCE}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze { format, .. } => {
            let src = read_source(args.command.input())?;
            let report = Report::new(&src, analyze(&src));
            let stdout = stdout().lock();
            match format {
                Format::Json => report.write_json(stdout)?,
                Format::Pretty => report.write_pretty(stdout)?,
            }
            if report.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// Reads the whole file, or all of stdin when there's no file
fn read_source(file: Option<&Path>) -> eyre::Result<String> {
    match file {
        Some(path) => {
            info!("reading source from {path:?}");
            std::fs::read_to_string(path)
                .wrap_err_with(|| format!("could not read {}", path.display()))
        }
        None => {
            info!("reading source from stdin");
            let mut src = String::new();
            stdin()
                .read_to_string(&mut src)
                .wrap_err("could not read stdin")?;
            Ok(src)
        }
    }
}

/// Logs always go to stderr, stdout only carries the report
fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().with_target(false))
                .with_writer(io::stderr)
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
