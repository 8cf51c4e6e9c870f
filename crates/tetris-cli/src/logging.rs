use std::{fs::File, path::Path, sync::Arc};

use anyhow::Context as _;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

/// Where log records go.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LogTarget<'a> {
    /// Nothing is logged (the terminal UI owns stderr).
    Disabled,
    Stderr,
    File(&'a Path),
}

/// Maps the number of `-v` flags to a level: none logs warnings, then info, debug, trace.
pub(crate) fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub(crate) fn init(target: LogTarget<'_>, verbose: u8) -> anyhow::Result<()> {
    let level = level_for_verbosity(verbose);
    let registry = tracing_subscriber::registry().with(LevelFilter::from_level(level));

    match target {
        LogTarget::Disabled => {}
        LogTarget::Stderr => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file: {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .init();
        }
    }
    tracing::debug!(%level, "logging initialized");
    Ok(())
}
