use std::fs::OpenOptions;

use anyhow::{Context, Result};
use tracing::{Level, level_filters::LevelFilter};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::{Layer, fmt, registry};

use crate::args::Args;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Install the console and file loggers
///
/// # Arguments
///
/// * `args` - command line arguments
pub fn init_log(args: &Args) -> Result<()> {
    let log_level = args.log_level.unwrap_or(Level::INFO);

    let filter = Targets::new().with_default(LevelFilter::from_level(log_level));

    // Reports go to stdout, logs to stderr
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_timer(fmt::time::ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_filter(filter.clone());

    let file_writer = OpenOptions::new()
        .write(true)
        .append(args.append_log)
        .truncate(!args.append_log)
        .create(true)
        .open(&args.log_file)
        .with_context(|| format!("failed to open log file {}", args.log_file))?;
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_timer(fmt::time::ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_filter(filter);

    let subscriber = registry().with(console_layer).with(file_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the global logger")?;

    Ok(())
}
