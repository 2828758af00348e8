use crate::config::LogFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins; otherwise the crate logs at `level` (debug when verbose).
fn default_filter(level: &str, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { level };
        EnvFilter::new(format!("homepage_widgets={},warn", level))
    })
}

pub fn init_logger(format: LogFormat, level: &str, verbose: bool) {
    match format {
        LogFormat::Compact => init_compact(level, verbose),
        LogFormat::Json => init_json(level, verbose),
    }
}

pub fn init_cli_logger(verbose: bool) {
    init_compact("info", verbose);
}

pub fn init_json_logger(verbose: bool) {
    init_json("info", verbose);
}

fn init_compact(level: &str, verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

fn init_json(level: &str, verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // one object per line for log shippers
        )
        .init();
}
