use anyhow::Result;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` drives filtering (default `info,firenet_mock=debug`), `LOG_FORMAT=json`
/// switches stdout to JSON. When `log_dir` is given, a daily rolling file is
/// written next to stdout.
pub fn init_logger(log_dir: Option<&Path>) -> Result<()> {
    let log_level =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,firenet_mock=debug".to_string());

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_new(&log_level)?;

    let file_appender = match log_dir {
        Some(dir) => Some(
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("firenet-mock")
                .filename_suffix("log")
                .build(dir)?,
        ),
        None => None,
    };

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stdout)
                        .with_target(true)
                        .with_level(true)
                        .with_thread_ids(true),
                )
                .with(file_appender.map(|appender| {
                    fmt::layer()
                        .json()
                        .with_writer(appender)
                        .with_target(true)
                        .with_level(true)
                }))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stdout)
                        .with_target(true)
                        .with_level(true),
                )
                .with(file_appender.map(|appender| {
                    fmt::layer()
                        .with_writer(appender)
                        .with_target(true)
                        .with_level(true)
                        .with_ansi(false) // No colors in file
                }))
                .init();
        }
    }

    Ok(())
}
