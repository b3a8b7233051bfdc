use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uapick_core::error::{BoxError, ErrorContext as _};

/// Install the global tracing subscriber, logging to stderr.
///
/// `RUST_LOG` directives take precedence over `default_level`.
pub fn init_tracing(default_level: LevelFilter, json: bool) -> Result<(), BoxError> {
    if json {
        init_structured(default_level)
    } else {
        init_default(default_level)
    }
}

fn env_filter(default_level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy()
}

fn init_default(default_level: LevelFilter) -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .with(env_filter(default_level))
        .try_init()
        .context("try init (default) tracing subscriber")?;

    Ok(())
}

fn init_structured(default_level: LevelFilter) -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(std::io::stderr)
                .json()
                .flatten_event(true),
        )
        .with(env_filter(default_level))
        .try_init()
        .context("try init (structured) tracing subscriber")?;

    Ok(())
}
