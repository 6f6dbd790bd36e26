//! Tracing subscriber setup for the binary

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "movie_finder=info,warn";

/// Initialize the logging system.
///
/// The log level can be controlled via the `RUST_LOG` environment variable;
/// without it, this crate logs at INFO and everything else at WARN.
pub fn init_logging() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;

    Ok(())
}
