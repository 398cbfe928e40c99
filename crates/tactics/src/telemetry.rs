use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogConfig, LogFormat};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `config.level`, but `config.level` must parse either way. Fails if a
/// global subscriber is already set.
pub fn init_tracing(config: &LogConfig) -> Result<()> {
    let configured = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log filter {:?}", config.level))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or(configured);

    let builder = fmt().with_env_filter(filter).with_target(false);
    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| anyhow!("Failed to install tracing subscriber: {err}"))
}
