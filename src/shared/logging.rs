//! Logging initialization.
//!
//! Installs a `tracing-subscriber` registry configured from the `logging`
//! section of [`ServiceConfig`](crate::config::ServiceConfig). `RUST_LOG`
//! takes precedence over the configured level.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::shared::Result;

/// Initialize the global tracing subscriber.
///
/// Must be called once, before the first scan is processed. A second call
/// returns an error instead of replacing the installed subscriber.
///
/// # Formats
///
/// * `json` - one JSON object per line (default)
/// * `pretty` - human-readable multi-line output for development
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e)),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
            .map_err(|e| {
                anyhow::anyhow!("failed to initialize pretty tracing subscriber: {}", e)
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails_instead_of_panicking() {
        let config = LoggingConfig::default();
        // The first call may fail if another test already installed a subscriber.
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
