//! Tracing setup for embedding hosts
//!
//! The engine itself only emits `tracing` events (weight fallbacks, pool
//! evictions, phrase-bank reloads); hosts that want to see them call one of
//! the init functions here once at startup. The filter honors `RUST_LOG`
//! when set, otherwise the configured level, and switches between pretty
//! terminal output in debug builds and JSON in release builds.

use crate::config::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber at the given level.
///
/// Priority: `RUST_LOG` env var > `log_level` parameter > default "info".
/// Repeated calls are harmless; only the first registration takes effect.
pub fn init_telemetry_with_level(log_level: &str) {
    let default_filter = format!("{},riposte_engine={}", log_level, log_level);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_target(false))
            .try_init()
            .ok();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
            .ok();
    }
}

/// Initialize telemetry at the level named in `[core] log_level`.
///
/// The usual entry point for hosts that already loaded a [`Config`] for the
/// composer.
pub fn init_telemetry_from_config(config: &Config) {
    init_telemetry_with_level(&config.core.log_level);
}

/// Initialize the tracing subscriber at the default "info" level.
pub fn init_telemetry() {
    init_telemetry_with_level("info");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        // a second init must not panic, only the first registration wins
        init_telemetry_with_level("debug");
        init_telemetry();
    }

    #[test]
    fn test_init_from_config_uses_core_level() {
        let mut config = Config::default();
        config.core.log_level = "trace".to_string();
        init_telemetry_from_config(&config);
    }
}
