//! Telemetry setup
//!
//! Configures structured logging with tracing and tracing-subscriber.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Default filter directive for `level`
pub fn default_filter(level: &str) -> String {
    format!("chatrelay={},tower_http=debug", level)
}

/// Initialize the tracing subscriber
///
/// Only the first call per process takes effect. `RUST_LOG` wins over
/// `default_level` when set.
///
/// ```no_run
/// chatrelay::telemetry::init("info");
/// tracing::info!("Application started");
/// ```
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(default_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_targets_crate_and_tower_http() {
        assert_eq!(default_filter("warn"), "chatrelay=warn,tower_http=debug");
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(default_filter("debug")).is_ok());
    }
}
