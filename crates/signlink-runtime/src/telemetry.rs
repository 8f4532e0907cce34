//! Structured logging setup

use signlink_core::{SignLinkError, SignLinkResult};
use tracing_subscriber::EnvFilter;

use crate::LogConfig;

/// Install the global tracing subscriber.
///
/// Fails if the filter does not parse or a subscriber is already set.
pub fn init_logging(config: &LogConfig) -> SignLinkResult<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| SignLinkError::InvalidConfig(format!("log filter '{}': {}", config.filter, e)))?;

    let result = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    };

    result.map_err(|e| SignLinkError::LoggingInit(e.to_string()))
}
