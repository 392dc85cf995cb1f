use anyhow::Result;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Initialize tracing and logging
///
/// This sets up:
/// - Structured JSON logging (production, or when `json` is set)
/// - Console logging (development)
/// - Environment-based log level filtering, `RUST_LOG` taking precedence
///
/// Logs go to stderr so command output on stdout stays machine readable.
pub fn init_observability(config: &ObservabilityConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let is_production = std::env::var("ENVIRONMENT")
        .map(|env| env == "production")
        .unwrap_or(false);

    if is_production || config.json {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_filter(env_filter),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr)
                    .with_filter(env_filter),
            )
            .try_init()?;
    }

    tracing::debug!(
        service.name = env!("CARGO_PKG_NAME"),
        service.version = env!("CARGO_PKG_VERSION"),
        "Observability initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observability_init_twice() {
        let config = ObservabilityConfig::default();

        let _ = init_observability(&config);

        // A second global subscriber is rejected rather than panicking
        assert!(init_observability(&config).is_err());
    }
}
