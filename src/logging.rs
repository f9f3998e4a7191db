//! Diagnostic logging bootstrap
//!
//! Library code only emits `tracing` events; the binary decides where they
//! go. Events are written to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

use crate::error::{CardError, CardResult};

/// Environment variable that overrides the configured filter
pub const LOG_ENV: &str = "CARD_SERVICES_LOG";

/// Build the filter: `CARD_SERVICES_LOG` if set, otherwise `default_directive`
pub fn build_filter(default_directive: &str) -> CardResult<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(value) if !value.trim().is_empty() => EnvFilter::try_new(value.trim())
            .map_err(|e| CardError::Config(format!("Invalid {}: {}", LOG_ENV, e))),
        _ => EnvFilter::try_new(default_directive).map_err(|e| {
            CardError::Config(format!("Invalid log level '{}': {}", default_directive, e))
        }),
    }
}

/// Install the global subscriber
///
/// Calling this more than once is harmless; later calls keep the first
/// subscriber.
pub fn init_logging(default_directive: &str) -> CardResult<()> {
    let filter = build_filter(default_directive)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        assert!(build_filter("warn").is_ok());
        assert!(build_filter("card_services=debug,info").is_ok());
    }

    #[test]
    fn test_init_twice_is_ok() {
        init_logging("warn").unwrap();
        init_logging("debug").unwrap();
    }
}
