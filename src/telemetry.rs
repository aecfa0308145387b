//! Telemetry helpers for hosts embedding `chart-drawings`.
//!
//! Tracing setup stays explicit and opt-in: call `init_default_tracing` or
//! install your own `tracing` subscriber and filters.

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is
/// enabled. The filter comes from `RUST_LOG` and defaults to `info`.
///
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::init_default_tracing;

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn no_subscriber_without_feature() {
        assert!(!init_default_tracing());
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn second_initialization_is_rejected() {
        let _ = init_default_tracing();
        assert!(!init_default_tracing());
    }
}
