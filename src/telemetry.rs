//! Telemetry helpers for applications embedding `vizprep`.
//!
//! Each pipeline stage (normalize, grouping, layout, model assembly) emits
//! one `debug!` event with its counts, including skipped dangling edges. The
//! force layout also emits a `trace!` event per iteration with its `alpha`.
//! Nothing is printed unless the host installs a subscriber.

/// Installs a compact subscriber for the events above, behind `telemetry`.
///
/// The filter comes from `RUST_LOG` (for example `vizprep=trace` to follow
/// layout iterations) and falls back to `info`, which keeps the engine silent.
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
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
