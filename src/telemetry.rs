//! Telemetry helpers for applications embedding `chart-axis`.
//!
//! Axis layout logs its tick search and trimming decisions through `tracing`
//! (`chart_axis::api` targets). Nothing is installed implicitly: call
//! `init_default_tracing` or wire your own subscriber, then raise the filter
//! to `trace` to follow every tick-count iteration.

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter comes from `RUST_LOG` and falls back to `info`.
/// Returns `false` when the feature is disabled or the host application
/// already owns the global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
