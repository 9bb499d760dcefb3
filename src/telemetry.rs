//! Telemetry helpers for applications embedding `chart-axis-labels`.
//!
//! Label layout emits `tracing` events: phase transitions and renderer
//! selection at `debug`, per-line placement at `trace`. Setup stays explicit
//! and opt-in: call one of the helpers below or wire your own subscriber.

/// Initializes a default `tracing` subscriber filtered at `info`.
///
/// See [`init_tracing_with_default_filter`].
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default_filter("info")
}

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// `RUST_LOG` wins over `default_directive` when set; use
/// `chart_axis_labels=debug` to follow the measure/draw cycle.
///
/// Returns `false` when the feature is disabled, or when the host application
/// already installed a global subscriber.
#[must_use]
pub fn init_tracing_with_default_filter(default_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_directive;
        false
    }
}
