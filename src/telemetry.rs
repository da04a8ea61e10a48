//! Tracing setup for binaries and hosts embedding `chart-lod`.
//!
//! Events are emitted under these targets:
//!
//! * `chart_lod::lod::manager`: `debug` per generated table and removal,
//!   `trace` per decimated level and per selection, `warn` when selection
//!   runs before generation;
//! * `chart_lod::api::series_controller`: `debug` per loaded series, `warn`
//!   when the domain cannot be fitted to a series;
//! * `chart_lod::api::level_selection`: `debug` per level switch uploaded to
//!   the renderer;
//! * `chart_lod::api::navigation`: `trace` for visible range and viewport
//!   changes.
//!
//! `RUST_LOG=chart_lod::api=debug` shows series loads and level switches.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
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
