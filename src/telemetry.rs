//! Opt-in `tracing` setup for report generators embedding `chart-options`.
//!
//! Record materialization logs at `trace`, axis layout at `debug`, and
//! skipped layout or schema properties at `warn`. Hosts that already install
//! a subscriber can ignore this module.

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "CHART_OPTIONS_LOG";

/// Directives used when neither environment variable is set.
pub const DEFAULT_DIRECTIVES: &str = "warn";

/// Installs a compact global subscriber filtered by `CHART_OPTIONS_LOG`,
/// then `RUST_LOG`, then [`DEFAULT_DIRECTIVES`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_DIRECTIVES));
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Installs a compact global subscriber with explicit filter `directives`,
/// such as `"chart_options::plot=debug"`.
///
/// Returns `false` when the `telemetry` feature is disabled, the directives
/// do not parse, or a global subscriber is already installed.
#[must_use]
pub fn init_tracing_with_directives(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        return match tracing_subscriber::EnvFilter::try_new(directives) {
            Ok(filter) => install(filter),
            Err(_) => false,
        };
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
