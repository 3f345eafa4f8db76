//! Tracing/logging initialization for pantry binaries.

use tracing_subscriber::EnvFilter;

/// Install the process-wide tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Calling this
/// more than once is harmless; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Structured JSON so log pipelines can read fields without parsing
    // message strings.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
