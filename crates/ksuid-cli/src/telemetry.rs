//! Log output for the `ksuid` binary.
//!
//! Events go to stderr so they never mix with IDs written to stdout. The
//! filter comes from `RUST_LOG` and defaults to `warn`, which surfaces
//! malformed input reported by the library and nothing else.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber.
pub fn init_tracing() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(fmt::time::ChronoUtc::rfc_3339())
        .init();
}
