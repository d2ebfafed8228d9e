//! Logging setup
//!
//! Library code only emits `tracing` events. Binaries call [`init`] once to
//! install a subscriber.

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Filter used when `RUST_LOG` is unset or invalid
#[must_use]
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug,smtp_hub=trace"
    } else {
        "info"
    }
}

/// Install the global subscriber
///
/// Reads the filter from `RUST_LOG`, falling back to [`default_filter`].
/// Events go to stderr. Debug builds print pretty, human-oriented output;
/// release builds print one JSON object per event.
///
/// # Example
///
/// ```rust,no_run
/// use smtp_hub::observability;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// observability::init()?;
/// tracing::info!("smtp-hub started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()));

    let registry = tracing_subscriber::registry().with(env_filter);

    if cfg!(debug_assertions) {
        registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    }
}
