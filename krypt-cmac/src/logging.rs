//! # Logging
//!
//! The library emits `tracing` events and spans only: constructors and the
//! one-shot helpers carry `debug` spans recording key and data lengths, tag
//! computation logs a `debug` event, and a failed verification logs a `warn`
//! event. Key, subkey, message and tag bytes are never recorded.
//!
//! Binaries and tests that want to see these events can call
//! [`init_tracing`], which installs a compact `tracing-subscriber` formatter
//! filtered by `RUST_LOG` (default `krypt_cmac=info`).
//!
//! ```rust,no_run
//! use krypt_cmac::logging::{init_tracing, sanitize_data};
//!
//! init_tracing().expect("a global subscriber was already set");
//! tracing::info!("authenticating {}", sanitize_data(b"payload"));
//! ```

use std::fmt;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "krypt_cmac=info";

/// Install the global tracing subscriber.
///
/// # Errors
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .try_init()?;

    tracing::info!("krypt-cmac logging initialized");
    Ok(())
}

/// Render byte slices in log messages without revealing their content.
#[must_use]
pub fn sanitize_data(data: &[u8]) -> SanitizedData<'_> {
    SanitizedData(data)
}

/// Display wrapper produced by [`sanitize_data`]; shows only the length.
pub struct SanitizedData<'a>(&'a [u8]);

impl fmt::Display for SanitizedData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} bytes]", self.0.len())
    }
}
