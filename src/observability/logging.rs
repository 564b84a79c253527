//! # Structured Logging
//!
//! Provides the logging subscriber setup and span macros used by the decoder.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Create a tracing span for one decode pass.
///
/// ```rust,ignore
/// let span = decode_span!("declaration");
/// let span = decode_span!("document", key_order = %KeyOrder::Sorted);
/// ```
#[macro_export]
macro_rules! decode_span {
    ($root:expr) => {
        tracing::debug_span!("decode", root = %$root)
    };
    ($root:expr, $($field:tt)*) => {
        tracing::debug_span!("decode", root = %$root, $($field)*)
    };
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false`
/// when a subscriber was already installed (e.g. by a test harness).
pub fn init_logging(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase()));

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let installed = if config.json_logging {
        builder.json().try_init()
    } else {
        builder.with_target(false).try_init()
    };

    installed.is_ok()
}
