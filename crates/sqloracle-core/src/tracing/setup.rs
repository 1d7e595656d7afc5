//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "SQLORACLE_LOG";

/// Initialize the sqloracle tracing/logging system.
///
/// Reads `SQLORACLE_LOG` for per-crate log levels.
/// Format: `SQLORACLE_LOG=sqloracle_pipeline=debug,sqloracle_storage=warn`
///
/// Falls back to `info` if `SQLORACLE_LOG` is not set or is invalid.
/// Logs go to stderr so stdout stays free for status lines.
///
/// Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(filter)
            .init();
    });
}
