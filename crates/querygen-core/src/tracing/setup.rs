//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding a full `EnvFilter` directive string.
pub const LOG_ENV_VAR: &str = "QUERYGEN_LOG";

/// Level used when neither `QUERYGEN_LOG` nor an explicit level is given.
pub const DEFAULT_LEVEL: &str = "info";

/// Initialize the querygen logging system on stderr.
///
/// `QUERYGEN_LOG` wins when set and valid
/// (e.g. `QUERYGEN_LOG=querygen_analysis::sync=debug`). Otherwise the filter
/// is `querygen=<level>`, with `level` defaulting to [`DEFAULT_LEVEL`].
///
/// Calling this more than once is a no-op.
pub fn init_tracing(level: Option<&str>) {
    let fallback = format!("querygen={}", level.unwrap_or(DEFAULT_LEVEL));
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .with(filter)
            .init();
    });
}
