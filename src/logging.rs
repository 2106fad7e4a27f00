use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Installs the global subscriber. Reads `PI_LOG` (e.g. `PI_LOG=async_pi=debug`),
/// falling back to `async_pi=info`. Output goes to stderr; stdout is reserved
/// for the result line. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("PI_LOG").unwrap_or_else(|_| EnvFilter::new("async_pi=info"));

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
