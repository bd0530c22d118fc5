//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

const LOG_ENV: &str = "FATEROLL_LOG";
const DEFAULT_FILTER: &str = "fateroll=warn,fateroll_core=warn,fateroll_infrastructure=warn";

/// Installs the global subscriber.
///
/// Reads `FATEROLL_LOG` (e.g. `FATEROLL_LOG=fateroll_core=debug`), falling back
/// to warnings only. Logs go to stderr so command output stays clean.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    });
}
