//! Diagnostic channel bootstrap.
//!
//! # Responsibility
//! - Route `log` records to stderr, keeping stdout for rendered output.
//!
//! # Invariants
//! - Initialization never panics; a failed start only loses diagnostics.
//! - `RUST_LOG` takes precedence over the level chosen here.

use flexi_logger::{Logger, LoggerHandle};

const DEFAULT_LEVEL: &str = "warn";
const DEBUG_LEVEL: &str = "debug";

pub(crate) fn level_for(debug: bool) -> &'static str {
    if debug { DEBUG_LEVEL } else { DEFAULT_LEVEL }
}

/// Start the stderr logger. Keep the returned handle alive for the process.
pub(crate) fn init_logging(debug: bool) -> Option<LoggerHandle> {
    let started = Logger::try_with_env_or_str(level_for(debug))
        .and_then(|logger| {
            logger
                .log_to_stderr()
                .format(flexi_logger::default_format)
                .start()
        });
    match started {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: diagnostics disabled ({e})");
            None
        }
    }
}

/// Switch an already running logger to debug level.
pub(crate) fn enable_debug(handle: &LoggerHandle) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    if let Err(e) = handle.parse_new_spec(DEBUG_LEVEL) {
        log::warn!("Failed to raise log level: {e}");
    }
}
