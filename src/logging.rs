//! Diagnostic logging to stderr.
//!
//! Verbosity comes from the `GTD_LOG` environment variable using
//! `tracing_subscriber::EnvFilter` syntax (e.g. `GTD_LOG=debug`). Without it
//! only warnings and errors are shown. Stdout is left to command output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

pub const LOG_ENV_VAR: &str = "GTD_LOG";

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
