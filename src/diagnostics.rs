//! Diagnostic verbosity plumbing -- spec.md §6's `REDO_VERBOSE`/`REDO_DEBUG`/
//! `REDO_TRACE` knobs, wired to `tracing-subscriber`.
//!
//! The teacher declares `tracing`/`tracing-subscriber` as dependencies but
//! never calls them; this crate actually wires them up, since the build
//! engine's recursive, multi-process nature is exactly the kind of thing
//! `tracing`'s span model is meant for.

use std::env;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber from the redo verbosity
/// environment variables, falling back to `RUST_LOG` and then to a quiet
/// default. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let level = if env::var_os("REDO_TRACE").is_some() {
        Level::TRACE
    } else if env::var_os("REDO_DEBUG").is_some() {
        Level::DEBUG
    } else if env::var_os("REDO_VERBOSE").is_some() {
        Level::INFO
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}

/// The current `REDO_DEPTH`, used only to indent diagnostic output -- never
/// consulted for control flow beyond display.
pub fn depth_indent(depth: u32) -> String {
    "  ".repeat(depth as usize)
}
