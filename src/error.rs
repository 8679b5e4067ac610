//! Typed error kinds for the redo engine.
//!
//! Most call sites propagate failures as `anyhow::Result` with `.context(..)`
//! attached at the point of failure, the same way the rest of this crate's
//! call graph does. `RedoError` exists only where a caller needs to branch on
//! the *kind* of failure rather than just display it -- in practice, only at
//! the CLI's exit-code mapping (0 success, 1 generic failure, 2 usage error).

use std::path::PathBuf;

use thiserror::Error;

/// A classified build-engine failure.
#[derive(Debug, Error)]
pub enum RedoError {
    /// The project has no `.redo/` directory where one was required.
    #[error("project not initialized: {0}")]
    Configuration(String),

    /// No `.do` script governs a target that has no source file either.
    #[error("no .do file found for target: {0}")]
    ScriptNotFound(String),

    /// The `.do` script violated the output contract (wrote to both outputs,
    /// wrote nothing, or a task script wrote to `$3`).
    #[error("{target}: {reason}")]
    ScriptContract { target: String, reason: String },

    /// The child `/bin/sh` process exited non-zero.
    #[error("{target}: {command} failed: {status}")]
    ScriptFailed {
        target: String,
        command: String,
        status: String,
    },

    /// `REDO_PENDING` already names this target: a build-time dependency loop.
    #[error("loop detected building {0}: target is already pending higher up the call stack")]
    Loop(String),

    /// A previously-built source file is gone and has no `.do` script to
    /// regenerate it.
    #[error("source file does not exist: {0}")]
    SourceMissing(String),

    /// A stored metadata record names a `.do` script that can no longer be
    /// located.
    #[error("{0}: .do file used to build this target is missing")]
    MissingScript(String),

    /// Usage errors: unknown subcommand, missing `REDO_PARENT`, directory
    /// given as target, etc.
    #[error("usage error: {0}")]
    Usage(String),

    /// Unwrapped filesystem error, tagged with the path that caused it.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RedoError {
    /// Maps this error to the exit code contract in spec.md §6.
    pub fn exit_code(&self) -> i32 {
        match self {
            RedoError::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Walks an `anyhow::Error`'s cause chain looking for a `RedoError`, so the
/// top-level CLI can recover a specific exit code from an otherwise-opaque
/// `anyhow::Result`.
pub fn classify(err: &anyhow::Error) -> Option<&RedoError> {
    err.chain().find_map(|cause| cause.downcast_ref::<RedoError>())
}

/// Exit code to use for an arbitrary `anyhow::Error`, per spec.md §6.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    classify(err).map(RedoError::exit_code).unwrap_or(1)
}
