//! Shared fixtures for library-level integration tests: these call
//! `redoer`'s engine directly rather than spawning the built binaries.

use tempfile::TempDir;

/// A fresh project directory with `.redo/` already present.
pub fn init_project() -> TempDir {
    let dir = TempDir::new().expect("creating temp project dir");
    redoer::init(dir.path()).expect("initializing project");
    dir
}
