//! `redoer`: a top-down incremental build engine in the `redo` tradition.
//!
//! The library is organized the way `original_source/` separates concerns
//! (`target.go`, `metadata.go`, `prerequisite.go`/`dependent.go`, `keys.go`,
//! `dofile.go`, `op.go`) and the way `loom` separates its CLI surface
//! (`cli/`) from its behavior (library modules called by `commands/`).

pub mod cli;
pub mod commands;
pub mod config;
pub mod deps;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod graph;
pub mod hash;
pub mod locator;
pub mod metadata;
pub mod store;
pub mod target;

use std::path::Path;

use anyhow::{Context, Result};

/// Creates `<dir>/.redo/{data,tmp}`, per spec.md §6's `init` command and
/// §8's idempotence requirement. Grounded on `original_source/op.go`'s
/// `InitDir`; `std::fs::create_dir_all` already makes the operation
/// idempotent, so no existence check is needed ahead of it.
pub fn init(dir: &Path) -> Result<()> {
    let redo_dir = dir.join(target::REDO_DIR);
    std::fs::create_dir_all(redo_dir.join("data"))
        .with_context(|| format!("creating {}", redo_dir.join("data").display()))?;
    std::fs::create_dir_all(redo_dir.join("tmp"))
        .with_context(|| format!("creating {}", redo_dir.join("tmp").display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_data_and_tmp() {
        let dir = tempfile::tempdir().unwrap();
        init(dir.path()).unwrap();
        assert!(dir.path().join(".redo/data").is_dir());
        assert!(dir.path().join(".redo/tmp").is_dir());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        init(dir.path()).unwrap();
        init(dir.path()).unwrap();
        assert!(dir.path().join(".redo/data").is_dir());
    }
}
