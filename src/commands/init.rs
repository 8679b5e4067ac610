//! `redo init [DIR...]` -- spec.md §6. Grounded on
//! `original_source/op.go`'s `InitDir`.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Creates `.redo/` under each of `dirs`, or under `$REDO_DIR`, or under the
/// current directory if neither is given.
pub fn execute(dirs: &[String]) -> Result<()> {
    let cwd = env::current_dir().context("reading current directory")?;

    let targets: Vec<PathBuf> = if !dirs.is_empty() {
        dirs.iter().map(PathBuf::from).collect()
    } else if let Some(env_dir) = env::var_os("REDO_DIR") {
        vec![PathBuf::from(env_dir)]
    } else {
        vec![cwd.clone()]
    };

    for dir in targets {
        let abs = if dir.is_absolute() { dir } else { cwd.join(dir) };
        crate::init(&abs).with_context(|| format!("initializing {}", abs.display()))?;
    }
    Ok(())
}
