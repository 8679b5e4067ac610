//! The build engine: the top-level decision machine, script execution, and
//! the recursive currency check -- spec.md §4.5.
//!
//! Grounded on `original_source/op.go` (`Redo`, `redoTarget`, `redoStatic`,
//! `RedoIfChange`, `RedoIfCreate`) and `dofile.go` (`RunDoFile`, `runCmd`).
//! The child-process plumbing idiom is taken from `loom`'s
//! `orchestrator/terminal/native/spawner.rs`.

mod currency;
mod decision;
mod exec;

pub use currency::{is_current, redo_if_change, redo_if_create};
pub use decision::redo;
pub use exec::atomic_install;

use std::env;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::store::{null::NullStore, Store};
use crate::store::fs::FsStore;
use crate::target::TargetRef;

static NULL_STORE: NullStore = NullStore;

/// One project's open state: its store, its config, and its root.
pub struct Engine {
    pub root_dir: std::path::PathBuf,
    pub store: FsStore,
    pub config: Config,
}

impl Engine {
    /// Opens the engine for the project rooted at `root_dir`. The project
    /// must already have been `init`ed.
    pub fn open(root_dir: &Path) -> Result<Engine> {
        let redo_dir = root_dir.join(crate::target::REDO_DIR);
        if !redo_dir.is_dir() {
            anyhow::bail!(crate::error::RedoError::Configuration(format!(
                "{} has no .redo/ directory; run `redo init` first",
                root_dir.display()
            )));
        }
        let store = FsStore::open(&redo_dir).context("opening dependency store")?;
        let config = Config::load(root_dir)?;
        Ok(Engine {
            root_dir: root_dir.to_path_buf(),
            store,
            config,
        })
    }

    /// The store backing `target`: the project store for in-project
    /// targets, the shared null store otherwise.
    pub fn store_for(&self, target: &TargetRef) -> &dyn Store {
        if target.is_null() {
            &NULL_STORE
        } else {
            &self.store
        }
    }
}

/// The inter-process context carried via environment variables, per
/// spec.md §5/§6: `REDO_PARENT`, `REDO_DEPTH`, `REDO_PENDING`.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Root-relative path of the target that is this process's reason for
    /// existing, if any (absent only for a top-level `redo TARGET` with no
    /// enclosing script).
    pub parent: Option<String>,
    pub depth: u32,
    pub pending: String,
}

impl Context {
    /// Reads the context this process itself was invoked with.
    pub fn from_env() -> Context {
        Context {
            parent: env::var("REDO_PARENT").ok(),
            depth: env::var("REDO_DEPTH").ok().and_then(|s| s.parse().ok()).unwrap_or(0),
            pending: env::var("REDO_PENDING").unwrap_or_default(),
        }
    }

    /// The context a child process building `target` should be given: it
    /// becomes the new parent, one level deeper, with its id hash appended
    /// to the pending stack.
    pub fn child_for(&self, target: &TargetRef) -> Context {
        Context {
            parent: Some(target.rel_path().to_string()),
            depth: self.depth + 1,
            pending: append_pending(&self.pending, target.id_hash().as_str()),
        }
    }
}

fn append_pending(pending: &str, id_hash: &str) -> String {
    if pending.is_empty() {
        id_hash.to_string()
    } else {
        format!("{pending};{id_hash}")
    }
}

/// `true` if `id_hash` already appears on the pending stack -- a build-time
/// dependency loop. Checked against *this process's own* incoming pending
/// stack, before appending the target about to be built.
pub fn is_loop(pending: &str, id_hash: &str) -> bool {
    !pending.is_empty() && pending.split(';').any(|seg| seg == id_hash)
}
