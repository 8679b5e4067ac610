//! `redo clean TARGET` -- supplemental, SPEC_FULL.md §13. Grounded on
//! `original_source/db.go`'s `File.Delete`.

use std::env;

use anyhow::{Context as _, Result};

use crate::deps::{self, Change};
use crate::engine::Engine;
use crate::metadata::Metadata;
use crate::target::TargetRef;

pub fn execute(target_path: &str) -> Result<()> {
    let cwd = env::current_dir().context("reading current directory")?;
    let target = TargetRef::resolve(&cwd, target_path)?;
    let engine = Engine::open(target.root_dir())?;
    let store = engine.store_for(&target);
    let id = target.id_hash().as_str();

    deps::notify_dependents(store, id, Change::Created)?;
    deps::delete_all_prerequisites(store, id)?;
    deps::delete_all_dependents(store, id)?;
    Metadata::erase(store, id)?;
    deps::clear_must_rebuild(store, id)?;
    Ok(())
}
