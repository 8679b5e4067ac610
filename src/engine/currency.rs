//! The recursive currency check and the `ifchange`/`ifcreate` entry points
//! called back into by `.do` scripts -- spec.md §4.5.6, §4.5.7, §4.5.8.
//!
//! Grounded on `original_source/op.go`'s `IsCurrent`, `RedoIfChange`, and
//! `RedoIfCreate`.

use anyhow::Result;
use tracing::trace;

use super::{decision, Context, Engine};
use crate::deps::{self, Event};
use crate::metadata::Metadata;
use crate::target::TargetRef;

/// Resolves a prerequisite edge's recorded path back into a `TargetRef`,
/// rooted at the same project as the dependent that recorded it.
fn resolve_prereq(engine: &Engine, prereq_path: &str) -> Result<TargetRef> {
    TargetRef::resolve(&engine.root_dir, prereq_path)
}

/// `true` iff `target` needs no rebuild: its rebuild flag is clear, its
/// stored metadata exists and matches its live content, every `ifcreate`
/// prerequisite is absent, and every `ifchange` prerequisite is itself
/// current.
pub fn is_current(engine: &Engine, target: &TargetRef) -> Result<bool> {
    let store = engine.store_for(target);
    let id = target.id_hash().as_str();
    let path = target.rel_path();

    if deps::must_rebuild(store, id)? {
        trace!(target_path = path, "not current: rebuild flag set");
        return Ok(false);
    }

    let stored = match Metadata::load(store, id)? {
        Some(m) => m,
        None => {
            trace!(target_path = path, "not current: no stored metadata");
            return Ok(false);
        }
    };

    let live = match Metadata::fingerprint(&target.full_path())? {
        Some(m) => m,
        None => {
            trace!(target_path = path, "not current: target does not exist");
            return Ok(false);
        }
    };
    if !stored.equal(&live) {
        trace!(target_path = path, "not current: content changed since last build");
        return Ok(false);
    }

    for edge in deps::prerequisites_of(store, id)? {
        match edge.event {
            Event::IfCreate | Event::AutoIfCreate => {
                let prereq = resolve_prereq(engine, &edge.prereq_path)?;
                if prereq.full_path().exists() {
                    trace!(target_path = path, prereq = edge.prereq_path.as_str(), "not current: ifcreate prerequisite now exists");
                    return Ok(false);
                }
            }
            Event::IfChange | Event::AutoIfChange => {
                let prereq = resolve_prereq(engine, &edge.prereq_path)?;
                if !is_current(engine, &prereq)? {
                    trace!(target_path = path, prereq = edge.prereq_path.as_str(), "not current: ifchange prerequisite is stale");
                    return Ok(false);
                }
            }
        }
    }

    trace!(target_path = path, "current");
    Ok(true)
}

/// Entry point for `redo-ifchange target`, called from inside a running
/// `.do` script. Rebuilds `target` only if necessary, then records (or
/// refreshes) `dependent`'s snapshot of `target`'s metadata so future calls
/// can short-circuit without even checking currency.
pub fn redo_if_change(engine: &Engine, target: &TargetRef, dependent: &TargetRef, ctx: &Context) -> Result<()> {
    let dependent_store = engine.store_for(dependent);
    let target_store = engine.store_for(target);

    let needs_rebuild = match Metadata::fingerprint(&target.full_path())? {
        None => true,
        Some(_) => !is_current(engine, target)?,
    };

    if !needs_rebuild {
        let snapshot = deps::get_requires(dependent_store, dependent.id_hash().as_str(), Event::IfChange, target.id_hash().as_str())?;
        let live = Metadata::load(target_store, target.id_hash().as_str())?;
        match (snapshot, live) {
            (None, Some(live)) => {
                deps::record_relation(
                    dependent_store,
                    dependent.id_hash().as_str(),
                    dependent.rel_path(),
                    Event::IfChange,
                    target.id_hash().as_str(),
                    target.rel_path(),
                    Some(live),
                )?;
                return Ok(());
            }
            (Some(snap), Some(live)) => {
                let unchanged = snap.metadata.as_ref().map(|m| m.equal(&live)).unwrap_or(false);
                if unchanged {
                    return Ok(());
                }
            }
            _ => {}
        }
    }

    decision::redo(engine, target, ctx)?;

    let refreshed = Metadata::load(engine.store_for(target), target.id_hash().as_str())?;
    deps::record_relation(
        dependent_store,
        dependent.id_hash().as_str(),
        dependent.rel_path(),
        Event::IfChange,
        target.id_hash().as_str(),
        target.rel_path(),
        refreshed,
    )?;
    Ok(())
}

/// Entry point for `redo-ifcreate target`, called from inside a running
/// `.do` script to declare "rebuild me if this currently-absent path is
/// ever created".
pub fn redo_if_create(engine: &Engine, target: &TargetRef, dependent: &TargetRef) -> Result<()> {
    if target.full_path().exists() {
        anyhow::bail!(
            "redo-ifcreate: {} already exists; a script can only declare a currently-absent path",
            target.rel_path()
        );
    }

    Metadata::erase(engine.store_for(target), target.id_hash().as_str())?;

    deps::record_relation(
        engine.store_for(dependent),
        dependent.id_hash().as_str(),
        dependent.rel_path(),
        Event::IfCreate,
        target.id_hash().as_str(),
        target.rel_path(),
        None,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    fn init_project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".redo")).unwrap();
        dir
    }

    #[test]
    fn target_with_no_metadata_is_not_current() {
        let project = init_project();
        let engine = Engine::open(project.path()).unwrap();
        std::fs::write(project.path().join("a.txt"), b"hi").unwrap();
        let target = TargetRef::resolve(project.path(), "a.txt").unwrap();
        assert!(!is_current(&engine, &target).unwrap());
    }

    #[test]
    fn target_current_after_matching_metadata_stored() {
        let project = init_project();
        let engine = Engine::open(project.path()).unwrap();
        let path = project.path().join("a.txt");
        std::fs::write(&path, b"hi").unwrap();
        let target = TargetRef::resolve(project.path(), "a.txt").unwrap();
        let meta = Metadata::capture(&path, None).unwrap();
        meta.store(engine.store_for(&target), target.id_hash().as_str()).unwrap();
        assert!(is_current(&engine, &target).unwrap());
    }

    #[test]
    fn rebuild_flag_forces_not_current() {
        let project = init_project();
        let engine = Engine::open(project.path()).unwrap();
        let path = project.path().join("a.txt");
        std::fs::write(&path, b"hi").unwrap();
        let target = TargetRef::resolve(project.path(), "a.txt").unwrap();
        let meta = Metadata::capture(&path, None).unwrap();
        let store = engine.store_for(&target);
        meta.store(store, target.id_hash().as_str()).unwrap();
        deps::set_must_rebuild(store, target.id_hash().as_str()).unwrap();
        assert!(!is_current(&engine, &target).unwrap());
    }

    #[test]
    fn ifcreate_rejects_existing_path() {
        let project = init_project();
        let engine = Engine::open(project.path()).unwrap();
        std::fs::write(project.path().join("exists.txt"), b"x").unwrap();
        let target = TargetRef::resolve(project.path(), "exists.txt").unwrap();
        let dependent = TargetRef::resolve(project.path(), "caller").unwrap();
        assert!(redo_if_create(&engine, &target, &dependent).is_err());
    }

    #[test]
    fn ifcreate_records_edge_for_absent_path() {
        let project = init_project();
        let engine = Engine::open(project.path()).unwrap();
        let target = TargetRef::resolve(project.path(), "not_yet.txt").unwrap();
        let dependent = TargetRef::resolve(project.path(), "caller").unwrap();
        redo_if_create(&engine, &target, &dependent).unwrap();

        let edges = deps::prerequisites_of(engine.store_for(&dependent), dependent.id_hash().as_str()).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].event, Event::IfCreate);
        assert_eq!(edges[0].prereq_path, "not_yet.txt");
    }
}
