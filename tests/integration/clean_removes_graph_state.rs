//! Library-level test mirroring `redo clean`'s call sequence
//! (`commands::clean::execute`), grounded the same way that command is:
//! `original_source/db.go`'s `File.Delete`.

use redoer::deps::{self, Change};
use redoer::engine::{Context, Engine};
use redoer::metadata::Metadata;
use redoer::target::TargetRef;

use super::helpers::init_project;

#[test]
fn clean_erases_metadata_and_tears_down_both_directions_of_its_edges() -> anyhow::Result<()> {
    let project = init_project();
    std::fs::write(project.path().join("base"), "v1").unwrap();
    std::fs::write(project.path().join("app.do"), "echo -n built\n").unwrap();

    let engine = Engine::open(project.path())?;
    let ctx = Context::default();
    let app = TargetRef::resolve(project.path(), "app")?;
    let base = TargetRef::resolve(project.path(), "base")?;

    redoer::engine::redo(&engine, &app, &ctx)?;
    redoer::engine::redo_if_change(&engine, &base, &app, &ctx)?;
    assert_eq!(deps::prerequisites_of(engine.store_for(&app), app.id_hash().as_str())?.len(), 1);

    let store = engine.store_for(&base);
    let id = base.id_hash().as_str();

    // Mirrors `commands::clean::execute`'s call sequence exactly, down to
    // notifying with `Change::Created` on a deletion.
    deps::notify_dependents(store, id, Change::Created)?;
    deps::delete_all_prerequisites(store, id)?;
    deps::delete_all_dependents(store, id)?;
    Metadata::erase(store, id)?;
    deps::clear_must_rebuild(store, id)?;

    assert!(Metadata::load(store, id)?.is_none());
    assert!(deps::dependents_of(store, id)?.is_empty());

    // `base`'s edge into `app` was an `IfChange` edge, not `IfCreate`, so the
    // `Change::Created` notification above does not flag `app`; the edge
    // itself is gone either way once `delete_all_dependents` runs.
    assert!(deps::prerequisites_of(engine.store_for(&app), app.id_hash().as_str())?.is_empty());
    Ok(())
}
