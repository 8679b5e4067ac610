//! Scenario 1 (spec.md §8): basic build installs the script's stdout and
//! records metadata plus a prerequisite edge from the target to its `.do`.

use redoer::deps;
use redoer::engine::Engine;
use redoer::metadata::Metadata;
use redoer::store::Event;
use redoer::target::TargetRef;

use super::helpers::{new_project, run_redo, AssertSuccess};

#[test]
fn basic_build_installs_output_and_records_metadata() {
    let project = new_project();
    std::fs::write(project.path().join("hello.do"), "echo -n hi\n").unwrap();

    run_redo(project.path(), &["hello"]).assert_success("redo hello");

    assert_eq!(std::fs::read(project.path().join("hello")).unwrap(), b"hi");

    let engine = Engine::open(project.path()).unwrap();
    let hello = TargetRef::resolve(project.path(), "hello").unwrap();
    let do_file = TargetRef::resolve(project.path(), "hello.do").unwrap();

    assert!(Metadata::load(engine.store_for(&hello), hello.id_hash().as_str()).unwrap().is_some());
    assert!(Metadata::load(engine.store_for(&do_file), do_file.id_hash().as_str()).unwrap().is_some());

    let prereqs = deps::prerequisites_of(engine.store_for(&hello), hello.id_hash().as_str()).unwrap();
    assert!(prereqs.iter().any(|e| e.event == Event::AutoIfChange && e.prereq_path == "hello.do"));
}
