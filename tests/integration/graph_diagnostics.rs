//! Library-level test of the `redo graph show`/`redo graph show --check`
//! diagnostic against a real build and against a hand-constructed cycle.

use redoer::deps;
use redoer::engine::{Context, Engine};
use redoer::graph;
use redoer::store::Event;
use redoer::target::TargetRef;

use super::helpers::init_project;

#[test]
fn show_reports_the_auto_ifchange_edge_to_the_do_file() {
    let project = init_project();
    std::fs::write(project.path().join("hello.do"), "echo -n hi\n").unwrap();

    let engine = Engine::open(project.path()).unwrap();
    let target = TargetRef::resolve(project.path(), "hello").unwrap();
    redoer::engine::redo(&engine, &target, &Context::default()).unwrap();

    let rendered = graph::show(&engine, &target).unwrap();
    assert!(rendered.contains("hello.do"));
    assert!(rendered.contains("AUTO_IFCHANGE") || rendered.to_lowercase().contains("auto_ifchange"));
}

#[test]
fn check_passes_on_a_real_build_and_fails_on_a_hand_built_cycle() {
    let project = init_project();
    std::fs::write(project.path().join("hello.do"), "echo -n hi\n").unwrap();

    let engine = Engine::open(project.path()).unwrap();
    let target = TargetRef::resolve(project.path(), "hello").unwrap();
    redoer::engine::redo(&engine, &target, &Context::default()).unwrap();

    graph::check(&engine).expect("a real, acyclic build graph must pass the check");

    let a = TargetRef::resolve(project.path(), "a").unwrap();
    let b = TargetRef::resolve(project.path(), "b").unwrap();
    deps::record_relation(
        engine.store_for(&a),
        a.id_hash().as_str(),
        a.rel_path(),
        Event::IfChange,
        b.id_hash().as_str(),
        b.rel_path(),
        None,
    )
    .unwrap();
    deps::record_relation(
        engine.store_for(&b),
        b.id_hash().as_str(),
        b.rel_path(),
        Event::IfChange,
        a.id_hash().as_str(),
        a.rel_path(),
        None,
    )
    .unwrap();

    let err = graph::check(&engine).unwrap_err();
    assert!(err.to_string().to_lowercase().contains("cycle"));
}
