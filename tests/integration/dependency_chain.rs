//! Library-level test of `engine::redo_if_change`'s interaction with
//! `engine::is_current` across a hand-maintained prerequisite, without
//! spawning the built binaries.

use redoer::engine::{self, Context, Engine};
use redoer::target::TargetRef;

use super::helpers::init_project;

#[test]
fn currency_propagates_through_a_recorded_ifchange_edge() {
    let project = init_project();
    std::fs::write(project.path().join("base"), "v1").unwrap();
    std::fs::write(project.path().join("app.do"), "echo -n built\n").unwrap();

    let engine = Engine::open(project.path()).unwrap();
    let ctx = Context::default();

    let app = TargetRef::resolve(project.path(), "app").unwrap();
    let base = TargetRef::resolve(project.path(), "base").unwrap();

    engine::redo(&engine, &app, &ctx).unwrap();
    engine::redo_if_change(&engine, &base, &app, &ctx).unwrap();

    assert!(engine::is_current(&engine, &app).unwrap());

    std::fs::write(project.path().join("base"), "v2").unwrap();
    assert!(!engine::is_current(&engine, &base).unwrap());
    assert!(
        !engine::is_current(&engine, &app).unwrap(),
        "app depends on base via ifchange, so it must go stale when base changes"
    );
}

#[test]
fn redo_if_change_is_a_no_op_on_a_second_call_with_no_change() {
    let project = init_project();
    std::fs::write(project.path().join("base"), "v1").unwrap();
    std::fs::write(project.path().join("app.do"), "echo -n built\n").unwrap();

    let engine = Engine::open(project.path()).unwrap();
    let ctx = Context::default();
    let app = TargetRef::resolve(project.path(), "app").unwrap();
    let base = TargetRef::resolve(project.path(), "base").unwrap();

    engine::redo(&engine, &app, &ctx).unwrap();
    engine::redo_if_change(&engine, &base, &app, &ctx).unwrap();
    engine::redo_if_change(&engine, &base, &app, &ctx).unwrap();

    assert!(engine::is_current(&engine, &app).unwrap());
}
