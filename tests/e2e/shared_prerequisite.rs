//! Scenario 4 (spec.md §8): two independent targets governed by the same
//! `default.y.do` both pick up a change to a prerequisite they share.

use super::helpers::{new_project, run_redo, AssertSuccess};

#[test]
fn both_dependents_rebuild_when_shared_prerequisite_changes() {
    let project = new_project();
    std::fs::write(project.path().join("one.x"), "one").unwrap();
    std::fs::write(project.path().join("two.x"), "two").unwrap();
    std::fs::write(project.path().join("shared"), "shared").unwrap();
    std::fs::write(
        project.path().join("default.y.do"),
        "redo-ifchange shared ${1%.y}.x\ncat shared \"${1%.y}.x\" | tr a-z A-Z\n",
    )
    .unwrap();

    run_redo(project.path(), &["one.y", "two.y"]).assert_success("first build");
    assert_eq!(std::fs::read_to_string(project.path().join("one.y")).unwrap(), "SHAREDONE");
    assert_eq!(std::fs::read_to_string(project.path().join("two.y")).unwrap(), "SHAREDTWO");

    std::fs::write(project.path().join("shared"), "boom").unwrap();
    run_redo(project.path(), &["one.y", "two.y"]).assert_success("second build");
    assert_eq!(std::fs::read_to_string(project.path().join("one.y")).unwrap(), "BOOMONE");
    assert_eq!(std::fs::read_to_string(project.path().join("two.y")).unwrap(), "BOOMTWO");
}
