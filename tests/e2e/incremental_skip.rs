//! Scenario 2 (spec.md §8): a second `redo hello` does not re-execute the
//! script, verified by mtime preservation.

use super::helpers::{new_project, run_redo, AssertSuccess};

#[test]
fn second_build_does_not_rerun_script() {
    let project = new_project();
    std::fs::write(project.path().join("hello.do"), "echo -n hi\n").unwrap();

    run_redo(project.path(), &["hello"]).assert_success("first redo hello");
    let mtime_before = std::fs::metadata(project.path().join("hello")).unwrap().modified().unwrap();

    run_redo(project.path(), &["hello"]).assert_success("second redo hello");
    let mtime_after = std::fs::metadata(project.path().join("hello")).unwrap().modified().unwrap();

    assert_eq!(mtime_before, mtime_after);
}
