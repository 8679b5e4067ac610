//! Scenario 7 (spec.md §8): when both a `default.do` and a more specific
//! `foo.txt.do` exist, the specific script wins even though `default.do`
//! would fail if it were run.

use super::helpers::{new_project, run_redo, AssertSuccess};

#[test]
fn specific_script_is_preferred_over_default() {
    let project = new_project();
    std::fs::write(project.path().join("default.do"), "exit 1\n").unwrap();
    std::fs::write(project.path().join("foo.txt.do"), "echo -n specific\n").unwrap();

    run_redo(project.path(), &["foo.txt"]).assert_success("redo foo.txt");

    assert_eq!(std::fs::read(project.path().join("foo.txt")).unwrap(), b"specific");
}
