//! Scenario 5 (spec.md §8): a cyclic dependency (`tick` -> `tock` -> `tick`)
//! must fail loudly instead of recursing forever.

use super::helpers::{new_project, run_redo, stderr, AssertSuccess};

#[test]
fn cyclic_targets_are_rejected() {
    let project = new_project();
    std::fs::write(project.path().join("tick.do"), "redo-ifchange tock\n").unwrap();
    std::fs::write(project.path().join("tock.do"), "redo-ifchange tick\n").unwrap();

    let output = run_redo(project.path(), &["tick"]);
    output.assert_failure("redo tick");

    let err = stderr(&output).to_lowercase();
    assert!(
        err.contains("loop") || err.contains("pending"),
        "expected a loop/pending error, got: {err}"
    );
}
