//! Scenario 6 (spec.md §8): a `.do` script that writes to both stdout and
//! `$3` violates the output contract and must fail, naming the violation.

use super::helpers::{new_project, run_redo, stderr, AssertSuccess};

#[test]
fn writing_to_both_stdout_and_file3_fails() {
    let project = new_project();
    std::fs::write(
        project.path().join("bad.do"),
        "echo stdout-output\necho file3-output >\"$3\"\n",
    )
    .unwrap();

    let output = run_redo(project.path(), &["bad"]);
    output.assert_failure("redo bad");

    let err = stderr(&output).to_lowercase();
    assert!(
        err.contains("stdout") && err.contains("$3") || err.contains("both"),
        "expected an error naming the stdout/$3 conflict, got: {err}"
    );
    assert!(!project.path().join("bad").exists());
}
