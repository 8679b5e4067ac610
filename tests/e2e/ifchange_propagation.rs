//! Scenario 3 (spec.md §8): `redo-ifchange` called from inside a `.do`
//! script causes the dependent to rebuild when the prerequisite's content
//! changes. `list` is a hand-maintained source file with no governing `.do`
//! script, the same role it plays in the upstream redo test suite this
//! scenario is drawn from -- a file *with* a `.do` script is derived, and a
//! hand edit to it would simply be overwritten on the next rebuild.

use super::helpers::{new_project, run_redo, AssertSuccess};

#[test]
fn dependent_rebuilds_when_prerequisite_content_changes() {
    let project = new_project();
    std::fs::write(project.path().join("list"), "banana\napple\ncherry\n").unwrap();
    std::fs::write(project.path().join("sorted.do"), "redo-ifchange list\nsort <list\n").unwrap();

    run_redo(project.path(), &["sorted"]).assert_success("first redo sorted");
    assert_eq!(
        std::fs::read_to_string(project.path().join("sorted")).unwrap(),
        "apple\nbanana\ncherry\n"
    );

    std::fs::write(project.path().join("list"), "boom\n").unwrap();
    run_redo(project.path(), &["sorted"]).assert_success("second redo sorted");
    assert_eq!(std::fs::read_to_string(project.path().join("sorted")).unwrap(), "boom\n");
}
