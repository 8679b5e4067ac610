//! Extension-fallback search for the `.do` script governing a target.
//!
//! Grounded on `original_source/op.go`'s `findDoFile`, generalized from its
//! single-extension example to the full multi-extension peel spec.md's
//! Testable Properties section spells out: for a target named
//! `a.b.c.d.e`, the candidate list is exactly
//! `[a.b.c.d.e.do, default.b.c.d.e.do, default.c.d.e.do, default.d.e.do,
//! default.e.do, default.do]`, tried in each directory from the target's own
//! directory up to (and including) the project root.

use std::path::{Path, PathBuf};

use tracing::trace;

/// The ordered candidate script names for `basename`, peeling one leading
/// extension at a time.
pub fn candidate_names(basename: &str) -> Vec<String> {
    let parts: Vec<&str> = basename.split('.').collect();
    let n = parts.len();
    let mut out = Vec::with_capacity(n + 1);
    out.push(format!("{basename}.do"));
    for k in 1..=n {
        if k < n {
            out.push(format!("default.{}.do", parts[k..].join(".")));
        } else {
            out.push("default.do".to_string());
        }
    }
    out
}

/// Result of a script search: the located `.do` file (if any), and every
/// candidate that was tested and did not exist -- these become `auto/
/// ifcreate` edges so that creating one later triggers a rebuild.
pub struct Located {
    pub do_file: Option<PathBuf>,
    pub tested_missing: Vec<PathBuf>,
}

/// Searches for the `.do` script governing a file named `basename`,
/// starting in `start_dir` and climbing toward `root_dir` inclusive.
pub fn locate(root_dir: &Path, start_dir: &Path, basename: &str) -> Located {
    let names = candidate_names(basename);
    let mut tested_missing = Vec::new();
    let mut dir = start_dir.to_path_buf();

    loop {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() {
                trace!(basename, do_file = %candidate.display(), "found .do script");
                return Located {
                    do_file: Some(candidate),
                    tested_missing,
                };
            }
            tested_missing.push(candidate);
        }

        if dir == root_dir {
            break;
        }
        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => break,
        }
    }

    trace!(basename, tested = tested_missing.len(), "no .do script found");
    Located {
        do_file: None,
        tested_missing,
    }
}
