//! Shared fixtures for end-to-end tests: a fresh project directory with the
//! crate's own binaries on `PATH`, the same way a real `redo` installation
//! makes `redo-ifchange`/`redo-ifcreate` reachable from inside a `.do`
//! script.

use std::env;
use std::path::PathBuf;
use std::process::Output;

use tempfile::TempDir;

/// Directory containing the binaries built for this test run (all four
/// `[[bin]]` targets land side by side).
fn bin_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_redo"))
        .parent()
        .expect("redo binary has a parent directory")
        .to_path_buf()
}

/// A fresh temp directory, already `redo init`ed.
pub fn new_project() -> TempDir {
    let dir = TempDir::new().expect("creating temp project dir");
    run_redo(dir.path(), &["init"]).assert_success("redo init");
    dir
}

/// Runs the `redo` binary with `args` in `cwd`, with this crate's own
/// binary directory prepended to `PATH` so `.do` scripts can call
/// `redo-ifchange`/`redo-ifcreate` by name.
pub fn run_redo(cwd: &std::path::Path, args: &[&str]) -> Output {
    let path = env::join_paths(
        std::iter::once(bin_dir()).chain(env::var_os("PATH").as_ref().map(|p| env::split_paths(p).collect::<Vec<_>>()).unwrap_or_default()),
    )
    .expect("joining PATH");

    std::process::Command::new(env!("CARGO_BIN_EXE_redo"))
        .args(args)
        .current_dir(cwd)
        .env("PATH", path)
        .output()
        .expect("spawning redo")
}

pub trait AssertSuccess {
    fn assert_success(&self, what: &str) -> &Self;
    fn assert_failure(&self, what: &str) -> &Self;
}

impl AssertSuccess for Output {
    fn assert_success(&self, what: &str) -> &Self {
        assert!(
            self.status.success(),
            "{what} failed: status={:?} stderr={}",
            self.status,
            String::from_utf8_lossy(&self.stderr)
        );
        self
    }

    fn assert_failure(&self, what: &str) -> &Self {
        assert!(!self.status.success(), "{what} unexpectedly succeeded");
        self
    }
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
