//! Path/identity resolution -- spec.md §4.1.
//!
//! Computes, for a user-supplied path, the project root (nearest ancestor
//! containing `.redo/`), the root-relative path, and a stable identity hash.
//! Files outside any project resolve to a [`TargetRef`] attached to the null
//! store (see [`crate::store::null`]).

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::hash::Hash;

/// Name of the hidden per-project state directory.
pub const REDO_DIR: &str = ".redo";

/// Leading character that marks a target as a task (no tracked output).
pub const TASK_PREFIX: char = '@';

/// The identity of a file relative to a project, per spec.md's `TargetRef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRef {
    /// Absolute path of the nearest ancestor containing `.redo/`, or the
    /// filesystem root if no project was found.
    root_dir: PathBuf,
    /// Path relative to `root_dir`, using `/` as the separator regardless of
    /// platform, so that it can be used verbatim as a store key prefix.
    rel_path: String,
    /// `true` if this ref lives outside any project and is backed by the
    /// null store.
    is_null: bool,
    /// Pure function of `rel_path`; computed once at construction.
    id_hash: Hash,
}

/// Finds the nearest ancestor of `start_dir` (inclusive) containing
/// `.redo/`. `None` if the filesystem root is reached first.
pub fn find_root(start_dir: &Path) -> Option<PathBuf> {
    let mut cursor = start_dir.to_path_buf();
    loop {
        if cursor.join(REDO_DIR).is_dir() {
            return Some(cursor);
        }
        match cursor.parent() {
            Some(parent) if cursor != parent => cursor = parent.to_path_buf(),
            _ => return None,
        }
    }
}

impl TargetRef {
    /// Builds a `TargetRef` directly from an already-known project root and
    /// a root-relative path, with no filesystem search. Used to resolve
    /// `REDO_PARENT`, which is recorded root-relative rather than
    /// cwd-relative.
    pub fn in_project(root_dir: PathBuf, rel_path: String) -> TargetRef {
        let id_hash = Hash::of_str(&rel_path);
        TargetRef {
            root_dir,
            rel_path,
            is_null: false,
            id_hash,
        }
    }

    /// Resolves a user-supplied `path` (absolute or relative to `cwd`) into a
    /// `TargetRef`. Mirrors spec.md §4.1's algorithm exactly.
    pub fn resolve(cwd: &Path, path: &str) -> Result<TargetRef> {
        if path.is_empty() {
            bail!("target path cannot be empty");
        }

        let raw = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            cwd.join(path)
        };
        let cleaned = lexically_clean(&raw);

        if cleaned.is_dir() {
            bail!("target {} is a directory", cleaned.display());
        }

        let basename = cleaned
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("target {} has no file name component", cleaned.display()))?
            .to_string();

        let mut components = vec![basename];
        let mut cursor = cleaned
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        loop {
            if cursor.join(REDO_DIR).is_dir() {
                if cleaned == cursor {
                    bail!("target {} is the project root, not a file", cleaned.display());
                }
                components.reverse();
                let rel_path = components.join("/");
                let id_hash = Hash::of_str(&rel_path);
                return Ok(TargetRef {
                    root_dir: cursor,
                    rel_path,
                    is_null: false,
                    id_hash,
                });
            }

            match cursor.parent() {
                Some(parent) if cursor != parent => {
                    if let Some(name) = cursor.file_name().and_then(|n| n.to_str()) {
                        components.push(name.to_string());
                    }
                    cursor = parent.to_path_buf();
                }
                _ => {
                    // Reached the filesystem root without finding `.redo/`.
                    let rel_path = cleaned.to_string_lossy().into_owned();
                    let id_hash = Hash::of_str(&rel_path);
                    return Ok(TargetRef {
                        root_dir: PathBuf::from("/"),
                        rel_path,
                        is_null: true,
                        id_hash,
                    });
                }
            }
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn rel_path(&self) -> &str {
        &self.rel_path
    }

    pub fn id_hash(&self) -> &Hash {
        &self.id_hash
    }

    pub fn is_null(&self) -> bool {
        self.is_null
    }

    /// Absolute path to the file this ref identifies.
    pub fn full_path(&self) -> PathBuf {
        if self.is_null {
            PathBuf::from(&self.rel_path)
        } else {
            self.root_dir.join(&self.rel_path)
        }
    }

    /// Absolute path to the directory containing the file.
    pub fn dir(&self) -> PathBuf {
        self.full_path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"))
    }

    pub fn basename(&self) -> String {
        self.full_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File extension, including the leading dot. Empty string if none.
    pub fn ext(&self) -> String {
        let name = self.basename();
        match name.find('.') {
            Some(idx) => name[idx..].to_string(),
            None => String::new(),
        }
    }

    /// `true` if the basename begins with `@` -- a task target, run for
    /// side effects with no tracked output (spec.md §4.5.2, §6).
    pub fn is_task(&self) -> bool {
        self.basename().starts_with(TASK_PREFIX)
    }

    /// Expresses `self`'s full path relative to `base` (a directory),
    /// used to compute `$1` when invoking a `.do` script from its own
    /// directory (spec.md §4.5.4).
    pub fn rel_to(&self, base: &Path) -> PathBuf {
        pathdiff(&self.full_path(), base)
    }
}

/// Lexically cleans a path: collapses `.` and resolves `..` against preceding
/// normal components, without touching the filesystem (the path may not
/// exist yet).
fn lexically_clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.into_iter().collect()
}

/// Computes `path` relative to `base`, assuming both are absolute and
/// lexically clean. Falls back to the absolute path if they share no common
/// ancestor (e.g. different drive roots on Windows).
fn pathdiff(path: &Path, base: &Path) -> PathBuf {
    let path_comps: Vec<_> = path.components().collect();
    let base_comps: Vec<_> = base.components().collect();

    let common = path_comps
        .iter()
        .zip(base_comps.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..base_comps.len() {
        result.push("..");
    }
    for comp in &path_comps[common..] {
        result.push(comp.as_os_str());
    }

    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}
