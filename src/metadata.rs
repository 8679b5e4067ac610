//! Target metadata: the fingerprint recorded after a successful build.
//!
//! Grounded on `original_source/metadata.go`. The original compares
//! `Size`/`ModTime`/`ContentHash`/`DoFile` for equality; spec.md §9 resolves
//! the ambiguity explicitly in favor of content-hash-only equality, so
//! `size` and `mtime` are retained here purely for `redo graph show`
//! diagnostics and are never consulted by [`Metadata::equal`].

use std::path::Path;
use std::time::SystemTime;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::hash::Hash;
use crate::store::{metadata_key, Store};

/// A target's recorded fingerprint as of its last successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub content_hash: Hash,
    /// Size in bytes at capture time. Diagnostic only.
    pub size: u64,
    /// Seconds since the Unix epoch at capture time. Diagnostic only.
    pub mtime: i64,
    /// Root-relative path of the `.do` script that produced this target,
    /// if any (absent for source files with no governing script).
    pub do_file: Option<String>,
}

impl Metadata {
    /// Captures the current on-disk state of `path`, distinguishing "file
    /// does not exist" (`Ok(None)`) from a genuine I/O error (`Err`).
    pub fn fingerprint(path: &Path) -> Result<Option<Metadata>> {
        match std::fs::metadata(path) {
            Ok(_) => Ok(Some(Metadata::capture(path, None)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Captures the current on-disk state of `path` as a `Metadata` record.
    pub fn capture(path: &Path, do_file: Option<String>) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        let mtime = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        let content_hash = Hash::of_file(path)?;
        Ok(Metadata {
            content_hash,
            size: meta.len(),
            mtime,
            do_file,
        })
    }

    /// Content-hash-only equality, per spec.md §9's resolution of the
    /// metadata-equality Open Question.
    pub fn equal(&self, other: &Metadata) -> bool {
        self.content_hash == other.content_hash
    }

    pub fn store(&self, store: &dyn Store, id_hash: &str) -> Result<()> {
        let bytes = serde_json::to_vec(self)?;
        store.put(&metadata_key(id_hash), &bytes)
    }

    pub fn load(store: &dyn Store, id_hash: &str) -> Result<Option<Metadata>> {
        match store.get(&metadata_key(id_hash))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn erase(store: &dyn Store, id_hash: &str) -> Result<()> {
        store.delete(&metadata_key(id_hash))
    }
}
