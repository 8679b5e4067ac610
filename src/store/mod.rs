//! Persistent dependency graph storage -- spec.md §4.2.
//!
//! A [`Store`] is a flat key/value space scoped to one project's `.redo/`
//! directory. Keys are `/`-separated strings built from a target's id hash
//! plus a record kind, mirroring `original_source/keys.go`'s `makeKey`.
//! Two implementations exist: [`fs::FsStore`], backed by one file per key
//! under `.redo/data/`, and [`null::NullStore`], a no-op sink used for
//! targets outside any project.

pub mod fs;
pub mod null;

use anyhow::Result;

/// Separator joining key segments, matching `original_source/common.go`'s
/// `KEY_SEPARATOR`.
pub const KEY_SEPARATOR: &str = "/";

/// A raw key/value pair as returned by a prefix scan.
#[derive(Debug, Clone)]
pub struct Record {
    pub key: String,
    pub value: Vec<u8>,
}

/// The dependency-graph key/value store.
///
/// Implementations need not provide transactions or ordering; the engine
/// only ever reads a key it just wrote, or scans a prefix it owns outright.
pub trait Store: Send + Sync {
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn delete(&self, key: &str) -> Result<()>;

    /// All records whose key begins with `prefix`, in unspecified order.
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<Record>>;

    /// `true` for the degenerate store attached to targets outside any
    /// project; callers use this to skip recording work entirely rather than
    /// pay for writes nobody will read.
    fn is_null(&self) -> bool {
        false
    }
}

/// Joins key segments with [`KEY_SEPARATOR`], matching `keys.go`'s
/// `makeKey`.
pub fn make_key(parts: &[&str]) -> String {
    parts.join(KEY_SEPARATOR)
}

/// Record kind suffixes, appended to a target's id hash to form a key.
pub mod kind {
    pub const METADATA: &str = "METADATA";
    pub const REBUILD: &str = "REBUILD";
    pub const REQUIRES: &str = "REQUIRES";
    pub const SATISFIES: &str = "SATISFIES";
}

/// The four runtime-dependency events a `.do` script can declare, per
/// spec.md §4.4 and `original_source/event.go`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Declared via `redo-ifchange`: rebuild the dependent if this
    /// prerequisite's content changes.
    IfChange,
    /// Declared via `redo-ifcreate`: rebuild the dependent if this
    /// currently-absent path comes into existence.
    IfCreate,
    /// Recorded automatically for the `.do` script that built the target.
    AutoIfChange,
    /// Recorded automatically for `.do` candidates that were considered
    /// but did not exist, so that creating one later triggers a rebuild.
    AutoIfCreate,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::IfChange => "IFCHANGE",
            Event::IfCreate => "IFCREATE",
            Event::AutoIfChange => "AUTO_IFCHANGE",
            Event::AutoIfCreate => "AUTO_IFCREATE",
        }
    }
}

/// Key for a target's stored [`crate::metadata::Metadata`].
pub fn metadata_key(id_hash: &str) -> String {
    make_key(&[id_hash, kind::METADATA])
}

/// Key for a target's must-rebuild flag.
pub fn rebuild_key(id_hash: &str) -> String {
    make_key(&[id_hash, kind::REBUILD])
}

/// Key recording, under the *dependent*, that it requires `prereq_id` via
/// `event`. The value is the prerequisite's path (and metadata, for
/// `IfChange`), so currency checks don't need a second lookup.
pub fn requires_key(dependent_id: &str, event: Event, prereq_id: &str) -> String {
    make_key(&[dependent_id, kind::REQUIRES, event.as_str(), prereq_id])
}

/// Prefix matching every prerequisite a dependent requires, any event.
pub fn requires_prefix(dependent_id: &str) -> String {
    make_key(&[dependent_id, kind::REQUIRES])
}

/// Prefix matching only the `.do`-file-candidate edges recorded
/// automatically for a dependent (`AUTO_IFCHANGE`/`AUTO_IFCREATE`).
pub fn auto_requires_prefix(dependent_id: &str) -> String {
    make_key(&[dependent_id, kind::REQUIRES, "AUTO"])
}

/// Key recording, under the *prerequisite*, that `dependent_id` is satisfied
/// by (depends on) it via `event`. The mirror image of [`requires_key`];
/// both are written and deleted together.
pub fn satisfies_key(prereq_id: &str, event: Event, dependent_id: &str) -> String {
    make_key(&[prereq_id, kind::SATISFIES, event.as_str(), dependent_id])
}

/// Prefix matching every dependent of a prerequisite, any event.
pub fn satisfies_prefix(prereq_id: &str) -> String {
    make_key(&[prereq_id, kind::SATISFIES])
}
