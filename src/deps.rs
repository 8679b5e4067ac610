//! Dependency-graph edges: prerequisites, dependents, and the rebuild flag.
//!
//! Grounded on `original_source/prerequisite.go`, `dependent.go`,
//! `dependents.go`, and `mustrebuild.go`. Every prerequisite edge
//! (dependent requires prereq) is written alongside its mirror dependent
//! edge (prereq satisfies dependent) so that either side of the graph can be
//! walked without a second index.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;
use crate::store::{auto_requires_prefix, rebuild_key, requires_prefix, satisfies_prefix};
use crate::store::{requires_key, satisfies_key, Event, Store};

/// Value stored under a `REQUIRES` key: enough to re-run the currency check
/// without a second lookup against the prerequisite's own target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiresValue {
    pub prereq_path: String,
    /// Present for `IfChange`/`AutoIfChange`; the prerequisite's metadata as
    /// of the moment this edge was recorded.
    pub metadata: Option<Metadata>,
}

/// Value stored under a `SATISFIES` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatisfiesValue {
    pub dependent_path: String,
}

/// A prerequisite edge as returned by [`prerequisites_of`].
#[derive(Debug, Clone)]
pub struct PrerequisiteEdge {
    pub event: Event,
    pub prereq_id: String,
    pub prereq_path: String,
    pub metadata: Option<Metadata>,
}

/// A dependent edge as returned by [`dependents_of`].
#[derive(Debug, Clone)]
pub struct DependentEdge {
    pub event: Event,
    pub dependent_id: String,
    pub dependent_path: String,
}

/// Records that `dependent_id` requires `prereq_id` via `event`, and the
/// mirror-image `SATISFIES` edge. Both directions are written together so a
/// reader walking either side never observes a half-written relation.
pub fn record_relation(
    store: &dyn Store,
    dependent_id: &str,
    dependent_path: &str,
    event: Event,
    prereq_id: &str,
    prereq_path: &str,
    prereq_metadata: Option<Metadata>,
) -> Result<()> {
    let requires_value = serde_json::to_vec(&RequiresValue {
        prereq_path: prereq_path.to_string(),
        metadata: prereq_metadata,
    })?;
    store.put(&requires_key(dependent_id, event, prereq_id), &requires_value)?;

    let satisfies_value = serde_json::to_vec(&SatisfiesValue {
        dependent_path: dependent_path.to_string(),
    })?;
    store.put(&satisfies_key(prereq_id, event, dependent_id), &satisfies_value)?;
    Ok(())
}

/// Looks up a single prerequisite edge directly by key, without a prefix
/// scan. Used by `redo_if_change` to find a dependent's previously-recorded
/// snapshot of one specific prerequisite.
pub fn get_requires(
    store: &dyn Store,
    dependent_id: &str,
    event: Event,
    prereq_id: &str,
) -> Result<Option<RequiresValue>> {
    match store.get(&requires_key(dependent_id, event, prereq_id))? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

fn event_from_segment(s: &str) -> Option<Event> {
    match s {
        "IFCHANGE" => Some(Event::IfChange),
        "IFCREATE" => Some(Event::IfCreate),
        "AUTO_IFCHANGE" => Some(Event::AutoIfChange),
        "AUTO_IFCREATE" => Some(Event::AutoIfCreate),
        _ => None,
    }
}

/// Every prerequisite `dependent_id` currently requires, across all events.
pub fn prerequisites_of(store: &dyn Store, dependent_id: &str) -> Result<Vec<PrerequisiteEdge>> {
    let prefix = requires_prefix(dependent_id);
    let mut out = Vec::new();
    for record in store.scan_prefix(&prefix)? {
        let mut segments = record.key.split('/');
        let _dependent = segments.next();
        let _requires = segments.next();
        let event_seg = segments.next().context("malformed REQUIRES key: missing event")?;
        let prereq_id = segments.next().context("malformed REQUIRES key: missing prereq id")?;
        let event = event_from_segment(event_seg).context("malformed REQUIRES key: unknown event")?;
        let value: RequiresValue = serde_json::from_slice(&record.value)?;
        out.push(PrerequisiteEdge {
            event,
            prereq_id: prereq_id.to_string(),
            prereq_path: value.prereq_path,
            metadata: value.metadata,
        });
    }
    Ok(out)
}

/// Every dependent currently satisfied by (depending on) `prereq_id`.
pub fn dependents_of(store: &dyn Store, prereq_id: &str) -> Result<Vec<DependentEdge>> {
    let prefix = satisfies_prefix(prereq_id);
    let mut out = Vec::new();
    for record in store.scan_prefix(&prefix)? {
        let mut segments = record.key.split('/');
        let _prereq = segments.next();
        let _satisfies = segments.next();
        let event_seg = segments.next().context("malformed SATISFIES key: missing event")?;
        let dependent_id = segments.next().context("malformed SATISFIES key: missing dependent id")?;
        let event = event_from_segment(event_seg).context("malformed SATISFIES key: unknown event")?;
        let value: SatisfiesValue = serde_json::from_slice(&record.value)?;
        out.push(DependentEdge {
            event,
            dependent_id: dependent_id.to_string(),
            dependent_path: value.dependent_path,
        });
    }
    Ok(out)
}

/// Deletes every prerequisite edge `dependent_id` owns, including their
/// reciprocal `SATISFIES` edges.
pub fn delete_all_prerequisites(store: &dyn Store, dependent_id: &str) -> Result<()> {
    for edge in prerequisites_of(store, dependent_id)? {
        store.delete(&requires_key(dependent_id, edge.event, &edge.prereq_id))?;
        store.delete(&satisfies_key(&edge.prereq_id, edge.event, dependent_id))?;
    }
    Ok(())
}

/// Deletes only the automatically-recorded `.do`-candidate edges
/// (`AUTO_IFCHANGE`/`AUTO_IFCREATE`), run at the start of every rebuild so
/// stale candidates from a previous script-location search don't linger.
pub fn delete_auto_prerequisites(store: &dyn Store, dependent_id: &str) -> Result<()> {
    let prefix = auto_requires_prefix(dependent_id);
    for record in store.scan_prefix(&prefix)? {
        let mut segments = record.key.split('/');
        let _dependent = segments.next();
        let _requires = segments.next();
        let event_seg = segments.next().context("malformed REQUIRES key: missing event")?;
        let prereq_id = segments.next().context("malformed REQUIRES key: missing prereq id")?;
        let event = event_from_segment(event_seg).context("malformed REQUIRES key: unknown event")?;
        store.delete(&record.key)?;
        store.delete(&satisfies_key(prereq_id, event, dependent_id))?;
    }
    Ok(())
}

/// Deletes every dependent edge recorded against `prereq_id` (i.e. this
/// target's own `SATISFIES` entries), along with their reciprocal
/// `REQUIRES` edges. Used when a target itself is deleted from the graph.
pub fn delete_all_dependents(store: &dyn Store, prereq_id: &str) -> Result<()> {
    for edge in dependents_of(store, prereq_id)? {
        store.delete(&satisfies_key(prereq_id, edge.event, &edge.dependent_id))?;
        store.delete(&requires_key(&edge.dependent_id, edge.event, prereq_id))?;
    }
    Ok(())
}

/// What happened to a prerequisite, used to pick which dependent event
/// families [`notify_dependents`] wakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The prerequisite's content changed (or it was deleted/rebuilt).
    Changed,
    /// A path that did not previously exist now does.
    Created,
}

/// Flags every dependent watching `prereq_id` for `change` as needing a
/// rebuild. Mirrors `original_source/dependents.go`'s `NotifyDependents`.
pub fn notify_dependents(store: &dyn Store, prereq_id: &str, change: Change) -> Result<()> {
    for edge in dependents_of(store, prereq_id)? {
        let matches = match change {
            Change::Changed => matches!(edge.event, Event::IfChange | Event::AutoIfChange),
            Change::Created => matches!(edge.event, Event::IfCreate | Event::AutoIfCreate),
        };
        if matches {
            set_must_rebuild(store, &edge.dependent_id)?;
        }
    }
    Ok(())
}

pub fn set_must_rebuild(store: &dyn Store, id_hash: &str) -> Result<()> {
    store.put(&rebuild_key(id_hash), b"1")
}

pub fn must_rebuild(store: &dyn Store, id_hash: &str) -> Result<bool> {
    Ok(store.get(&rebuild_key(id_hash))?.is_some())
}

pub fn clear_must_rebuild(store: &dyn Store, id_hash: &str) -> Result<()> {
    store.delete(&rebuild_key(id_hash))
}
