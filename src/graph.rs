//! `redo graph show`/`redo graph show --check` -- a read-only diagnostic
//! view over the recorded dependency graph. Supplemental: does not affect
//! any build decision.
//!
//! The per-target listing is grounded on `original_source/prerequisite.go`'s
//! `PrerequisiteRecords` and `dependent.go`'s `DependentFiles`. The offline
//! cycle check is grounded on `loom`'s `plan/graph/cycle.rs` DFS, ported to
//! walk `ifchange`/`auto_ifchange` edges instead of stage dependencies --
//! spec.md §9 is explicit that build-time loop detection must stay the
//! `REDO_PENDING` runtime guard, so this is a separate, additive tool for a
//! human to run against a graph that is already on disk.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};

use crate::deps::{self, PrerequisiteEdge};
use crate::engine::Engine;
use crate::store::{kind, Event, Store};
use crate::target::TargetRef;

/// Renders `target`'s recorded prerequisites and dependents as text.
pub fn show(engine: &Engine, target: &TargetRef) -> Result<String> {
    let store = engine.store_for(target);
    let id = target.id_hash().as_str();

    let mut out = format!("{} ({})\n", target.rel_path(), id);

    out.push_str("  prerequisites:\n");
    let prereqs = deps::prerequisites_of(store, id)?;
    if prereqs.is_empty() {
        out.push_str("    (none)\n");
    }
    for edge in &prereqs {
        out.push_str(&format!("    {:<14} {}\n", edge.event.as_str(), edge.prereq_path));
    }

    out.push_str("  dependents:\n");
    let dependents = deps::dependents_of(store, id)?;
    if dependents.is_empty() {
        out.push_str("    (none)\n");
    }
    for edge in &dependents {
        out.push_str(&format!("    {:<14} {}\n", edge.event.as_str(), edge.dependent_path));
    }

    Ok(out)
}

/// Every `REQUIRES` record in the project store, grouped by dependent id
/// hash. Used both by the whole-project dump and the cycle check.
fn all_requires(engine: &Engine) -> Result<HashMap<String, Vec<PrerequisiteEdge>>> {
    let mut by_dependent: HashMap<String, Vec<PrerequisiteEdge>> = HashMap::new();
    let mut seen = HashSet::new();
    for record in engine.store.scan_prefix("")? {
        let mut segments = record.key.split('/');
        let dependent_id = match segments.next() {
            Some(s) => s,
            None => continue,
        };
        if segments.next() != Some(kind::REQUIRES) {
            continue;
        }
        if !seen.insert(dependent_id.to_string()) {
            continue;
        }
        let edges = deps::prerequisites_of(&engine.store, dependent_id)?;
        by_dependent.insert(dependent_id.to_string(), edges);
    }
    Ok(by_dependent)
}

/// Dumps every recorded `dependent -> prerequisite` edge in the project.
pub fn show_all(engine: &Engine) -> Result<String> {
    let mut out = String::new();
    for (dependent_id, edges) in all_requires(engine)? {
        out.push_str(&format!("{dependent_id}\n"));
        for edge in edges {
            out.push_str(&format!("  {:<14} {}\n", edge.event.as_str(), edge.prereq_path));
        }
    }
    Ok(out)
}

/// Offline DFS cycle check over `ifchange`/`auto_ifchange` edges (the only
/// edges that matter for "does rebuilding T eventually require rebuilding T
/// again"). `ifcreate`/`auto_ifcreate` edges are existence guards, not
/// rebuild ordering, and are excluded.
pub fn check(engine: &Engine) -> Result<()> {
    let by_dependent = all_requires(engine)?;
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for node in by_dependent.keys() {
        if !visited.contains(node) {
            if let Some(cycle) = dfs_find_cycle(&by_dependent, node, &mut visited, &mut rec_stack, &mut path) {
                bail!("dependency cycle detected: {}", cycle.join(" -> "));
            }
        }
    }
    Ok(())
}

fn dfs_find_cycle(
    by_dependent: &HashMap<String, Vec<PrerequisiteEdge>>,
    node: &str,
    visited: &mut HashSet<String>,
    rec_stack: &mut HashSet<String>,
    path: &mut Vec<String>,
) -> Option<Vec<String>> {
    visited.insert(node.to_string());
    rec_stack.insert(node.to_string());
    path.push(node.to_string());

    if let Some(edges) = by_dependent.get(node) {
        for edge in edges {
            if !matches!(edge.event, Event::IfChange | Event::AutoIfChange) {
                continue;
            }
            let next = edge.prereq_id.as_str();
            if !visited.contains(next) {
                if let Some(cycle) = dfs_find_cycle(by_dependent, next, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(next) {
                let mut cycle = vec![next.to_string()];
                for p in path.iter().rev() {
                    cycle.push(p.clone());
                    if p == next {
                        break;
                    }
                }
                cycle.reverse();
                return Some(cycle);
            }
        }
    }

    path.pop();
    rec_stack.remove(node);
    None
}
