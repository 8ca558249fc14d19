//! Recursive comparison of two JSON trees.
//!
//! Records are emitted in pre-order. Object keys are visited in
//! lexicographic byte order (the iteration order of the object map), so
//! the same pair of trees always yields the same sequence. Arrays are
//! compared position by position; the longer side's tail is reported as
//! whole added or removed elements.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use vdiff_types::{ChangeKind, ChangeRecord, JsonNode, JsonPath};

/// The result of comparing two JSON trees.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonDiff {
    /// The changes, in traversal order.
    pub changes: Vec<ChangeRecord>,
}

impl JsonDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the trees are equal.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn additions(&self) -> usize {
        self.count(ChangeKind::Added)
    }

    pub fn removals(&self) -> usize {
        self.count(ChangeKind::Removed)
    }

    pub fn modifications(&self) -> usize {
        self.count(ChangeKind::Changed)
    }

    pub fn type_changes(&self) -> usize {
        self.count(ChangeKind::TypeChanged)
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }
}

impl IntoIterator for JsonDiff {
    type Item = ChangeRecord;
    type IntoIter = std::vec::IntoIter<ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// Compare two trees from the root.
pub fn diff(old: &JsonNode, new: &JsonNode) -> JsonDiff {
    let changes = diff_at(&JsonPath::root(), old, new);
    debug!(changes = changes.len(), "json diff complete");
    JsonDiff { changes }
}

/// Compare two subtrees, prefixing every record path with `prefix`.
pub fn diff_at(prefix: &JsonPath, old: &JsonNode, new: &JsonNode) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();
    walk(prefix, old, new, &mut changes);
    changes
}

/// Convenience wrapper over [`diff`] for `serde_json` values.
pub fn diff_values(old: &Value, new: &Value) -> JsonDiff {
    diff(&JsonNode::from(old.clone()), &JsonNode::from(new.clone()))
}

fn walk(path: &JsonPath, old: &JsonNode, new: &JsonNode, out: &mut Vec<ChangeRecord>) {
    match (old, new) {
        (JsonNode::Object(a), JsonNode::Object(b)) => walk_objects(path, a, b, out),
        (JsonNode::Array(a), JsonNode::Array(b)) => walk_arrays(path, a, b, out),
        _ if old.kind() != new.kind() => {
            out.push(ChangeRecord::type_changed(path.clone(), old.clone(), new.clone()));
        }
        _ if old != new => {
            out.push(ChangeRecord::changed(path.clone(), old.clone(), new.clone()));
        }
        _ => {}
    }
}

fn walk_objects(
    path: &JsonPath,
    old: &BTreeMap<String, JsonNode>,
    new: &BTreeMap<String, JsonNode>,
    out: &mut Vec<ChangeRecord>,
) {
    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
    for key in keys {
        let child = path.child(key.as_str());
        match (old.get(key), new.get(key)) {
            (Some(a), Some(b)) => walk(&child, a, b, out),
            (Some(a), None) => out.push(ChangeRecord::removed(child, a.clone())),
            (None, Some(b)) => out.push(ChangeRecord::added(child, b.clone())),
            (None, None) => {}
        }
    }
}

fn walk_arrays(path: &JsonPath, old: &[JsonNode], new: &[JsonNode], out: &mut Vec<ChangeRecord>) {
    let shared = old.len().min(new.len());
    for (idx, (a, b)) in old.iter().zip(new).enumerate() {
        walk(&path.child(idx), a, b, out);
    }
    for (idx, a) in old.iter().enumerate().skip(shared) {
        out.push(ChangeRecord::removed(path.child(idx), a.clone()));
    }
    for (idx, b) in new.iter().enumerate().skip(shared) {
        out.push(ChangeRecord::added(path.child(idx), b.clone()));
    }
}
