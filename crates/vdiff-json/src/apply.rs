//! Replaying change sets onto trees.
//!
//! For any two trees `a` and `b`, `apply(a, diff(a, b))` yields `b` and
//! `revert(b, diff(a, b))` yields `a`.

use vdiff_types::{ChangeKind, ChangeRecord, JsonNode, JsonPath, PathSegment};

use crate::error::{JsonError, JsonResult};

/// Write every record's new value into a copy of `base`.
///
/// Additions and modifications are applied in order. Removals are applied
/// afterwards in reverse order, so removing an array tail one index at a
/// time never shifts an index still to be removed.
pub fn apply(base: &JsonNode, changes: &[ChangeRecord]) -> JsonResult<JsonNode> {
    let mut doc = base.clone();
    let mut removals = Vec::new();

    for record in changes {
        if !record.is_well_formed() {
            return Err(JsonError::InconsistentRecord {
                path: record.path.to_string(),
                kind: record.kind,
            });
        }
        match (record.kind, &record.new_value) {
            (ChangeKind::Removed, _) => removals.push(&record.path),
            (ChangeKind::Added, Some(value)) => insert(&mut doc, &record.path, value.clone())?,
            (ChangeKind::Changed | ChangeKind::TypeChanged, Some(value)) => {
                *resolve_mut(&mut doc, &record.path)? = value.clone();
            }
            (kind, None) => {
                return Err(JsonError::InconsistentRecord {
                    path: record.path.to_string(),
                    kind,
                })
            }
        }
    }

    for path in removals.into_iter().rev() {
        remove(&mut doc, path)?;
    }
    Ok(doc)
}

/// Undo `changes` on `target`, recovering the tree they were computed from.
pub fn revert(target: &JsonNode, changes: &[ChangeRecord]) -> JsonResult<JsonNode> {
    let inverted: Vec<ChangeRecord> = changes.iter().map(ChangeRecord::inverted).collect();
    apply(target, &inverted)
}

fn resolve_mut<'a>(doc: &'a mut JsonNode, path: &JsonPath) -> JsonResult<&'a mut JsonNode> {
    let mut node = doc;
    for segment in path.segments() {
        node = node
            .get_mut(segment)
            .ok_or_else(|| JsonError::PathNotFound(path.to_string()))?;
    }
    Ok(node)
}

fn insert(doc: &mut JsonNode, path: &JsonPath, value: JsonNode) -> JsonResult<()> {
    let Some((parent_path, last)) = path.split_last() else {
        *doc = value;
        return Ok(());
    };
    let parent = resolve_mut(doc, &parent_path)?;
    match (parent, last) {
        (JsonNode::Object(map), PathSegment::Key(key)) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        (JsonNode::Array(items), PathSegment::Index(idx)) if *idx <= items.len() => {
            items.insert(*idx, value);
            Ok(())
        }
        (JsonNode::Array(items), PathSegment::Index(idx)) => Err(JsonError::IndexOutOfBounds {
            path: path.to_string(),
            index: *idx,
            len: items.len(),
        }),
        (other, _) => Err(JsonError::NotAContainer {
            path: parent_path.to_string(),
            kind: other.kind(),
        }),
    }
}

fn remove(doc: &mut JsonNode, path: &JsonPath) -> JsonResult<()> {
    let Some((parent_path, last)) = path.split_last() else {
        return Err(JsonError::InconsistentRecord {
            path: path.to_string(),
            kind: ChangeKind::Removed,
        });
    };
    let parent = resolve_mut(doc, &parent_path)?;
    match (parent, last) {
        (JsonNode::Object(map), PathSegment::Key(key)) => map
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| JsonError::PathNotFound(path.to_string())),
        (JsonNode::Array(items), PathSegment::Index(idx)) if *idx < items.len() => {
            items.remove(*idx);
            Ok(())
        }
        (JsonNode::Array(items), PathSegment::Index(idx)) => Err(JsonError::IndexOutOfBounds {
            path: path.to_string(),
            index: *idx,
            len: items.len(),
        }),
        (other, _) => Err(JsonError::NotAContainer {
            path: parent_path.to_string(),
            kind: other.kind(),
        }),
    }
}
