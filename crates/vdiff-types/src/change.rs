use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::node::JsonNode;
use crate::path::JsonPath;

/// The kind of a structural difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Present only in the new tree.
    Added,
    /// Present only in the old tree.
    Removed,
    /// Same kind on both sides, different value.
    Changed,
    /// Different node kinds on each side.
    TypeChanged,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
            Self::TypeChanged => "type_changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One difference between two JSON trees.
///
/// Built through the per-kind constructors, which guarantee that `Added`
/// carries no old value, `Removed` carries no new value, and the two
/// modification kinds carry both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub path: JsonPath,
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub old_value: Option<JsonNode>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub new_value: Option<JsonNode>,
}

// A present field is `Some` even when it holds JSON `null`; only an absent
// field is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<JsonNode>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonNode::deserialize(deserializer).map(Some)
}

impl ChangeRecord {
    pub fn added(path: JsonPath, value: JsonNode) -> Self {
        Self {
            path,
            kind: ChangeKind::Added,
            old_value: None,
            new_value: Some(value),
        }
    }

    pub fn removed(path: JsonPath, value: JsonNode) -> Self {
        Self {
            path,
            kind: ChangeKind::Removed,
            old_value: Some(value),
            new_value: None,
        }
    }

    pub fn changed(path: JsonPath, old: JsonNode, new: JsonNode) -> Self {
        Self {
            path,
            kind: ChangeKind::Changed,
            old_value: Some(old),
            new_value: Some(new),
        }
    }

    pub fn type_changed(path: JsonPath, old: JsonNode, new: JsonNode) -> Self {
        Self {
            path,
            kind: ChangeKind::TypeChanged,
            old_value: Some(old),
            new_value: Some(new),
        }
    }

    /// Whether the value fields agree with `kind`.
    ///
    /// Records made by the constructors always are; this matters for
    /// records deserialized from outside.
    pub fn is_well_formed(&self) -> bool {
        match self.kind {
            ChangeKind::Added => self.old_value.is_none() && self.new_value.is_some(),
            ChangeKind::Removed => self.old_value.is_some() && self.new_value.is_none(),
            ChangeKind::Changed | ChangeKind::TypeChanged => {
                self.old_value.is_some() && self.new_value.is_some()
            }
        }
    }

    /// The record describing the opposite direction (new → old).
    pub fn inverted(&self) -> Self {
        let kind = match self.kind {
            ChangeKind::Added => ChangeKind::Removed,
            ChangeKind::Removed => ChangeKind::Added,
            other => other,
        };
        Self {
            path: self.path.clone(),
            kind,
            old_value: self.new_value.clone(),
            new_value: self.old_value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_are_well_formed() {
        let path = JsonPath::root().key("a");
        assert!(ChangeRecord::added(path.clone(), 1i64.into()).is_well_formed());
        assert!(ChangeRecord::removed(path.clone(), 1i64.into()).is_well_formed());
        assert!(ChangeRecord::changed(path.clone(), 1i64.into(), 2i64.into()).is_well_formed());
        assert!(ChangeRecord::type_changed(path, 1i64.into(), "1".into()).is_well_formed());
    }

    #[test]
    fn malformed_record_detected() {
        let record = ChangeRecord {
            path: JsonPath::root(),
            kind: ChangeKind::Added,
            old_value: Some(JsonNode::Null),
            new_value: None,
        };
        assert!(!record.is_well_formed());
    }

    #[test]
    fn inversion_swaps_sides() {
        let added = ChangeRecord::added(JsonPath::root().key("city"), "NYC".into());
        let inverted = added.inverted();
        assert_eq!(inverted.kind, ChangeKind::Removed);
        assert_eq!(inverted.old_value, Some("NYC".into()));
        assert!(inverted.new_value.is_none());
        assert_eq!(inverted.inverted(), added);
    }

    #[test]
    fn serialized_shape() {
        let record = ChangeRecord::added(JsonPath::root().key("city"), "NYC".into());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"path": ["city"], "kind": "added", "new_value": "NYC"})
        );
    }

    #[test]
    fn null_value_survives_round_trip() {
        let record = ChangeRecord::removed(JsonPath::root().key("gone"), JsonNode::Null);
        let text = serde_json::to_string(&record).unwrap();
        let back: ChangeRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
        assert!(back.is_well_formed());
    }
}
