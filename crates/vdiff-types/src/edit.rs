use serde::{Deserialize, Serialize};

/// The tag of an [`EditOp`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditTag {
    Equal,
    Insert,
    Delete,
}

/// One step of an edit script turning sequence A into sequence B.
///
/// `Equal` units are present in both, `Delete` units only in A, `Insert`
/// units only in B. Scripts are ordered so that the A-side projection
/// (`Equal` + `Delete`) and the B-side projection (`Equal` + `Insert`)
/// each reproduce their sequence in order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum EditOp<T> {
    Equal(T),
    Insert(T),
    Delete(T),
}

impl<T> EditOp<T> {
    pub fn tag(&self) -> EditTag {
        match self {
            Self::Equal(_) => EditTag::Equal,
            Self::Insert(_) => EditTag::Insert,
            Self::Delete(_) => EditTag::Delete,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Equal(v) | Self::Insert(v) | Self::Delete(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Equal(v) | Self::Insert(v) | Self::Delete(v) => v,
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal(_))
    }

    /// The unit this op contributes to sequence A, if any.
    pub fn before(&self) -> Option<&T> {
        match self {
            Self::Equal(v) | Self::Delete(v) => Some(v),
            Self::Insert(_) => None,
        }
    }

    /// The unit this op contributes to sequence B, if any.
    pub fn after(&self) -> Option<&T> {
        match self {
            Self::Equal(v) | Self::Insert(v) => Some(v),
            Self::Delete(_) => None,
        }
    }

    /// Apply `f` to the payload, keeping the tag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> EditOp<U> {
        match self {
            Self::Equal(v) => EditOp::Equal(f(v)),
            Self::Insert(v) => EditOp::Insert(f(v)),
            Self::Delete(v) => EditOp::Delete(f(v)),
        }
    }
}
