use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::path::{JsonPath, PathSegment};

/// A JSON tree.
///
/// Objects are kept in a `BTreeMap`, so keys are unique and iterate in
/// lexicographic byte order. Anything walking an object therefore visits
/// keys in the same order on every run.
///
/// Numbers compare by representation: `1` and `1.0` are different nodes,
/// so a diff never hides a change that alters the serialized output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum JsonNode {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<JsonNode>),
    Object(BTreeMap<String, JsonNode>),
}

/// The variant tag of a [`JsonNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

impl JsonNode {
    /// The variant tag of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Null => NodeKind::Null,
            Self::Bool(_) => NodeKind::Bool,
            Self::Number(_) => NodeKind::Number,
            Self::String(_) => NodeKind::String,
            Self::Array(_) => NodeKind::Array,
            Self::Object(_) => NodeKind::Object,
        }
    }

    /// An empty object node.
    pub fn object() -> Self {
        Self::Object(BTreeMap::new())
    }

    /// Returns `true` for arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Look up a direct child by key or index.
    pub fn get(&self, segment: &PathSegment) -> Option<&JsonNode> {
        match (self, segment) {
            (Self::Object(map), PathSegment::Key(key)) => map.get(key),
            (Self::Array(items), PathSegment::Index(idx)) => items.get(*idx),
            _ => None,
        }
    }

    /// Mutable variant of [`JsonNode::get`].
    pub fn get_mut(&mut self, segment: &PathSegment) -> Option<&mut JsonNode> {
        match (self, segment) {
            (Self::Object(map), PathSegment::Key(key)) => map.get_mut(key),
            (Self::Array(items), PathSegment::Index(idx)) => items.get_mut(*idx),
            _ => None,
        }
    }

    /// Follow `path` from this node by repeated key/index lookup.
    pub fn pointer(&self, path: &JsonPath) -> Option<&JsonNode> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.get(segment))
    }
}

impl From<Value> for JsonNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<JsonNode> for Value {
    fn from(node: JsonNode) -> Self {
        match node {
            JsonNode::Null => Value::Null,
            JsonNode::Bool(b) => Value::Bool(b),
            JsonNode::Number(n) => Value::Number(n),
            JsonNode::String(s) => Value::String(s),
            JsonNode::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonNode::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for JsonNode {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for JsonNode {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for JsonNode {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<f64> for JsonNode {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for JsonNode {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for JsonNode {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<JsonNode>> From<Vec<T>> for JsonNode {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for JsonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self.clone()))
    }
}
