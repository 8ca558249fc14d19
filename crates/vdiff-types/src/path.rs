use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of a [`JsonPath`]: an object key or an array index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        Self::Index(idx)
    }
}

/// Location of a node inside a JSON tree, from the root down.
///
/// Serializes as a plain array of keys and indices, e.g. `["items", 0, "id"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    /// The empty path, addressing the tree root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy of this path extended by `segment`.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment.into());
        Self(segments)
    }

    /// Builder-style [`JsonPath::child`] with an object key.
    pub fn key(self, key: &str) -> Self {
        self.push(PathSegment::Key(key.to_string()))
    }

    /// Builder-style [`JsonPath::child`] with an array index.
    pub fn index(self, idx: usize) -> Self {
        self.push(PathSegment::Index(idx))
    }

    fn push(mut self, segment: PathSegment) -> Self {
        self.0.push(segment);
        self
    }

    /// Split into the parent path and the final segment.
    ///
    /// Returns `None` for the root.
    pub fn split_last(&self) -> Option<(JsonPath, &PathSegment)> {
        let (last, parent) = self.0.split_last()?;
        Some((JsonPath(parent.to_vec()), last))
    }

    /// Render as an RFC 6901 JSON Pointer (`/items/0/id`).
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.0 {
            out.push('/');
            match segment {
                PathSegment::Key(key) => out.push_str(&key.replace('~', "~0").replace('/', "~1")),
                PathSegment::Index(idx) => out.push_str(&idx.to_string()),
            }
        }
        out
    }
}

impl FromIterator<PathSegment> for JsonPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Dotted form: `items[0].id`; the root renders as `root`.
impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("root");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_display() {
        let path = JsonPath::root().key("items").index(0).key("id");
        assert_eq!(path.to_string(), "items[0].id");
        assert_eq!(JsonPath::root().to_string(), "root");
        assert_eq!(JsonPath::root().index(2).to_string(), "[2]");
    }

    #[test]
    fn pointer_escapes_special_characters() {
        let path = JsonPath::root().key("a/b").key("c~d").index(3);
        assert_eq!(path.to_pointer(), "/a~1b/c~0d/3");
        assert_eq!(JsonPath::root().to_pointer(), "");
    }

    #[test]
    fn child_does_not_mutate_parent() {
        let parent = JsonPath::root().key("a");
        let child = parent.child(1usize);
        assert_eq!(parent.len(), 1);
        assert_eq!(child.segments(), &[PathSegment::from("a"), PathSegment::Index(1)]);
    }

    #[test]
    fn split_last_returns_parent() {
        let path = JsonPath::root().key("a").index(4);
        let (parent, last) = path.split_last().unwrap();
        assert_eq!(parent, JsonPath::root().key("a"));
        assert_eq!(last, &PathSegment::Index(4));
        assert!(JsonPath::root().split_last().is_none());
    }

    #[test]
    fn serializes_as_plain_array() {
        let path = JsonPath::root().key("age");
        assert_eq!(serde_json::to_string(&path).unwrap(), r#"["age"]"#);
        let back: JsonPath = serde_json::from_str(r#"["items",0]"#).unwrap();
        assert_eq!(back, JsonPath::root().key("items").index(0));
    }
}
