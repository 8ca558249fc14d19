//! Foundation types for vdiff.
//!
//! This crate provides the value types shared by the text and JSON
//! comparison engines. Every other vdiff crate depends on `vdiff-types`.
//!
//! # Key Types
//!
//! - [`JsonNode`] -- Tagged JSON tree used as a structural comparison target
//! - [`JsonPath`] / [`PathSegment`] -- Location of a node inside a tree
//! - [`ChangeRecord`] / [`ChangeKind`] -- One structural difference
//! - [`EditOp`] -- One step of a sequence edit script

pub mod change;
pub mod edit;
pub mod node;
pub mod path;

pub use change::{ChangeKind, ChangeRecord};
pub use edit::{EditOp, EditTag};
pub use node::{JsonNode, NodeKind};
pub use path::{JsonPath, PathSegment};
