//! Structural JSON diff for vdiff.
//!
//! Compares two [`JsonNode`] trees and produces a flat, ordered list of
//! path-keyed [`ChangeRecord`]s. A change set can be applied back onto the
//! old tree to obtain the new one, or reverted from the new tree to obtain
//! the old one.
//!
//! # Key Types
//!
//! - [`JsonDiff`] -- Ordered change records with per-kind counts
//! - [`diff()`] / [`diff_at()`] -- Recursive tree comparison
//! - [`apply()`] / [`revert()`] -- Replay a change set in either direction

pub mod apply;
pub mod differ;
pub mod error;

pub use apply::{apply, revert};
pub use differ::{diff, diff_at, diff_values, JsonDiff};
pub use error::{JsonError, JsonResult};
pub use vdiff_types::{ChangeKind, ChangeRecord, JsonNode, JsonPath, NodeKind, PathSegment};
