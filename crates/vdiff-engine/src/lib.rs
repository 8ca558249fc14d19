//! Comparison engine for vdiff.
//!
//! Exposes the three operations a transport layer needs, each a pure,
//! synchronous function of its inputs. Nothing is cached or shared between
//! calls, so any number of comparisons can run concurrently without locks.
//!
//! # Operations
//!
//! - [`diff_text`] -- Unified line diff with a configurable context size
//! - [`diff_json`] -- Structural diff of two JSON trees
//! - [`similarity`] -- Character-level similarity percentage

pub mod error;
pub mod ops;
pub mod report;

pub use error::{EngineError, EngineResult};
pub use ops::{
    diff_json, diff_text, diff_text_with, similarity, similarity_with, DEFAULT_CONTEXT_LINES,
};
pub use report::{JsonDiffItem, JsonDiffReport, SimilarityReport, TextDiffReport};

// Re-export the types callers hand in and get back.
pub use vdiff_json::{ChangeKind, ChangeRecord, JsonDiff, JsonNode, JsonPath};
pub use vdiff_text::{Granularity, UnifiedDiff, UnifiedOptions};
