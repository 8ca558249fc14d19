//! Text comparison engine for vdiff.
//!
//! Splits text into comparison units, aligns two unit sequences with a
//! longest-common-subsequence edit script, and derives both a unified diff
//! and a similarity ratio from that same script.
//!
//! # Key Types
//!
//! - [`Token`] / [`Granularity`] -- Comparison units and the split policy
//! - [`align()`] -- Minimal LCS edit script over any two sequences
//! - [`UnifiedDiff`] / [`Hunk`] / [`HunkLine`] -- Grouped, renderable diff
//! - [`Similarity`] -- Ratio `2·M / (|A| + |B|)` computed from an edit script

pub mod align;
pub mod error;
pub mod similarity;
pub mod tokenizer;
pub mod unified;

pub use align::{align, align_text, new_projection, old_projection, OpCounts};
pub use error::{TextError, TextResult};
pub use similarity::{ratio, ratio_from_ops, text_similarity, Similarity};
pub use tokenizer::{tokenize, Granularity, Token};
pub use unified::{
    group_hunks, unified_diff, Hunk, HunkLine, LineKind, UnifiedDiff, UnifiedOptions,
};
pub use vdiff_types::{EditOp, EditTag};
