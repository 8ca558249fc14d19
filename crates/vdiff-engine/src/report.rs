//! Result envelopes returned by the engine operations.

use serde::{Deserialize, Serialize};
use vdiff_json::{ChangeKind, ChangeRecord, JsonDiff, JsonNode};
use vdiff_text::{Similarity, UnifiedDiff};

/// Outcome of a text diff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextDiffReport {
    /// Rendered diff, one entry per output line.
    ///
    /// Unlike difflib's line list, entries carry no line terminators, and
    /// a line that had none in the input is followed by a separate
    /// `\ No newline at end of file` entry.
    pub diff: Vec<String>,
    /// The exact unified-diff text, input terminators preserved.
    pub unified: String,
    pub has_changes: bool,
    pub additions: usize,
    pub deletions: usize,
}

impl From<&UnifiedDiff> for TextDiffReport {
    fn from(diff: &UnifiedDiff) -> Self {
        Self {
            diff: diff.to_lines(),
            unified: diff.to_string(),
            has_changes: !diff.is_empty(),
            additions: diff.additions(),
            deletions: diff.deletions(),
        }
    }
}

/// One structural difference, flattened for transport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonDiffItem {
    /// Dotted path such as `items[0].id`, or `root`.
    pub path: String,
    /// The same location as an RFC 6901 JSON Pointer.
    pub pointer: String,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub old_value: Option<JsonNode>,
    pub new_value: Option<JsonNode>,
}

impl From<ChangeRecord> for JsonDiffItem {
    fn from(record: ChangeRecord) -> Self {
        Self {
            path: record.path.to_string(),
            pointer: record.path.to_pointer(),
            kind: record.kind,
            old_value: record.old_value,
            new_value: record.new_value,
        }
    }
}

/// Outcome of a structural JSON diff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonDiffReport {
    pub differences: Vec<JsonDiffItem>,
    pub has_changes: bool,
    pub total_changes: usize,
}

impl From<JsonDiff> for JsonDiffReport {
    fn from(diff: JsonDiff) -> Self {
        let differences: Vec<JsonDiffItem> = diff.into_iter().map(JsonDiffItem::from).collect();
        Self {
            has_changes: !differences.is_empty(),
            total_changes: differences.len(),
            differences,
        }
    }
}

/// Outcome of a similarity computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    /// Ratio as a percentage, rounded to two decimals.
    pub similarity_percent: f64,
    /// Unrounded ratio in `[0, 1]`.
    pub ratio: f64,
    /// Maximal runs of matching units.
    pub matching_blocks: usize,
    /// Length of the first text in characters.
    pub text1_length: usize,
    /// Length of the second text in characters.
    pub text2_length: usize,
}

impl SimilarityReport {
    pub(crate) fn new(score: &Similarity, text1: &str, text2: &str) -> Self {
        Self {
            similarity_percent: score.percent_rounded(),
            ratio: score.ratio,
            matching_blocks: score.matching_blocks,
            text1_length: text1.chars().count(),
            text2_length: text2.chars().count(),
        }
    }
}
