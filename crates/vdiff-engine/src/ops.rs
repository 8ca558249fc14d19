//! The three engine operations.

use tracing::debug;
use vdiff_json::JsonNode;
use vdiff_text::{text_similarity, unified_diff, Granularity, UnifiedOptions};

use crate::error::EngineResult;
use crate::report::{JsonDiffReport, SimilarityReport, TextDiffReport};

/// Context lines used when the caller does not choose.
pub const DEFAULT_CONTEXT_LINES: i64 = 3;

const OLD_LABEL: &str = "text1";
const NEW_LABEL: &str = "text2";

/// Line-diff two texts.
///
/// Fails with [`EngineError::InvalidArgument`](crate::EngineError) when
/// `context_lines` is negative.
pub fn diff_text(text1: &str, text2: &str, context_lines: i64) -> EngineResult<TextDiffReport> {
    let options = UnifiedOptions::with_context(context_lines)?.labels(OLD_LABEL, NEW_LABEL);
    Ok(diff_text_with(text1, text2, &options))
}

/// Line-diff two texts with fully specified options.
pub fn diff_text_with(text1: &str, text2: &str, options: &UnifiedOptions) -> TextDiffReport {
    let diff = unified_diff(text1, text2, options);
    debug!(
        old_bytes = text1.len(),
        new_bytes = text2.len(),
        hunks = diff.hunks.len(),
        "text diff complete"
    );
    TextDiffReport::from(&diff)
}

/// Structurally diff two JSON trees.
pub fn diff_json(json1: &JsonNode, json2: &JsonNode) -> JsonDiffReport {
    JsonDiffReport::from(vdiff_json::diff(json1, json2))
}

/// Character-level similarity of two texts.
pub fn similarity(text1: &str, text2: &str) -> SimilarityReport {
    similarity_with(text1, text2, Granularity::Chars)
}

/// Similarity of two texts compared at `granularity`.
pub fn similarity_with(text1: &str, text2: &str, granularity: Granularity) -> SimilarityReport {
    let score = text_similarity(text1, text2, granularity);
    debug!(?granularity, ratio = score.ratio, "similarity computed");
    SimilarityReport::new(&score, text1, text2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use proptest::prelude::*;
    use serde_json::json;
    use vdiff_json::{ChangeKind, JsonPath};

    #[test]
    fn single_line_texts_produce_one_hunk() {
        let report = diff_text("hello world", "hello there world", 3).unwrap();
        assert!(report.has_changes);
        assert_eq!(report.additions, 1);
        assert_eq!(report.deletions, 1);
        assert_eq!(
            report.diff,
            vec![
                "--- text1",
                "+++ text2",
                "@@ -1 +1 @@",
                "-hello world",
                "\\ No newline at end of file",
                "+hello there world",
                "\\ No newline at end of file",
            ]
        );
        assert_eq!(report.diff.iter().filter(|l| l.starts_with("@@")).count(), 1);
    }

    #[test]
    fn diff_lines_and_unified_text_agree() {
        let report = diff_text("a\nb", "a\nc", 3).unwrap();
        assert_eq!(
            report.diff,
            vec![
                "--- text1",
                "+++ text2",
                "@@ -1,2 +1,2 @@",
                " a",
                "-b",
                "\\ No newline at end of file",
                "+c",
                "\\ No newline at end of file",
            ]
        );
        let mut joined = report.diff.join("\n");
        joined.push('\n');
        assert_eq!(report.unified, joined);
    }

    #[test]
    fn identical_texts_have_no_output() {
        let report = diff_text("a\nb\n", "a\nb\n", 3).unwrap();
        assert!(!report.has_changes);
        assert!(report.diff.is_empty());
        assert!(report.unified.is_empty());
    }

    #[test]
    fn empty_texts_have_no_output() {
        let report = diff_text("", "", 3).unwrap();
        assert!(report.diff.is_empty());
        assert_eq!(report.additions + report.deletions, 0);
    }

    #[test]
    fn negative_context_is_invalid_argument() {
        let err = diff_text("a", "b", -1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn zero_context_has_only_changed_lines() {
        let report = diff_text("a\nb\nc\n", "a\nX\nc\n", 0).unwrap();
        let body: Vec<_> = report.diff.iter().skip(3).collect();
        assert_eq!(body, vec!["-b", "+X"]);
        assert_eq!(report.diff[2], "@@ -2 +2 @@");
    }

    #[test]
    fn json_scenario() {
        let old = JsonNode::from(json!({"name": "Alice", "age": 30}));
        let new = JsonNode::from(json!({"name": "Alice", "age": 31, "city": "NYC"}));
        let report = diff_json(&old, &new);

        assert!(report.has_changes);
        assert_eq!(report.total_changes, 2);
        let age = &report.differences[0];
        assert_eq!((age.path.as_str(), age.kind), ("age", ChangeKind::Changed));
        assert_eq!(age.old_value, Some(30i64.into()));
        assert_eq!(age.new_value, Some(31i64.into()));
        let city = &report.differences[1];
        assert_eq!((city.path.as_str(), city.kind), ("city", ChangeKind::Added));
        assert_eq!(city.old_value, None);
        assert_eq!(city.new_value, Some("NYC".into()));
        assert_eq!(city.pointer, JsonPath::root().key("city").to_pointer());
    }

    #[test]
    fn json_report_wire_shape() {
        let report = diff_json(&JsonNode::from(json!({"a": 1})), &JsonNode::from(json!({})));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "differences": [
                    {
                        "path": "a",
                        "pointer": "/a",
                        "type": "removed",
                        "old_value": 1,
                        "new_value": null
                    }
                ],
                "has_changes": true,
                "total_changes": 1
            })
        );
    }

    #[test]
    fn similarity_scenario() {
        let first = similarity("the quick brown fox", "the quick red fox");
        assert!(first.ratio > 0.0 && first.ratio < 1.0);
        assert_eq!(first.text1_length, 19);
        assert_eq!(first.text2_length, 17);
        let second = similarity("the quick brown fox", "the quick red fox");
        assert_eq!(first.ratio.to_bits(), second.ratio.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn similarity_boundaries() {
        assert_eq!(similarity("", "").similarity_percent, 100.0);
        assert_eq!(similarity("abc", "abc").ratio, 1.0);
        assert_eq!(similarity("abc", "").ratio, 0.0);
    }

    #[test]
    fn similarity_counts_characters_not_bytes() {
        let report = similarity("héllo", "hello");
        assert_eq!(report.text1_length, 5);
        assert_eq!(report.matching_blocks, 2);
    }

    #[test]
    fn similarity_by_lines() {
        let report = similarity_with("a\nb\n", "a\nc\n", Granularity::Lines);
        assert_eq!(report.ratio, 0.5);
    }

    proptest! {
        #[test]
        fn similarity_is_symmetric(a in "[ab\\n ]{0,30}", b in "[ab\\n ]{0,30}") {
            prop_assert_eq!(similarity(&a, &b).ratio.to_bits(), similarity(&b, &a).ratio.to_bits());
        }

        #[test]
        fn identical_text_yields_no_hunks(t in "[ab\\n]{0,40}", context in 0i64..6) {
            prop_assert!(!diff_text(&t, &t, context).unwrap().has_changes);
        }
    }
}
