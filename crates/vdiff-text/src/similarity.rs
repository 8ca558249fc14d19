//! Similarity scoring from an edit script.
//!
//! The ratio is `2·M / (|A| + |B|)` where `M` is the number of `Equal` ops
//! of the same alignment the diff uses, so a score and a diff of the same
//! inputs always agree.

use std::hash::Hash;

use serde::{Deserialize, Serialize};
use vdiff_types::EditOp;

use crate::align::{align, align_text, OpCounts};
use crate::tokenizer::Granularity;

/// Similarity of two sequences.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Similarity {
    /// Normalized score in `[0, 1]`.
    pub ratio: f64,
    /// Units matched by the alignment.
    pub matching_units: usize,
    /// Maximal runs of matched units.
    pub matching_blocks: usize,
    pub old_len: usize,
    pub new_len: usize,
}

impl Similarity {
    pub fn from_ops<T>(ops: &[EditOp<T>]) -> Self {
        let counts = OpCounts::of(ops);
        Self {
            ratio: ratio_of(&counts),
            matching_units: counts.equal,
            matching_blocks: counts.matching_blocks,
            old_len: counts.old_len(),
            new_len: counts.new_len(),
        }
    }

    /// The ratio as a percentage.
    pub fn percent(&self) -> f64 {
        self.ratio * 100.0
    }

    /// The percentage rounded to two decimal places.
    pub fn percent_rounded(&self) -> f64 {
        (self.percent() * 100.0).round() / 100.0
    }
}

fn ratio_of(counts: &OpCounts) -> f64 {
    let total = counts.old_len() + counts.new_len();
    if total == 0 {
        // Two empty sequences do not disagree anywhere.
        return 1.0;
    }
    (2 * counts.equal) as f64 / total as f64
}

/// Similarity ratio of the sequences described by `ops`.
pub fn ratio_from_ops<T>(ops: &[EditOp<T>]) -> f64 {
    ratio_of(&OpCounts::of(ops))
}

/// Align `a` and `b` and return their similarity ratio.
pub fn ratio<T>(a: &[T], b: &[T]) -> f64
where
    T: Eq + Hash + Clone,
{
    ratio_from_ops(&align(a, b))
}

/// Score two texts split with `granularity`.
pub fn text_similarity(old: &str, new: &str, granularity: Granularity) -> Similarity {
    Similarity::from_ops(&align_text(old, new, granularity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_vs_empty_is_one() {
        assert_eq!(ratio::<char>(&[], &[]), 1.0);
        assert_eq!(text_similarity("", "", Granularity::Chars).ratio, 1.0);
    }

    #[test]
    fn empty_vs_non_empty_is_zero() {
        assert_eq!(text_similarity("", "abc", Granularity::Chars).ratio, 0.0);
    }

    #[test]
    fn identical_is_one() {
        let s = text_similarity("hello", "hello", Granularity::Chars);
        assert_eq!(s.ratio, 1.0);
        assert_eq!(s.matching_blocks, 1);
        assert_eq!(s.percent_rounded(), 100.0);
    }

    #[test]
    fn partial_overlap_between_zero_and_one() {
        let s = text_similarity("the quick brown fox", "the quick red fox", Granularity::Chars);
        assert!(s.ratio > 0.0 && s.ratio < 1.0);
        assert_eq!(s.old_len, 19);
        assert_eq!(s.new_len, 17);
        let again = text_similarity("the quick brown fox", "the quick red fox", Granularity::Chars);
        assert_eq!(s.ratio.to_bits(), again.ratio.to_bits());
    }

    #[test]
    fn known_ratio() {
        // LCS("abcd", "bcde") = "bcd"
        let s = text_similarity("abcd", "bcde", Granularity::Chars);
        assert_eq!(s.matching_units, 3);
        assert_eq!(s.ratio, 0.75);
        assert_eq!(s.percent(), 75.0);
    }

    #[test]
    fn word_granularity() {
        let s = text_similarity("a b c", "a x c", Granularity::Words);
        // tokens: a, " ", b, " ", c vs a, " ", x, " ", c
        assert_eq!(s.matching_units, 4);
        assert_eq!(s.ratio, 0.8);
    }

    #[test]
    fn ratio_agrees_with_diff_counts() {
        let ops = align_text("a\nb\nc\n", "a\nx\nc\n", Granularity::Lines);
        let counts = OpCounts::of(&ops);
        let expected = 2.0 * counts.equal as f64 / 6.0;
        assert_eq!(ratio_from_ops(&ops), expected);
    }

    #[test]
    fn long_divergent_texts_by_character() {
        let a = "ab".repeat(20_000);
        let b = "cd".repeat(20_000);
        let s = text_similarity(&a, &b, Granularity::Chars);
        assert_eq!(s.ratio, 0.0);
        assert_eq!((s.old_len, s.new_len), (40_000, 40_000));
        assert_eq!(s.matching_blocks, 0);
    }

    proptest! {
        #[test]
        fn symmetric(a in "[ab ]{0,25}", b in "[ab ]{0,25}") {
            let ab = text_similarity(&a, &b, Granularity::Chars).ratio;
            let ba = text_similarity(&b, &a, Granularity::Chars).ratio;
            prop_assert_eq!(ab.to_bits(), ba.to_bits());
        }

        #[test]
        fn bounded(a in "[abc]{0,25}", b in "[abc]{0,25}") {
            let r = text_similarity(&a, &b, Granularity::Chars).ratio;
            prop_assert!((0.0..=1.0).contains(&r));
        }

        #[test]
        fn self_similarity_is_one(a in "[a-z ]{1,30}") {
            prop_assert_eq!(text_similarity(&a, &a, Granularity::Chars).ratio, 1.0);
        }
    }
}
