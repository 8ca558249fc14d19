//! Sequence alignment: minimal edit scripts via longest common subsequence.
//!
//! The common prefix and suffix of the two inputs are matched directly.
//! Units of the middle region that never occur on the other side cannot be
//! matched and are dropped before the LCS search, so fully divergent inputs
//! cost linear time. What remains is solved with Hirschberg's method: two
//! rolling rows of LCS lengths locate a split point, and each half is
//! solved recursively. Time is `O(n·m)` in the filtered middle region and
//! memory is `O(n + m)`.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;
use vdiff_types::EditOp;

use crate::tokenizer::{tokenize, Granularity, Token};

/// Compute a minimal edit script turning `a` into `b`.
///
/// The script has the fewest possible `Insert` + `Delete` operations.
/// Between two matched units all deletions come before all insertions.
/// The result is fully determined by the inputs.
pub fn align<T>(a: &[T], b: &[T]) -> Vec<EditOp<T>>
where
    T: Eq + Hash + Clone,
{
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let mid_a = &a[prefix..a.len() - suffix];
    let mid_b = &b[prefix..b.len() - suffix];
    trace!(
        old_len = a.len(),
        new_len = b.len(),
        prefix,
        suffix,
        window_old = mid_a.len(),
        window_new = mid_b.len(),
        "aligning sequences"
    );

    let mut ops = Vec::with_capacity(a.len() + mid_b.len());
    ops.extend(a[..prefix].iter().cloned().map(EditOp::Equal));
    align_window(mid_a, mid_b, &mut ops);
    ops.extend(a[a.len() - suffix..].iter().cloned().map(EditOp::Equal));
    ops
}

/// Tokenize both texts with `granularity` and align the tokens.
pub fn align_text<'a>(
    old: &'a str,
    new: &'a str,
    granularity: Granularity,
) -> Vec<EditOp<Token<'a>>> {
    let old_tokens = tokenize(old, granularity);
    let new_tokens = tokenize(new, granularity);
    align(&old_tokens, &new_tokens)
}

fn align_window<T>(a: &[T], b: &[T], ops: &mut Vec<EditOp<T>>)
where
    T: Eq + Hash + Clone,
{
    let mut i = 0;
    let mut j = 0;
    for (mi, mj) in matched_pairs(a, b) {
        ops.extend(a[i..mi].iter().cloned().map(EditOp::Delete));
        ops.extend(b[j..mj].iter().cloned().map(EditOp::Insert));
        ops.push(EditOp::Equal(a[mi].clone()));
        i = mi + 1;
        j = mj + 1;
    }
    ops.extend(a[i..].iter().cloned().map(EditOp::Delete));
    ops.extend(b[j..].iter().cloned().map(EditOp::Insert));
}

/// Index pairs `(i, j)` with `a[i] == b[j]` forming a longest common
/// subsequence, in increasing order on both sides.
fn matched_pairs<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<(usize, usize)> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    // Compare small integer ids instead of the units themselves.
    let mut ids = HashMap::new();
    let ids_a = intern(a, &mut ids);
    let ids_b = intern(b, &mut ids);

    let mut in_a = vec![false; ids.len()];
    let mut in_b = vec![false; ids.len()];
    ids_a.iter().for_each(|&id| in_a[id as usize] = true);
    ids_b.iter().for_each(|&id| in_b[id as usize] = true);

    // (original index, id) of every unit that occurs on both sides
    let (pos_a, keep_a): (Vec<usize>, Vec<u32>) = ids_a
        .iter()
        .enumerate()
        .filter(|&(_, &id)| in_b[id as usize])
        .map(|(idx, &id)| (idx, id))
        .unzip();
    let (pos_b, keep_b): (Vec<usize>, Vec<u32>) = ids_b
        .iter()
        .enumerate()
        .filter(|&(_, &id)| in_a[id as usize])
        .map(|(idx, &id)| (idx, id))
        .unzip();
    trace!(
        kept_old = keep_a.len(),
        kept_new = keep_b.len(),
        "filtered units unique to one side"
    );

    let mut pairs = Vec::new();
    hirschberg(&keep_a, &keep_b, 0, 0, &mut pairs);
    pairs
        .into_iter()
        .map(|(i, j)| (pos_a[i], pos_b[j]))
        .collect()
}

fn hirschberg(a: &[u32], b: &[u32], a_off: usize, b_off: usize, out: &mut Vec<(usize, usize)>) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    out.extend((0..prefix).map(|k| (a_off + k, b_off + k)));
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let (a_off, b_off) = (a_off + prefix, b_off + prefix);

    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);

    if a.is_empty() || b.is_empty() {
        // nothing left to match in the middle
    } else if a.len() == 1 {
        if let Some(j) = b.iter().position(|&y| y == a[0]) {
            out.push((a_off, b_off + j));
        }
    } else if b.len() == 1 {
        if let Some(i) = a.iter().position(|&x| x == b[0]) {
            out.push((a_off + i, b_off));
        }
    } else {
        let mid = a.len() / 2;
        let split = {
            let forward = prefix_lcs_row(&a[..mid], b);
            let backward = suffix_lcs_row(&a[mid..], b);
            // First split point reaching the full LCS length.
            let best = (0..=b.len())
                .map(|k| forward[k] + backward[k])
                .max()
                .unwrap_or(0);
            (0..=b.len())
                .find(|&k| forward[k] + backward[k] == best)
                .unwrap_or(0)
        };
        hirschberg(&a[..mid], &b[..split], a_off, b_off, out);
        hirschberg(&a[mid..], &b[split..], a_off + mid, b_off + split, out);
    }

    let (a_end, b_end) = (a_off + a.len(), b_off + b.len());
    out.extend((0..suffix).map(|k| (a_end + k, b_end + k)));
}

// row[j] = LCS length of `a` and `b[..j]`
fn prefix_lcs_row(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut prev = vec![0u32; b.len() + 1];
    let mut cur = vec![0u32; b.len() + 1];
    for &x in a {
        for j in 1..=b.len() {
            cur[j] = if x == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(cur[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev
}

// row[j] = LCS length of `a` and `b[j..]`
fn suffix_lcs_row(a: &[u32], b: &[u32]) -> Vec<u32> {
    let m = b.len();
    let mut prev = vec![0u32; m + 1];
    let mut cur = vec![0u32; m + 1];
    for &x in a.iter().rev() {
        for j in (0..m).rev() {
            cur[j] = if x == b[j] {
                prev[j + 1] + 1
            } else {
                prev[j].max(cur[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev
}

fn intern<'a, T: Eq + Hash>(items: &'a [T], ids: &mut HashMap<&'a T, u32>) -> Vec<u32> {
    items
        .iter()
        .map(|item| {
            let next = ids.len() as u32;
            *ids.entry(item).or_insert(next)
        })
        .collect()
}

/// Units of sequence A, recovered from `Equal` and `Delete` ops.
pub fn old_projection<T: Clone>(ops: &[EditOp<T>]) -> Vec<T> {
    ops.iter().filter_map(EditOp::before).cloned().collect()
}

/// Units of sequence B, recovered from `Equal` and `Insert` ops.
pub fn new_projection<T: Clone>(ops: &[EditOp<T>]) -> Vec<T> {
    ops.iter().filter_map(EditOp::after).cloned().collect()
}

/// Tally of an edit script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpCounts {
    pub equal: usize,
    pub insert: usize,
    pub delete: usize,
    /// Number of maximal runs of consecutive `Equal` ops.
    pub matching_blocks: usize,
}

impl OpCounts {
    pub fn of<T>(ops: &[EditOp<T>]) -> Self {
        let mut counts = Self::default();
        let mut in_block = false;
        for op in ops {
            match op {
                EditOp::Equal(_) => {
                    counts.equal += 1;
                    if !in_block {
                        counts.matching_blocks += 1;
                    }
                }
                EditOp::Insert(_) => counts.insert += 1,
                EditOp::Delete(_) => counts.delete += 1,
            }
            in_block = op.is_equal();
        }
        counts
    }

    /// Length of sequence A.
    pub fn old_len(&self) -> usize {
        self.equal + self.delete
    }

    /// Length of sequence B.
    pub fn new_len(&self) -> usize {
        self.equal + self.insert
    }

    /// Number of non-`Equal` ops: the edit distance without substitution.
    pub fn edits(&self) -> usize {
        self.insert + self.delete
    }
}
