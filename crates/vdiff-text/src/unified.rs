//! Unified diff: hunks with context, rendered in the GNU/difflib format.

use std::fmt;

use serde::{Deserialize, Serialize};
use vdiff_types::EditOp;

use crate::align::align_text;
use crate::error::{TextError, TextResult};
use crate::tokenizer::{strip_terminator, Granularity, Token};

const NO_NEWLINE_HINT: &str = "\\ No newline at end of file";

/// Options for unified diff generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedOptions {
    /// Number of unchanged lines shown around each change.
    pub context_lines: usize,
    /// Label for the `---` header line.
    pub old_label: Option<String>,
    /// Label for the `+++` header line.
    pub new_label: Option<String>,
    /// Emit `\ No newline at end of file` after an unterminated line.
    pub missing_newline_hint: bool,
}

impl Default for UnifiedOptions {
    fn default() -> Self {
        Self {
            context_lines: 3,
            old_label: None,
            new_label: None,
            missing_newline_hint: true,
        }
    }
}

impl UnifiedOptions {
    /// Options with a caller-supplied context size.
    ///
    /// Fails with [`TextError::InvalidArgument`] when `context_lines` is
    /// negative.
    pub fn with_context(context_lines: i64) -> TextResult<Self> {
        let context_lines = usize::try_from(context_lines).map_err(|_| {
            TextError::InvalidArgument(format!(
                "context_lines must be non-negative, got {context_lines}"
            ))
        })?;
        Ok(Self {
            context_lines,
            ..Default::default()
        })
    }

    /// Set both header labels.
    pub fn labels(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.old_label = Some(old.into());
        self.new_label = Some(new.into());
        self
    }
}

/// Classification of a line inside a hunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Present on both sides.
    Context,
    /// Only in the old text.
    Removed,
    /// Only in the new text.
    Added,
}

impl LineKind {
    pub fn prefix(&self) -> char {
        match self {
            Self::Context => ' ',
            Self::Removed => '-',
            Self::Added => '+',
        }
    }
}

/// A single line in a diff hunk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunkLine {
    pub kind: LineKind,
    /// The line text, terminator included when the source had one.
    pub text: String,
    /// Line number (1-based) in the old text, if the line exists there.
    pub old_line: Option<usize>,
    /// Line number (1-based) in the new text, if the line exists there.
    pub new_line: Option<usize>,
}

impl HunkLine {
    /// The text without its line terminator.
    pub fn content(&self) -> &str {
        strip_terminator(&self.text)
    }

    pub fn has_terminator(&self) -> bool {
        self.text.ends_with('\n') || self.text.ends_with('\r')
    }
}

/// A contiguous region of changes plus surrounding context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// Line number in the old text where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of old lines shown, context included.
    pub old_count: usize,
    /// Line number in the new text where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of new lines shown, context included.
    pub new_count: usize,
    pub lines: Vec<HunkLine>,
}

impl Hunk {
    /// The `@@ -start,len +start,len @@` range header.
    ///
    /// `,len` is omitted when the length is 1, and an empty side reports
    /// the line just before the hunk, as GNU diff does.
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            format_range(self.old_start, self.old_count),
            format_range(self.new_start, self.new_count)
        )
    }
}

fn format_range(start: usize, count: usize) -> String {
    match count {
        0 => format!("{},0", start - 1),
        1 => start.to_string(),
        _ => format!("{start},{count}"),
    }
}

/// A unified diff between two texts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedDiff {
    pub hunks: Vec<Hunk>,
    pub old_label: Option<String>,
    pub new_label: Option<String>,
    pub missing_newline_hint: bool,
}

impl UnifiedDiff {
    /// Build a diff from an existing line-level edit script.
    pub fn from_ops(ops: &[EditOp<Token<'_>>], options: &UnifiedOptions) -> Self {
        Self {
            hunks: group_hunks(ops, options.context_lines),
            old_label: options.old_label.clone(),
            new_label: options.new_label.clone(),
            missing_newline_hint: options.missing_newline_hint,
        }
    }

    /// Returns `true` if the two texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.count(LineKind::Added)
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.count(LineKind::Removed)
    }

    fn count(&self, kind: LineKind) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == kind)
            .count()
    }

    fn labels(&self) -> Option<(&str, &str)> {
        match (self.old_label.as_deref(), self.new_label.as_deref()) {
            (Some(old), Some(new)) => Some((old, new)),
            (Some(label), None) | (None, Some(label)) => Some((label, label)),
            (None, None) => None,
        }
    }

    /// The rendered diff as separate lines, without line terminators.
    pub fn to_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.hunks.is_empty() {
            return out;
        }
        if let Some((old, new)) = self.labels() {
            out.push(format!("--- {old}"));
            out.push(format!("+++ {new}"));
        }
        for hunk in &self.hunks {
            out.push(hunk.header());
            for line in &hunk.lines {
                out.push(format!("{}{}", line.kind.prefix(), line.content()));
                if !line.has_terminator() && self.missing_newline_hint {
                    out.push(NO_NEWLINE_HINT.to_string());
                }
            }
        }
        out
    }
}

/// Exact unified-diff text. Line terminators of the inputs are preserved.
impl fmt::Display for UnifiedDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hunks.is_empty() {
            return Ok(());
        }
        if let Some((old, new)) = self.labels() {
            writeln!(f, "--- {old}")?;
            writeln!(f, "+++ {new}")?;
        }
        for hunk in &self.hunks {
            writeln!(f, "{}", hunk.header())?;
            for line in &hunk.lines {
                write!(f, "{}{}", line.kind.prefix(), line.text)?;
                if !line.has_terminator() {
                    writeln!(f)?;
                    if self.missing_newline_hint {
                        writeln!(f, "{NO_NEWLINE_HINT}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Line-diff two texts and group the result into hunks.
pub fn unified_diff(old: &str, new: &str, options: &UnifiedOptions) -> UnifiedDiff {
    let ops = align_text(old, new, Granularity::Lines);
    UnifiedDiff::from_ops(&ops, options)
}

/// Group an edit script into hunks with `context` lines of context.
///
/// A run of unchanged lines longer than `2 * context` separates two hunks;
/// anything shorter keeps the surrounding changes in one hunk.
pub fn group_hunks(ops: &[EditOp<Token<'_>>], context: usize) -> Vec<Hunk> {
    let changes: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter(|(_, op)| !op.is_equal())
        .map(|(idx, _)| idx)
        .collect();
    let Some((&first, rest)) = changes.split_first() else {
        return Vec::new();
    };

    // positions[k] = (old lines, new lines) consumed by ops[..k]
    let mut positions = Vec::with_capacity(ops.len() + 1);
    let (mut old_pos, mut new_pos) = (0usize, 0usize);
    positions.push((old_pos, new_pos));
    for op in ops {
        old_pos += usize::from(op.before().is_some());
        new_pos += usize::from(op.after().is_some());
        positions.push((old_pos, new_pos));
    }

    let mut ranges = Vec::new();
    let mut start = first.saturating_sub(context);
    let mut last = first;
    for &idx in rest {
        let gap = idx - last - 1;
        if gap > 2 * context {
            ranges.push((start, last + context + 1));
            start = idx - context;
        }
        last = idx;
    }
    ranges.push((start, (last + context + 1).min(ops.len())));

    ranges
        .into_iter()
        .map(|(start, end)| build_hunk(&ops[start..end], positions[start]))
        .collect()
}

fn build_hunk(ops: &[EditOp<Token<'_>>], (old_base, new_base): (usize, usize)) -> Hunk {
    let mut lines = Vec::with_capacity(ops.len());
    let (mut old_no, mut new_no) = (old_base, new_base);

    for op in ops {
        let (kind, old_line, new_line) = match op {
            EditOp::Equal(_) => {
                old_no += 1;
                new_no += 1;
                (LineKind::Context, Some(old_no), Some(new_no))
            }
            EditOp::Delete(_) => {
                old_no += 1;
                (LineKind::Removed, Some(old_no), None)
            }
            EditOp::Insert(_) => {
                new_no += 1;
                (LineKind::Added, None, Some(new_no))
            }
        };
        lines.push(HunkLine {
            kind,
            text: op.value().as_str().to_string(),
            old_line,
            new_line,
        });
    }

    Hunk {
        old_start: old_base + 1,
        old_count: old_no - old_base,
        new_start: new_base + 1,
        new_count: new_no - new_base,
        lines,
    }
}
