//! Error types for the text crate.

/// Errors raised by text comparison.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// A caller-supplied parameter is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias for text comparison results.
pub type TextResult<T> = Result<T, TextError>;
