use thiserror::Error;

/// Errors surfaced by engine operations.
///
/// Rejecting a bad argument is the only way a comparison can fail; there
/// are no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A caller-supplied parameter is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<vdiff_text::TextError> for EngineError {
    fn from(err: vdiff_text::TextError) -> Self {
        match err {
            vdiff_text::TextError::InvalidArgument(msg) => Self::InvalidArgument(msg),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
