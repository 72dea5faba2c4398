//! Error types for the merge crate.

/// Errors that can occur during merge operations.
///
/// Every error is raised before the target is touched, so a failed call
/// never leaves a partial merge behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// The source argument was a list where only records are accepted.
    #[error("lists are not supported as a merge source")]
    ListSource,

    /// A selected property held a list, which selective deep extend rejects.
    #[error("list-valued property '{key}' is not supported by selective deep extend")]
    UnsupportedList { key: String },

    /// An argument had the wrong shape or was missing.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl MergeError {
    /// Create an invalid-argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
