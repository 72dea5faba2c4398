//! Error types for the search crate.
//!
//! Searches themselves never fail; these errors come from parsing search
//! parameters out of strings.

/// Errors that can occur while building search parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A side preference other than `before` or `after`.
    #[error("invalid side preference: {0:?} (expected \"before\" or \"after\")")]
    InvalidSide(String),

    /// A field path that is empty or has more than two segments.
    #[error("invalid field path: {0:?}")]
    InvalidFieldPath(String),
}

/// Convenience alias for search parameter results.
pub type SearchResult<T> = Result<T, SearchError>;
