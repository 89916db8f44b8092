//! Error types for paths and filters.

use thiserror::Error;

/// Errors related to path parsing, access and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A path string did not start with `/`.
    #[error("invalid path '{path}': must start with '/'")]
    InvalidPathSyntax { path: String },

    /// A segment index was outside `[0, len)`.
    #[error("segment index {index} out of range for path of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A segment was empty or contained a separator.
    #[error("invalid path segment '{segment}': {reason}")]
    InvalidSegment { segment: String, reason: String },
}

/// Errors related to building filters.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A glob pattern failed to compile.
    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Errors from any part of this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("path error: {0}")]
    Path(#[from] PathError),

    #[error("filter error: {0}")]
    Filter(#[from] FilterError),
}

/// Result type alias for path and filter operations.
pub type Result<T> = std::result::Result<T, Error>;
