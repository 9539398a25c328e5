use thiserror::Error;

/// Convenience result type used across the crate.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Error type returned by loading, configuration and parameter handling.
///
/// Filtering and aggregation never produce errors: an empty selection is a valid (empty)
/// view, not a failure.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error (malformed quoting, I/O while reading records, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON input or configuration could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not have the shape required to build records (missing required
    /// columns, unknown format, non-object JSON rows, ...).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A user-adjustable parameter was given an unusable value. The previous value stays in
    /// force and nothing downstream is recomputed.
    #[error("invalid value for parameter '{parameter}': {message} (raw='{raw}', keeping {kept})")]
    InvalidParameter {
        parameter: String,
        raw: String,
        message: String,
        kept: usize,
    },

    /// The worker pool used for chunked filtering could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
