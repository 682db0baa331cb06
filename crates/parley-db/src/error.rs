use thiserror::Error;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// The only two ways a store operation can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Missing or malformed input, an inverted time range, or a duplicate.
    #[error("bad request: {0}")]
    BadRequest(&'static str),

    /// Unknown or archived id, or nothing matched the requested range.
    #[error("not found")]
    NotFound,
}
