use thiserror::Error;

/// Store errors are always surfaced, never swallowed (`SPEC_FULL.md`
/// section 9, resolved Open Question 3): a scan/decode failure inside a
/// store implementation must come back as [`StoreError::Backend`], not
/// be logged-and-dropped internally.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("row not found")]
    NotFound,

    #[error("conflicting write: {0}")]
    Conflict(String),

    #[error("store backend error: {0}")]
    Backend(String),
}
