//! Error taxonomy for the lot engine
//!
//! Every failure is a deterministic function of the input: the same call
//! fails the same way every time, so nothing here is retryable.

/// Errors returned by lot, region, abundance and bulk-import operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LotError {
    /// Lot index outside `1..=tally`
    #[error("Invalid lot index {index} (valid range 1..={tally})")]
    InvalidIndex { index: i64, tally: u32 },
    /// Structurally invalid numeric input (zero ids, bad bonuses, bad classes)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Malformed packed blob text
    #[error("Decode error: {0}")]
    Decode(String),
}

impl LotError {
    /// Shorthand for building an [`LotError::InvalidArgument`]
    pub fn invalid(msg: impl Into<String>) -> Self {
        LotError::InvalidArgument(msg.into())
    }
}

pub type LotResult<T> = Result<T, LotError>;
