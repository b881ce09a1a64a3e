use thiserror::Error;

/// Errors produced by ledger gateway operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No identity is connected; writes require a signing account.
    #[error("no identity connected")]
    NotConnected,

    /// The remote ledger rejected the call (e.g. duplicate registration,
    /// deletion by a non-owner).
    #[error("ledger rejected the call: {0}")]
    Rejected(String),

    /// The call never reached the ledger or the response was lost.
    #[error("transport failure: {0}")]
    Transport(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
