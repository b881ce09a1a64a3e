use thiserror::Error;

use docv_digest::DigestError;
use docv_gateway::LedgerError;
use docv_types::Fingerprint;

/// Errors terminating a registration run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Caller input incomplete or malformed. Raised before any ledger
    /// contact.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A selected file's content could not be hashed.
    #[error(transparent)]
    Digest(#[from] DigestError),

    /// The ledger call was rejected or failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Errors terminating a verification run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The computed fingerprint disagrees with the externally supplied
    /// expectation. Raised before any ledger contact.
    #[error("fingerprint mismatch: expected {expected}, computed {computed}")]
    Mismatch {
        expected: Fingerprint,
        computed: Fingerprint,
    },

    /// The file's content could not be hashed.
    #[error(transparent)]
    Digest(#[from] DigestError),

    /// The lookup call itself failed. Distinct from a successful lookup
    /// that finds nothing: only this case is worth retrying.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
