use thiserror::Error;

/// Errors from digest operations.
///
/// Hashing bytes already in memory cannot fail; the only failure class is
/// content that could not be read into memory in the first place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DigestError {
    #[error("could not read {path}: {reason}")]
    Read { path: String, reason: String },
}
