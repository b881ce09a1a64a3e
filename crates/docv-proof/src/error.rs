use thiserror::Error;

use docv_types::{Fingerprint, TypeError};

/// Errors from building or parsing share links.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("link carries no fingerprint parameter")]
    MissingFingerprint,

    #[error("link carries a malformed fingerprint: {0}")]
    InvalidFingerprint(#[from] TypeError),
}

/// Errors from building a proof artifact.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("could not encode QR code: {0}")]
    QrEncode(String),
}

/// Errors from embedding a proof into a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmbedError {
    /// The supplied bytes are not the document the record attests to.
    #[error("file does not match the record: expected {expected}, computed {computed}")]
    FingerprintMismatch {
        expected: Fingerprint,
        computed: Fingerprint,
    },

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("could not encode QR code: {0}")]
    QrEncode(String),

    #[error("could not parse document: {0}")]
    PdfParse(String),

    #[error("document is encrypted")]
    PdfEncrypted,

    #[error("document has no pages")]
    NoPages,

    #[error("could not write modified document: {0}")]
    Render(String),
}
