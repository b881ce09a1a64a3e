use std::path::Path;

use sha2::{Digest, Sha256};

use docv_types::Fingerprint;

use crate::error::DigestError;
use crate::source::FileSource;

/// Content fingerprinting over SHA-256.
///
/// No domain separation and no keying: the ledger side computes the same
/// plain SHA-256 over the same bytes, and the two must agree bit-for-bit.
/// Empty input is legal and hashes like any other buffer.
pub struct DigestEngine;

impl DigestEngine {
    /// Fingerprint a byte buffer. Deterministic, no side effects.
    pub fn fingerprint(data: &[u8]) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Fingerprint::from_digest(hasher.finalize().into())
    }

    /// Check that a buffer matches an expected fingerprint.
    pub fn verify(data: &[u8], expected: &Fingerprint) -> bool {
        Self::fingerprint(data) == *expected
    }

    /// Fingerprint a file by reading it fully into memory.
    pub async fn fingerprint_path(path: &Path) -> Result<Fingerprint, DigestError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| DigestError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::fingerprint(&bytes))
    }

    /// Fingerprint a [`FileSource`], reading path sources from disk.
    pub async fn fingerprint_source(source: &FileSource) -> Result<Fingerprint, DigestError> {
        match source {
            FileSource::Memory { bytes, .. } => Ok(Self::fingerprint(bytes)),
            FileSource::Path(path) => Self::fingerprint_path(path).await,
        }
    }
}
