use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Content-addressed fingerprint of a document.
///
/// A `Fingerprint` is the SHA-256 digest of a document's full byte content,
/// rendered as 64 lowercase hex characters on the wire. It is the primary
/// key of the ledger: the same bytes always produce the same fingerprint,
/// and a fingerprint maps to at most one live [`Record`](crate::Record).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint {
    digest: [u8; 32],
}

impl Fingerprint {
    /// Number of hex characters in the canonical rendering.
    pub const HEX_LEN: usize = 64;

    /// Wrap a raw 32-byte digest.
    pub const fn from_digest(digest: [u8; 32]) -> Self {
        Self { digest }
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.digest
    }

    /// Canonical lowercase hex rendering (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.digest)
    }

    /// Short identifier for logs (first 8 hex characters).
    pub fn short_id(&self) -> String {
        hex::encode(&self.digest[..4])
    }

    /// Parse from a hex string. Input case is accepted; the canonical
    /// rendering is always lowercase.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s.trim()).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&bytes);
        Ok(Self { digest })
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short_id())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// The wire contract is string-typed: fingerprints travel as hex strings,
// never as byte arrays.
impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
