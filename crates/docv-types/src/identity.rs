use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Ledger identity of a submitting account.
///
/// A 20-byte account address assigned by the external ledger's type system.
/// The all-zero address is the ledger's "no owner" sentinel: a lookup that
/// returns a record owned by [`AccountId::ZERO`] means the fingerprint was
/// never registered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId {
    address: [u8; 20],
}

impl AccountId {
    /// The null-identity sentinel.
    pub const ZERO: Self = Self { address: [0u8; 20] };

    /// Create from a raw 20-byte address.
    pub const fn from_raw(address: [u8; 20]) -> Self {
        Self { address }
    }

    /// The raw 20-byte address.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.address
    }

    /// Whether this is the null-identity sentinel.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Canonical `0x`-prefixed lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.address))
    }

    /// Parse from a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 20 {
            return Err(TypeError::InvalidLength {
                expected: 20,
                actual: bytes.len(),
            });
        }
        let mut address = [0u8; 20];
        address.copy_from_slice(&bytes);
        Ok(Self { address })
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId(0x{})", hex::encode(&self.address[..4]))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_the_sentinel() {
        assert!(AccountId::ZERO.is_zero());
        assert!(!AccountId::from_raw([1; 20]).is_zero());
    }

    #[test]
    fn hex_roundtrip() {
        let id = AccountId::from_raw([0x5f; 20]);
        assert_eq!(AccountId::from_hex(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn prefix_is_optional() {
        let id = AccountId::from_raw([0x12; 20]);
        let bare = hex::encode(id.as_bytes());
        assert_eq!(AccountId::from_hex(&bare).unwrap(), id);
        assert_eq!(AccountId::from_hex(&format!("0x{bare}")).unwrap(), id);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            AccountId::from_hex("0xabcd"),
            Err(TypeError::InvalidLength { .. })
        ));
    }

    #[test]
    fn serde_is_a_prefixed_hex_string() {
        let id = AccountId::from_raw([9; 20]);
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with("\"0x"));
        let parsed: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
