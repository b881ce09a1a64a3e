use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;
use crate::identity::AccountId;

/// The unit stored by the ledger.
///
/// A record binds a content fingerprint to caller-supplied metadata and the
/// ledger-assigned owner and timestamp. The fingerprint is the primary key;
/// `owner` and `created_at` are immutable after registration. A record is
/// destroyed only by an explicit owner-initiated delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Content fingerprint, uniquely identifying the document bytes.
    pub fingerprint: Fingerprint,
    /// Short human-readable label, caller-supplied.
    pub title: String,
    /// Free-text description, caller-supplied.
    pub description: String,
    /// Identity of the submitting account, assigned at registration.
    pub owner: AccountId,
    /// Ledger-assigned registration time, seconds since epoch.
    pub created_at: u64,
}

impl Record {
    /// Whether the owner field carries a real identity rather than the
    /// ledger's "never registered" sentinel.
    pub fn has_owner(&self) -> bool {
        !self.owner.is_zero()
    }
}

/// Opaque handle returned by a committed ledger write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Ledger-assigned transaction hash, hex-encoded.
    pub tx_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record {
            fingerprint: Fingerprint::from_digest([1; 32]),
            title: "T".into(),
            description: "D".into(),
            owner: AccountId::from_raw([2; 20]),
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn has_owner_reflects_sentinel() {
        let mut record = sample();
        assert!(record.has_owner());
        record.owner = AccountId::ZERO;
        assert!(!record.has_owner());
    }

    #[test]
    fn serde_roundtrip() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }

    #[test]
    fn wire_fields_are_strings() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json["fingerprint"].is_string());
        assert!(json["owner"].is_string());
        assert!(json["created_at"].is_u64());
    }
}
