use async_trait::async_trait;
use docv_types::{AccountId, Fingerprint, Record, TransactionReceipt};

use crate::error::LedgerResult;

/// Remote contract boundary of the document registry.
///
/// Implementations must uphold:
/// - `register_batch` / `remove_batch` are all-or-nothing: either every
///   fingerprint in the batch commits in one atomic submission or none do.
///   Callers never observe partial success.
/// - `lookup` and `list_by_owner` are side-effect-free.
/// - `list_by_owner` carries no ordering guarantee; callers sort locally.
/// - Writes are attributed to the connected identity; the ledger, not the
///   caller, enforces that only the owner can remove a record.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// The locally connected signing identity, if any. This is wallet
    /// state, not a ledger round-trip.
    fn connected_identity(&self) -> Option<AccountId>;

    /// Register a single fingerprint with its metadata.
    async fn register(
        &self,
        fingerprint: &Fingerprint,
        title: &str,
        description: &str,
    ) -> LedgerResult<TransactionReceipt>;

    /// Register a batch of fingerprints atomically under shared metadata.
    async fn register_batch(
        &self,
        fingerprints: &[Fingerprint],
        title: &str,
        description: &str,
    ) -> LedgerResult<TransactionReceipt>;

    /// Fetch the live record for a fingerprint, if one exists.
    async fn lookup(&self, fingerprint: &Fingerprint) -> LedgerResult<Option<Record>>;

    /// Fetch every live record owned by an identity, unordered.
    async fn list_by_owner(&self, owner: &AccountId) -> LedgerResult<Vec<Record>>;

    /// Remove a single record. The ledger rejects callers that are not the
    /// record's owner.
    async fn remove(&self, fingerprint: &Fingerprint) -> LedgerResult<TransactionReceipt>;

    /// Remove a batch of records atomically.
    async fn remove_batch(&self, fingerprints: &[Fingerprint]) -> LedgerResult<TransactionReceipt>;
}
