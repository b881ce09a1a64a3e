//! Owner-side record management: listing, searching, and deletion.

use tracing::info;

use docv_gateway::{LedgerError, LedgerGateway, LedgerResult};
use docv_types::{Fingerprint, Record, TransactionReceipt};

/// Fetch the connected identity's records, newest first.
///
/// The ledger guarantees no ordering for `list_by_owner`, so the list is
/// sorted locally by registration time (fingerprint as tie-break).
pub async fn history<G>(gateway: &G) -> LedgerResult<Vec<Record>>
where
    G: LedgerGateway + ?Sized,
{
    let owner = gateway
        .connected_identity()
        .ok_or(LedgerError::NotConnected)?;
    let mut records = gateway.list_by_owner(&owner).await?;
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.fingerprint.cmp(&b.fingerprint))
    });
    Ok(records)
}

/// Filter records by a case-insensitive substring of the title or the
/// fingerprint hex. A blank query matches everything.
pub fn search(records: &[Record], query: &str) -> Vec<Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| {
            record.title.to_lowercase().contains(&needle)
                || record.fingerprint.to_hex().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Delete a single owned record. The ledger enforces ownership.
pub async fn delete<G>(gateway: &G, fingerprint: &Fingerprint) -> LedgerResult<TransactionReceipt>
where
    G: LedgerGateway + ?Sized,
{
    let receipt = gateway.remove(fingerprint).await?;
    info!(fingerprint = %fingerprint.short_id(), tx = %receipt.tx_hash, "record deleted");
    Ok(receipt)
}

/// Delete every record owned by the connected identity in one atomic batch.
///
/// Returns `Ok(None)` without a ledger write when nothing is owned.
pub async fn delete_all<G>(gateway: &G) -> LedgerResult<Option<TransactionReceipt>>
where
    G: LedgerGateway + ?Sized,
{
    let owner = gateway
        .connected_identity()
        .ok_or(LedgerError::NotConnected)?;
    let records = gateway.list_by_owner(&owner).await?;
    let fingerprints: Vec<Fingerprint> = records.iter().map(|r| r.fingerprint).collect();
    if fingerprints.is_empty() {
        return Ok(None);
    }

    let receipt = gateway.remove_batch(&fingerprints).await?;
    info!(count = fingerprints.len(), tx = %receipt.tx_hash, "all records deleted");
    Ok(Some(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docv_gateway::InMemoryLedgerGateway;
    use docv_types::AccountId;

    fn alice() -> AccountId {
        AccountId::from_raw([1; 20])
    }

    fn bob() -> AccountId {
        AccountId::from_raw([2; 20])
    }

    fn fp(byte: u8) -> Fingerprint {
        Fingerprint::from_digest([byte; 32])
    }

    #[tokio::test]
    async fn history_lists_only_the_connected_owner() {
        let gateway = InMemoryLedgerGateway::connected(alice());
        gateway.register(&fp(1), "mine", "d").await.unwrap();
        gateway.connect(bob());
        gateway.register(&fp(2), "theirs", "d").await.unwrap();
        gateway.connect(alice());

        let records = history(&gateway).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "mine");
    }

    #[tokio::test]
    async fn history_orders_deterministically() {
        let gateway = InMemoryLedgerGateway::connected(alice());
        // Registered within the same second: order falls back to the
        // fingerprint tie-break, so the result is stable across runs.
        gateway.register(&fp(3), "c", "d").await.unwrap();
        gateway.register(&fp(1), "a", "d").await.unwrap();
        gateway.register(&fp(2), "b", "d").await.unwrap();

        let records = history(&gateway).await.unwrap();
        let mut sorted = records.clone();
        sorted.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.fingerprint.cmp(&b.fingerprint))
        });
        assert_eq!(records, sorted);
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn history_requires_a_connected_identity() {
        let gateway = InMemoryLedgerGateway::disconnected();
        assert_eq!(history(&gateway).await.unwrap_err(), LedgerError::NotConnected);
    }

    #[tokio::test]
    async fn search_matches_title_and_fingerprint_case_insensitively() {
        let gateway = InMemoryLedgerGateway::connected(alice());
        gateway.register(&fp(0xab), "Quarterly Report", "d").await.unwrap();
        gateway.register(&fp(0xcd), "Invoice", "d").await.unwrap();
        let records = history(&gateway).await.unwrap();

        assert_eq!(search(&records, "quarterly").len(), 1);
        assert_eq!(search(&records, "ABAB").len(), 1);
        assert_eq!(search(&records, "").len(), 2);
        assert_eq!(search(&records, "no such thing").len(), 0);
    }

    #[tokio::test]
    async fn delete_all_clears_owned_records_atomically() {
        let gateway = InMemoryLedgerGateway::connected(alice());
        gateway.register(&fp(1), "a", "d").await.unwrap();
        gateway.register(&fp(2), "b", "d").await.unwrap();
        gateway.connect(bob());
        gateway.register(&fp(3), "other", "d").await.unwrap();
        gateway.connect(alice());

        let receipt = delete_all(&gateway).await.unwrap();
        assert!(receipt.is_some());
        assert!(history(&gateway).await.unwrap().is_empty());

        // Another owner's records are untouched.
        assert!(gateway.lookup(&fp(3)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_all_with_nothing_owned_skips_the_write() {
        let gateway = InMemoryLedgerGateway::connected(alice());
        assert_eq!(delete_all(&gateway).await.unwrap(), None);
        assert_eq!(gateway.write_calls(), 0);
    }

    #[tokio::test]
    async fn delete_surfaces_ledger_rejection() {
        let gateway = InMemoryLedgerGateway::connected(alice());
        let err = delete(&gateway, &fp(9)).await.unwrap_err();
        assert!(matches!(err, LedgerError::Rejected(_)));
    }
}
