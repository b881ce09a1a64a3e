use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use docv_types::{AccountId, Fingerprint, Record, TransactionReceipt};

use crate::error::{LedgerError, LedgerResult};
use crate::traits::LedgerGateway;

/// In-memory ledger gateway for tests, local demos, and embedding.
///
/// Keeps one live record per fingerprint and attributes writes to the
/// connected identity. Batch writes validate every entry before mutating
/// anything, so a rejection commits nothing.
///
/// Test affordances: per-operation call counters, and [`fail_next`]
/// transport-fault injection that makes exactly one upcoming call fail
/// before touching state.
///
/// [`fail_next`]: InMemoryLedgerGateway::fail_next
pub struct InMemoryLedgerGateway {
    identity: RwLock<Option<AccountId>>,
    inner: RwLock<LedgerState>,
    calls: CallCounters,
}

#[derive(Default)]
struct LedgerState {
    records: BTreeMap<Fingerprint, Record>,
    fail_next: Option<String>,
}

#[derive(Default)]
struct CallCounters {
    register: AtomicU64,
    register_batch: AtomicU64,
    lookup: AtomicU64,
    list_by_owner: AtomicU64,
    remove: AtomicU64,
    remove_batch: AtomicU64,
}

impl InMemoryLedgerGateway {
    /// Gateway with a connected signing identity.
    pub fn connected(identity: AccountId) -> Self {
        Self {
            identity: RwLock::new(Some(identity)),
            inner: RwLock::new(LedgerState::default()),
            calls: CallCounters::default(),
        }
    }

    /// Gateway with no identity connected; writes fail with
    /// [`LedgerError::NotConnected`].
    pub fn disconnected() -> Self {
        Self {
            identity: RwLock::new(None),
            inner: RwLock::new(LedgerState::default()),
            calls: CallCounters::default(),
        }
    }

    /// Connect a signing identity.
    pub fn connect(&self, identity: AccountId) {
        if let Ok(mut guard) = self.identity.write() {
            *guard = Some(identity);
        }
    }

    /// Disconnect the signing identity.
    pub fn disconnect(&self) {
        if let Ok(mut guard) = self.identity.write() {
            *guard = None;
        }
    }

    /// Make the next gateway call fail with a transport error before it
    /// touches any state.
    pub fn fail_next(&self, reason: impl Into<String>) {
        if let Ok(mut state) = self.inner.write() {
            state.fail_next = Some(reason.into());
        }
    }

    /// Number of `lookup` calls observed.
    pub fn lookup_calls(&self) -> u64 {
        self.calls.lookup.load(Ordering::Relaxed)
    }

    /// Number of write calls observed (register, remove, and their batches).
    pub fn write_calls(&self) -> u64 {
        self.calls.register.load(Ordering::Relaxed)
            + self.calls.register_batch.load(Ordering::Relaxed)
            + self.calls.remove.load(Ordering::Relaxed)
            + self.calls.remove_batch.load(Ordering::Relaxed)
    }

    /// Total calls of any kind observed.
    pub fn total_calls(&self) -> u64 {
        self.lookup_calls()
            + self.write_calls()
            + self.calls.list_by_owner.load(Ordering::Relaxed)
    }

    fn take_fault(&self) -> LedgerResult<()> {
        let mut state = self.lock_write()?;
        match state.fail_next.take() {
            Some(reason) => Err(LedgerError::Transport(reason)),
            None => Ok(()),
        }
    }

    fn lock_write(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, LedgerState>> {
        self.inner
            .write()
            .map_err(|_| LedgerError::Transport("gateway state lock poisoned".into()))
    }

    fn lock_read(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, LedgerState>> {
        self.inner
            .read()
            .map_err(|_| LedgerError::Transport("gateway state lock poisoned".into()))
    }

    fn require_identity(&self) -> LedgerResult<AccountId> {
        self.connected_identity().ok_or(LedgerError::NotConnected)
    }

    fn new_record(
        fingerprint: Fingerprint,
        title: &str,
        description: &str,
        owner: AccountId,
    ) -> Record {
        Record {
            fingerprint,
            title: title.to_string(),
            description: description.to_string(),
            owner,
            created_at: chrono::Utc::now().timestamp().max(0) as u64,
        }
    }

    fn new_receipt() -> TransactionReceipt {
        let bytes: [u8; 32] = rand::thread_rng().gen();
        TransactionReceipt {
            tx_hash: format!("0x{}", hex::encode(bytes)),
        }
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedgerGateway {
    fn connected_identity(&self) -> Option<AccountId> {
        self.identity.read().ok().and_then(|guard| *guard)
    }

    async fn register(
        &self,
        fingerprint: &Fingerprint,
        title: &str,
        description: &str,
    ) -> LedgerResult<TransactionReceipt> {
        self.calls.register.fetch_add(1, Ordering::Relaxed);
        self.take_fault()?;
        let owner = self.require_identity()?;

        let mut state = self.lock_write()?;
        if state.records.contains_key(fingerprint) {
            return Err(LedgerError::Rejected(format!(
                "fingerprint {} already registered",
                fingerprint.short_id()
            )));
        }
        state.records.insert(
            *fingerprint,
            Self::new_record(*fingerprint, title, description, owner),
        );
        debug!(fingerprint = %fingerprint.short_id(), %owner, "registered record");
        Ok(Self::new_receipt())
    }

    async fn register_batch(
        &self,
        fingerprints: &[Fingerprint],
        title: &str,
        description: &str,
    ) -> LedgerResult<TransactionReceipt> {
        self.calls.register_batch.fetch_add(1, Ordering::Relaxed);
        self.take_fault()?;
        let owner = self.require_identity()?;
        if fingerprints.is_empty() {
            return Err(LedgerError::Rejected("empty batch".into()));
        }

        let mut state = self.lock_write()?;

        // Validate the whole batch before the first insert: a rejection must
        // commit nothing.
        let mut seen = std::collections::BTreeSet::new();
        for fingerprint in fingerprints {
            if state.records.contains_key(fingerprint) || !seen.insert(*fingerprint) {
                return Err(LedgerError::Rejected(format!(
                    "fingerprint {} already registered",
                    fingerprint.short_id()
                )));
            }
        }

        for fingerprint in fingerprints {
            state.records.insert(
                *fingerprint,
                Self::new_record(*fingerprint, title, description, owner),
            );
        }
        debug!(count = fingerprints.len(), %owner, "registered batch");
        Ok(Self::new_receipt())
    }

    async fn lookup(&self, fingerprint: &Fingerprint) -> LedgerResult<Option<Record>> {
        self.calls.lookup.fetch_add(1, Ordering::Relaxed);
        self.take_fault()?;
        let state = self.lock_read()?;
        Ok(state.records.get(fingerprint).cloned())
    }

    async fn list_by_owner(&self, owner: &AccountId) -> LedgerResult<Vec<Record>> {
        self.calls.list_by_owner.fetch_add(1, Ordering::Relaxed);
        self.take_fault()?;
        let state = self.lock_read()?;
        Ok(state
            .records
            .values()
            .filter(|r| r.owner == *owner)
            .cloned()
            .collect())
    }

    async fn remove(&self, fingerprint: &Fingerprint) -> LedgerResult<TransactionReceipt> {
        self.calls.remove.fetch_add(1, Ordering::Relaxed);
        self.take_fault()?;
        let caller = self.require_identity()?;

        let mut state = self.lock_write()?;
        match state.records.get(fingerprint) {
            None => {
                return Err(LedgerError::Rejected(format!(
                    "fingerprint {} not registered",
                    fingerprint.short_id()
                )))
            }
            Some(record) if record.owner != caller => {
                return Err(LedgerError::Rejected("caller is not the record owner".into()))
            }
            Some(_) => {}
        }
        state.records.remove(fingerprint);
        debug!(fingerprint = %fingerprint.short_id(), %caller, "removed record");
        Ok(Self::new_receipt())
    }

    async fn remove_batch(&self, fingerprints: &[Fingerprint]) -> LedgerResult<TransactionReceipt> {
        self.calls.remove_batch.fetch_add(1, Ordering::Relaxed);
        self.take_fault()?;
        let caller = self.require_identity()?;
        if fingerprints.is_empty() {
            return Err(LedgerError::Rejected("empty batch".into()));
        }

        let mut state = self.lock_write()?;

        for fingerprint in fingerprints {
            match state.records.get(fingerprint) {
                None => {
                    return Err(LedgerError::Rejected(format!(
                        "fingerprint {} not registered",
                        fingerprint.short_id()
                    )))
                }
                Some(record) if record.owner != caller => {
                    return Err(LedgerError::Rejected(
                        "caller is not the record owner".into(),
                    ))
                }
                Some(_) => {}
            }
        }

        for fingerprint in fingerprints {
            state.records.remove(fingerprint);
        }
        debug!(count = fingerprints.len(), %caller, "removed batch");
        Ok(Self::new_receipt())
    }
}
