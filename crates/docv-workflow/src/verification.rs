use tracing::debug;

use docv_digest::{DigestEngine, FileSource};
use docv_gateway::LedgerGateway;
use docv_types::{Fingerprint, Record};

use crate::error::VerifyError;

/// How the fingerprint to verify is obtained.
#[derive(Clone, Debug)]
pub enum VerifyInput {
    /// Re-hash a supplied file. If `expected` is present (e.g. taken from a
    /// shared reference), a disagreement with the computed fingerprint fails
    /// the run before the ledger is ever queried.
    File {
        source: FileSource,
        expected: Option<Fingerprint>,
    },
    /// A fingerprint received directly, e.g. extracted from a share link.
    Reference(Fingerprint),
}

impl VerifyInput {
    /// File input with no external expectation.
    pub fn file(source: FileSource) -> Self {
        Self::File {
            source,
            expected: None,
        }
    }
}

/// Terminal classification of one verification run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The ledger holds a live record with a real owner. Carries the record.
    Verified(Record),
    /// The lookup succeeded but found nothing: either no record, or the
    /// ledger's zero-owner "never registered" sentinel. The two are
    /// indistinguishable to callers, and deliberately so.
    NotFound,
    /// The run itself failed: hashing, an expectation mismatch, or the
    /// lookup call. Unlike [`NotFound`](Self::NotFound), this says nothing
    /// about the document and may be worth retrying.
    Failed(VerifyError),
}

/// Result of one verification run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationReport {
    /// The fingerprint that was (or would have been) queried. Absent only
    /// when the file could not be hashed.
    pub fingerprint: Option<Fingerprint>,
    pub outcome: VerificationOutcome,
}

impl VerificationReport {
    pub fn is_verified(&self) -> bool {
        matches!(self.outcome, VerificationOutcome::Verified(_))
    }

    /// The verified record, if the outcome is `Verified`.
    pub fn record(&self) -> Option<&Record> {
        match &self.outcome {
            VerificationOutcome::Verified(record) => Some(record),
            _ => None,
        }
    }

    fn failed(fingerprint: Option<Fingerprint>, error: VerifyError) -> Self {
        Self {
            fingerprint,
            outcome: VerificationOutcome::Failed(error),
        }
    }
}

/// Run one verification: resolve a fingerprint, query the ledger, classify.
///
/// All failures are folded into the report; a verification run never panics
/// a batch and never retries.
pub async fn verify<G>(gateway: &G, input: &VerifyInput) -> VerificationReport
where
    G: LedgerGateway + ?Sized,
{
    // Resolving.
    let fingerprint = match input {
        VerifyInput::Reference(fingerprint) => *fingerprint,
        VerifyInput::File { source, expected } => {
            let computed = match DigestEngine::fingerprint_source(source).await {
                Ok(computed) => computed,
                Err(e) => return VerificationReport::failed(None, e.into()),
            };
            if let Some(expected) = expected {
                if *expected != computed {
                    // Disagreement with the shared reference: fail without
                    // querying the ledger at all.
                    return VerificationReport::failed(
                        Some(computed),
                        VerifyError::Mismatch {
                            expected: *expected,
                            computed,
                        },
                    );
                }
            }
            computed
        }
    };

    // Querying.
    debug!(fingerprint = %fingerprint.short_id(), "querying ledger");
    let outcome = match gateway.lookup(&fingerprint).await {
        Ok(Some(record)) if record.has_owner() => VerificationOutcome::Verified(record),
        Ok(_) => VerificationOutcome::NotFound,
        Err(e) => VerificationOutcome::Failed(e.into()),
    };

    VerificationReport {
        fingerprint: Some(fingerprint),
        outcome,
    }
}

/// Verify a batch of inputs as independent, order-preserving runs.
///
/// One input's failure never aborts its siblings; verification is read-only
/// and per-item, in contrast to registration's all-or-nothing submission.
pub async fn verify_batch<G>(gateway: &G, inputs: &[VerifyInput]) -> Vec<VerificationReport>
where
    G: LedgerGateway + ?Sized,
{
    futures::future::join_all(inputs.iter().map(|input| verify(gateway, input))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use docv_gateway::{InMemoryLedgerGateway, LedgerError};
    use docv_types::AccountId;

    fn alice() -> AccountId {
        AccountId::from_raw([1; 20])
    }

    async fn gateway_with(bytes: &[u8]) -> (InMemoryLedgerGateway, Fingerprint) {
        let gateway = InMemoryLedgerGateway::connected(alice());
        let fingerprint = DigestEngine::fingerprint(bytes);
        gateway.register(&fingerprint, "T", "D").await.unwrap();
        (gateway, fingerprint)
    }

    #[tokio::test]
    async fn file_mode_verifies_registered_content() {
        let (gateway, fingerprint) = gateway_with(b"hello").await;
        let input = VerifyInput::file(FileSource::memory("a", b"hello".to_vec()));

        let report = verify(&gateway, &input).await;
        assert_eq!(report.fingerprint, Some(fingerprint));
        let record = report.record().unwrap();
        assert_eq!(record.title, "T");
        assert_eq!(record.owner, alice());
    }

    #[tokio::test]
    async fn reference_mode_passes_the_fingerprint_through() {
        let (gateway, fingerprint) = gateway_with(b"hello").await;
        let report = verify(&gateway, &VerifyInput::Reference(fingerprint)).await;
        assert!(report.is_verified());
    }

    #[tokio::test]
    async fn unregistered_content_is_not_found_never_failed() {
        let gateway = InMemoryLedgerGateway::connected(alice());
        let input = VerifyInput::file(FileSource::memory("a", b"never registered".to_vec()));

        let report = verify(&gateway, &input).await;
        assert_eq!(report.outcome, VerificationOutcome::NotFound);
    }

    #[tokio::test]
    async fn zero_owner_sentinel_reads_as_not_found() {
        // A ledger that answers "no such record" with a zero-owner record
        // must classify the same as a missing record.
        let gateway = InMemoryLedgerGateway::connected(AccountId::ZERO);
        let fingerprint = DigestEngine::fingerprint(b"sentinel");
        gateway.register(&fingerprint, "T", "D").await.unwrap();

        let report = verify(&gateway, &VerifyInput::Reference(fingerprint)).await;
        assert_eq!(report.outcome, VerificationOutcome::NotFound);
    }

    #[tokio::test]
    async fn expectation_mismatch_fails_without_any_ledger_call() {
        let gateway = InMemoryLedgerGateway::connected(alice());
        let input = VerifyInput::File {
            source: FileSource::memory("a", b"actual content".to_vec()),
            expected: Some(DigestEngine::fingerprint(b"something else")),
        };

        let report = verify(&gateway, &input).await;
        assert!(matches!(
            report.outcome,
            VerificationOutcome::Failed(VerifyError::Mismatch { .. })
        ));
        assert_eq!(gateway.total_calls(), 0);
    }

    #[tokio::test]
    async fn matching_expectation_proceeds_to_the_ledger() {
        let (gateway, fingerprint) = gateway_with(b"hello").await;
        let input = VerifyInput::File {
            source: FileSource::memory("a", b"hello".to_vec()),
            expected: Some(fingerprint),
        };
        assert!(verify(&gateway, &input).await.is_verified());
    }

    #[tokio::test]
    async fn transport_failure_is_a_failed_outcome() {
        let (gateway, fingerprint) = gateway_with(b"hello").await;
        gateway.fail_next("link down");

        let report = verify(&gateway, &VerifyInput::Reference(fingerprint)).await;
        assert_eq!(
            report.outcome,
            VerificationOutcome::Failed(VerifyError::Ledger(LedgerError::Transport(
                "link down".into()
            )))
        );
    }

    #[tokio::test]
    async fn unhashable_file_is_a_failed_outcome_with_no_fingerprint() {
        let gateway = InMemoryLedgerGateway::connected(alice());
        let input = VerifyInput::file(FileSource::Path("/nonexistent/docv/missing".into()));

        let report = verify(&gateway, &input).await;
        assert_eq!(report.fingerprint, None);
        assert!(matches!(
            report.outcome,
            VerificationOutcome::Failed(VerifyError::Digest(_))
        ));
    }

    #[tokio::test]
    async fn batch_runs_are_independent_and_order_preserving() {
        let (gateway, _) = gateway_with(b"hello").await;
        let inputs = vec![
            VerifyInput::file(FileSource::memory("ok", b"hello".to_vec())),
            VerifyInput::file(FileSource::memory("absent", b"unknown".to_vec())),
            VerifyInput::File {
                source: FileSource::memory("bad", b"content".to_vec()),
                expected: Some(DigestEngine::fingerprint(b"other")),
            },
        ];

        let reports = verify_batch(&gateway, &inputs).await;
        assert_eq!(reports.len(), 3);
        assert!(reports[0].is_verified());
        assert_eq!(reports[1].outcome, VerificationOutcome::NotFound);
        assert!(matches!(
            reports[2].outcome,
            VerificationOutcome::Failed(VerifyError::Mismatch { .. })
        ));
    }
}
