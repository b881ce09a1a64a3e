use tracing::{debug, info};

use docv_digest::{DigestEngine, FileSource};
use docv_gateway::LedgerGateway;
use docv_types::{Fingerprint, TransactionReceipt};

use crate::error::RegistrationError;

/// Caller input for one registration run.
#[derive(Clone, Debug)]
pub struct RegistrationRequest {
    /// Short human-readable label for the record(s). Required.
    pub title: String,
    /// Free-text description. Required at submission time.
    pub description: String,
    /// The files to register, in selection order.
    pub files: Vec<FileSource>,
}

impl RegistrationRequest {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        files: Vec<FileSource>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            files,
        }
    }
}

/// Result of a successful registration run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationReceipt {
    /// The submitted fingerprints, in input order, for downstream display
    /// and proof generation.
    pub fingerprints: Vec<Fingerprint>,
    /// The ledger's receipt for the (single or batch) submission.
    pub transaction: TransactionReceipt,
}

/// Run the registration workflow: guard, hash, submit.
///
/// Entry guards (connected identity, non-empty metadata, at least one file)
/// short-circuit with [`RegistrationError::Validation`] before any ledger
/// contact. Hashing failures abort the whole run; nothing is ever partially
/// submitted. One file goes through `register`, several through the atomic
/// `register_batch`.
pub async fn register<G>(
    gateway: &G,
    request: &RegistrationRequest,
) -> Result<RegistrationReceipt, RegistrationError>
where
    G: LedgerGateway + ?Sized,
{
    let identity = gateway
        .connected_identity()
        .filter(|id| !id.is_zero())
        .ok_or_else(|| RegistrationError::Validation("no identity connected".into()))?;
    if request.title.trim().is_empty() {
        return Err(RegistrationError::Validation("title must not be empty".into()));
    }
    if request.description.trim().is_empty() {
        return Err(RegistrationError::Validation(
            "description must not be empty".into(),
        ));
    }
    if request.files.is_empty() {
        return Err(RegistrationError::Validation(
            "select at least one file".into(),
        ));
    }

    debug!(%identity, files = request.files.len(), "hashing selected files");
    let mut fingerprints = Vec::with_capacity(request.files.len());
    for source in &request.files {
        // The first hashing failure aborts the run; nothing has been
        // submitted yet, so there is no partial registration to undo.
        let fingerprint = DigestEngine::fingerprint_source(source).await?;
        debug!(file = %source.name(), fingerprint = %fingerprint.short_id(), "hashed");
        fingerprints.push(fingerprint);
    }

    let transaction: TransactionReceipt = match fingerprints.as_slice() {
        [single] => {
            gateway
                .register(single, &request.title, &request.description)
                .await?
        }
        many => {
            gateway
                .register_batch(many, &request.title, &request.description)
                .await?
        }
    };

    info!(
        count = fingerprints.len(),
        tx = %transaction.tx_hash,
        "registration submitted"
    );
    Ok(RegistrationReceipt {
        fingerprints,
        transaction,
    })
}
