use qrcode::QrCode;

use docv_types::Record;

use crate::error::ProofError;
use crate::link;

/// Portable proof of a verified record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofArtifact {
    /// Canonical verification URL carrying the record's fingerprint.
    pub canonical_url: String,
    /// The URL as a QR code rendered with Unicode block characters,
    /// suitable for terminal display or copy-paste.
    pub qr_unicode: String,
}

/// Build the proof artifact for a record.
pub fn build_proof(record: &Record, base_url: &str) -> Result<ProofArtifact, ProofError> {
    let canonical_url = link::build(base_url, &record.fingerprint)?;
    let qr = QrCode::new(canonical_url.as_bytes())
        .map_err(|e| ProofError::QrEncode(e.to_string()))?;
    let qr_unicode = qr
        .render::<char>()
        .quiet_zone(true)
        .module_dimensions(2, 1)
        .build();

    Ok(ProofArtifact {
        canonical_url,
        qr_unicode,
    })
}
