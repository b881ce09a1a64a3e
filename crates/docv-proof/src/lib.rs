//! Proof artifacts for the DocVerify registry.
//!
//! Given a verified [`Record`](docv_types::Record), this crate produces the
//! portable proof of it: a canonical verification URL, a scannable QR code
//! of that URL, and optionally a copy of the original PDF with the proof
//! overlaid on its last page.
//!
//! The registry never stores these artifacts; they are handed back to the
//! caller for display or download.

pub mod artifact;
pub mod error;
pub mod link;
pub mod pdf;

pub use artifact::{build_proof, ProofArtifact};
pub use error::{EmbedError, LinkError, ProofError};
pub use pdf::embed_proof;
