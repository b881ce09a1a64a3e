//! Digest engine for the DocVerify registry.
//!
//! Computes the content [`Fingerprint`](docv_types::Fingerprint) of a
//! document: a plain, unkeyed SHA-256 over the full byte content. The hash
//! is deliberately unsalted so that any standard SHA-256 implementation on
//! the other side of the ledger produces the same fingerprint bit-for-bit.

pub mod engine;
pub mod error;
pub mod source;

pub use engine::DigestEngine;
pub use error::DigestError;
pub use source::FileSource;
