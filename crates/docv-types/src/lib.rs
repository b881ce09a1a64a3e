//! Foundation types for the DocVerify registry.
//!
//! This crate provides the identity and record types used throughout the
//! workspace. Every other docv crate depends on `docv-types`.
//!
//! # Key Types
//!
//! - [`Fingerprint`] — Content-addressed document digest (SHA-256, 64 hex chars)
//! - [`AccountId`] — Ledger identity of a submitting account, with a zero sentinel
//! - [`Record`] — The unit stored by the ledger: fingerprint plus metadata
//! - [`TransactionReceipt`] — Opaque handle returned by ledger writes

pub mod error;
pub mod fingerprint;
pub mod identity;
pub mod record;

pub use error::TypeError;
pub use fingerprint::Fingerprint;
pub use identity::AccountId;
pub use record::{Record, TransactionReceipt};
