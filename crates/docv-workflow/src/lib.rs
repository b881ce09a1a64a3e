//! Registration and verification workflows for the DocVerify registry.
//!
//! Each workflow run is a fresh, stateless pass over a
//! [`LedgerGateway`](docv_gateway::LedgerGateway): validate, hash, call,
//! classify. There is no shared mutable state between runs and no automatic
//! retry; every failure is terminal for the run that raised it and the
//! caller decides whether to re-invoke.
//!
//! - [`register`] — select files, fingerprint them in order, submit as one
//!   atomic (single or batch) registration.
//! - [`verify`] / [`verify_batch`] — resolve a fingerprint (by hashing a
//!   file or from a shared reference), query the ledger, and classify the
//!   result as verified, not found, or failed.
//! - [`history`] / [`delete`] / [`delete_all`] — owner-side record
//!   management.

pub mod error;
pub mod history;
pub mod registration;
pub mod verification;

pub use error::{RegistrationError, VerifyError};
pub use history::{delete, delete_all, history, search};
pub use registration::{register, RegistrationReceipt, RegistrationRequest};
pub use verification::{verify, verify_batch, VerificationOutcome, VerificationReport, VerifyInput};
