//! Ledger gateway for the DocVerify registry.
//!
//! The ledger itself is an external service of record reached through a
//! request/response contract; this crate defines that boundary as the
//! [`LedgerGateway`] trait and ships an in-memory implementation for tests,
//! local demos, and embedding.
//!
//! Every gateway call may suspend for an unbounded, externally determined
//! duration and may fail due to network loss, a disconnected identity, or
//! remote rejection. Nothing here retries automatically; failures are
//! surfaced and the caller decides.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedgerGateway;
pub use traits::LedgerGateway;
