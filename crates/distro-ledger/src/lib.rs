//! # Distro Ledger
//!
//! The ledger operations the mint transition depends on, as capability
//! traits, plus an in-memory implementation.
//!
//! The surrounding ledger framework owns supply and balances. The mint
//! transition only reads a supply snapshot through [`SupplyOracle`] and
//! requests mutations through [`Issuer`].
//!
//! ## Transactional Commit
//!
//! A mint is an issuance followed by a transfer. Neither trait promises that
//! the pair is atomic; the host does, by running the transition inside its
//! own transaction. [`MemoryLedger::atomically`] models that commit: the
//! closure runs against a branch, and the branch replaces the ledger state
//! only if the closure succeeds.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{LedgerError, Result};
pub use memory::{MemoryLedger, DEFAULT_ISSUER_ACCOUNT};
pub use traits::{Issuer, SupplyOracle};
