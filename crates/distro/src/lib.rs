//! # Distro
//!
//! A deterministic halving token-emission controller for a replicated
//! ledger.
//!
//! ## Overview
//!
//! A fixed set of issuing authorities may mint new units of one denom into
//! a receiving account, subject to two caps:
//!
//! - **Max supply**: an absolute ceiling on cumulative issuance
//! - **Schedule limit**: a time-based ceiling that halves every
//!   `halving_period_months` calendar months, pro-rated by day within the
//!   current period
//!
//! The tighter cap governs. The schedule limit approaches but never reaches
//! max supply.
//!
//! ## Determinism
//!
//! Block time is supplied by the caller and converted to a calendar date;
//! nothing here reads a clock. All arithmetic is integer arithmetic with
//! explicit overflow checks, so independent executors agree exactly.
//!
//! ## Usage
//!
//! ```rust
//! use distro::{BlockTime, DistroModule, MintRequest, ModuleConfig, ScheduleParams};
//!
//! let authority = "gnodi1qyqszqgpqyqszqgpqyqszqgpqyqszqgp4n2pp7";
//! let receiver = "gnodi1qgpqyqszqgpqyqszqgpqyqszqgpqyqszyhvy2g";
//! let params = ScheduleParams::new([authority], receiver, "ugnod", 1_000_000, "2025-01-01", 12);
//!
//! let module = DistroModule::new(ModuleConfig::default(), params).unwrap();
//! let ledger = module.new_ledger();
//!
//! // 2025-07-01: 181 of 365 days into the first period.
//! let block_time = BlockTime::from_unix_seconds(1_751_328_000);
//! let committed = module
//!     .handle_mint(&ledger, &MintRequest::new(authority, 200_000), block_time)
//!     .unwrap();
//! assert_eq!(committed.limit, 247_945);
//! ```
//!
//! ## Re-exports
//!
//! - `distro::core` - Calendar math, params, and the limit calculator
//! - `distro::ledger` - Collaborator traits and the in-memory ledger

pub mod error;
pub mod mint;
pub mod module;

// Re-export component crates
pub use distro_core as core;
pub use distro_ledger as ledger;

pub use error::{MintError, Result};
pub use mint::{MintCommitted, MintPermit, MintRequest, MintTransition};
pub use module::{DistroModule, ModuleConfig};

// Re-export commonly used core types
pub use distro_core::{
    maximum_cumulative_issuance, AddressValidator, Bech32AddressValidator, BlockTime,
    CalendarDate, ParamsDigest, Schedule, ScheduleError, ScheduleParams, ScheduleSnapshot,
};
pub use distro_ledger::{Issuer, LedgerError, MemoryLedger, SupplyOracle};
