//! # Distro Testkit
//!
//! Testing utilities for the distro module.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Schedule limits and record bytes with known values
//! - **Generators**: Proptest strategies for dates, params, and requests
//! - **Fixtures**: A loaded module with a fresh ledger and derived addresses
//! - **Simulation**: A seeded run of random mint requests over many blocks
//!
//! ## Golden Vectors
//!
//! ```rust
//! use distro_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, limit) in verify_all_vectors() {
//!     assert!(ok, "{name}: got {limit}");
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use distro_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let committed = fixture.mint_on(&fixture.authorities[0], 1_000, "2025-07-01").unwrap();
//! assert_eq!(committed.limit, 247_945);
//! ```
//!
//! ## Simulation
//!
//! ```rust
//! use distro_testkit::simulation::{simulate, SimulationConfig};
//!
//! let report = simulate(&SimulationConfig { blocks: 200, ..Default::default() }).unwrap();
//! assert!(report.final_supply <= report.final_limit);
//! ```

pub mod fixtures;
pub mod generators;
pub mod simulation;
pub mod vectors;

pub use fixtures::{address, block_time, FaultPoint, FaultyIssuer, TestFixture};
pub use generators::{ScheduleCase, ScheduleCaseParams};
pub use simulation::{simulate, SimulationConfig, SimulationError, SimulationReport};
pub use vectors::{all_vectors, record_vectors, verify_all_vectors, LimitVector, RecordVector};
