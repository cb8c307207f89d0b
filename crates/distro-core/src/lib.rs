//! # Distro Core
//!
//! Pure primitives for the distro emission module: calendar math, schedule
//! parameters, and the halving supply-limit calculator.
//!
//! This crate contains no I/O, no storage, no clock reads. Every function is
//! a deterministic computation over its explicit inputs, so independent
//! executors of the replicated state machine agree bit-for-bit.
//!
//! ## Key Types
//!
//! - [`ScheduleParams`] - The configured monetary policy, as stored
//! - [`Schedule`] - The parsed, validated policy the calculator runs on
//! - [`ScheduleSnapshot`] - Every intermediate of one limit evaluation
//! - [`CalendarDate`] - A time-zone-free Gregorian date
//! - [`ParamsDigest`] - Fingerprint of the canonical params record
//!
//! ## Usage
//!
//! ```rust
//! use distro_core::{CalendarDate, Schedule};
//!
//! let start = CalendarDate::parse("2025-01-01").unwrap();
//! let schedule = Schedule::new(1_000_000, start, 12).unwrap();
//!
//! let mid_year = CalendarDate::parse("2025-07-01").unwrap();
//! assert_eq!(schedule.maximum_cumulative_issuance(mid_year).unwrap(), 247_945);
//! ```

pub mod address;
pub mod calendar;
pub mod error;
pub mod params;
pub mod record;
pub mod schedule;
pub mod types;

pub use address::{AddressValidator, Bech32AddressValidator, DEFAULT_ADDRESS_PREFIX};
pub use calendar::{days_between, months_between, CalendarDate};
pub use error::{DateError, ParamsError, RecordError, ScheduleError};
pub use params::ScheduleParams;
pub use record::{decode_params_record, encode_params_record, PARAMS_RECORD_VERSION};
pub use schedule::{maximum_cumulative_issuance, period_yearly_limit, Schedule, ScheduleSnapshot};
pub use types::{BlockTime, ParamsDigest};
