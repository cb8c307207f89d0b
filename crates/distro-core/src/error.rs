//! Error types for the distro core.

use thiserror::Error;

use crate::calendar::CalendarDate;

/// Errors from calendar parsing and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("date must be in YYYY-MM-DD format: {0:?}")]
    Format(String),

    #[error("month out of range: {0}")]
    MonthOutOfRange(u32),

    #[error("day {day} out of range for {year:04}-{month:02}")]
    DayOutOfRange { year: i32, month: u8, day: u32 },

    #[error("date arithmetic out of range")]
    OutOfRange,

    #[error("end date {end} precedes start date {start}")]
    EndBeforeStart {
        start: CalendarDate,
        end: CalendarDate,
    },
}

/// Validation errors for [`ScheduleParams`](crate::params::ScheduleParams).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("issuing authority set cannot be empty")]
    NoIssuingAuthority,

    #[error("issuing authority address cannot be empty")]
    EmptyIssuingAuthority,

    #[error("invalid issuing authority address: {0}")]
    InvalidIssuingAuthority(String),

    #[error("receiving address cannot be empty")]
    EmptyReceivingAddress,

    #[error("invalid receiving address: {0}")]
    InvalidReceivingAddress(String),

    #[error("denom cannot be empty")]
    EmptyDenom,

    #[error("max supply must be greater than zero")]
    ZeroMaxSupply,

    #[error("schedule start date cannot be empty")]
    EmptyStartDate,

    #[error("schedule start date must be in YYYY-MM-DD format: {0}")]
    InvalidStartDate(DateError),

    #[error("months in halving period must be greater than zero")]
    ZeroHalvingPeriod,
}

impl ParamsError {
    /// The offending address, if this failure concerns a configured address
    /// rather than the monetary policy itself.
    pub fn address(&self) -> Option<&str> {
        match self {
            ParamsError::EmptyIssuingAuthority | ParamsError::EmptyReceivingAddress => Some(""),
            ParamsError::InvalidIssuingAuthority(address)
            | ParamsError::InvalidReceivingAddress(address) => Some(address),
            _ => None,
        }
    }
}

/// Errors from evaluating the halving schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("as-of date {as_of} precedes schedule start {start}")]
    BeforeStart {
        start: CalendarDate,
        as_of: CalendarDate,
    },

    #[error("invalid schedule parameters: {0}")]
    InvalidParams(#[from] ParamsError),

    #[error("calendar error: {0}")]
    Calendar(DateError),

    #[error("arithmetic overflow in schedule computation")]
    Overflow,
}

impl From<DateError> for ScheduleError {
    fn from(e: DateError) -> Self {
        match e {
            DateError::EndBeforeStart { start, end } => ScheduleError::BeforeStart {
                start,
                as_of: end,
            },
            DateError::OutOfRange => ScheduleError::Overflow,
            other => ScheduleError::Calendar(other),
        }
    }
}

/// Errors from the canonical params record codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("unsupported params record version: {0}")]
    UnsupportedVersion(u64),

    #[error("malformed params record: {0}")]
    Malformed(String),

    #[error("params record is not canonically encoded")]
    NonCanonical,

    #[error("decoding error: {0}")]
    Decoding(String),
}
