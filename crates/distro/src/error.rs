//! Error types for the mint transition.

use distro_core::{ParamsError, ScheduleError};
use distro_ledger::LedgerError;
use thiserror::Error;

/// Why a mint request was rejected.
///
/// Every variant is terminal for the request. The enclosing transaction is
/// rejected as a whole and nothing the request did is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MintError {
    /// Params fail validation, or the as-of date precedes the schedule start.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(ScheduleError),

    /// The signer or a configured address is not a valid account address.
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("signer {signer} is not an issuing authority")]
    Unauthorized { signer: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Cumulative supply would pass the absolute ceiling.
    #[error("max supply exceeded: {current_supply} + {requested} > {max_supply}")]
    MaxSupplyExceeded {
        requested: u64,
        current_supply: u64,
        max_supply: u64,
    },

    /// Cumulative supply would pass the halving schedule limit.
    #[error("schedule limit exceeded: {current_supply} + {requested} > {limit}")]
    ScheduleLimitExceeded {
        requested: u64,
        current_supply: u64,
        limit: u64,
    },

    /// Issuance or transfer failed in the ledger. Carried unchanged.
    #[error("ledger failure: {0}")]
    CollaboratorFailure(#[from] LedgerError),
}

impl MintError {
    /// Stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            MintError::InvalidSchedule(_) => "InvalidSchedule",
            MintError::InvalidAddress(_) => "InvalidAddress",
            MintError::Unauthorized { .. } => "Unauthorized",
            MintError::InvalidRequest(_) => "InvalidRequest",
            MintError::MaxSupplyExceeded { .. } => "MaxSupplyExceeded",
            MintError::ScheduleLimitExceeded { .. } => "ScheduleLimitExceeded",
            MintError::CollaboratorFailure(_) => "CollaboratorFailure",
        }
    }
}

impl From<ParamsError> for MintError {
    fn from(e: ParamsError) -> Self {
        match e.address() {
            Some(address) => MintError::InvalidAddress(address.to_string()),
            None => MintError::InvalidSchedule(ScheduleError::InvalidParams(e)),
        }
    }
}

impl From<ScheduleError> for MintError {
    fn from(e: ScheduleError) -> Self {
        match e {
            ScheduleError::InvalidParams(p) => p.into(),
            other => MintError::InvalidSchedule(other),
        }
    }
}

/// Result type for mint operations.
pub type Result<T> = std::result::Result<T, MintError>;

#[cfg(test)]
mod tests {
    use super::*;
    use distro_core::{CalendarDate, DateError};

    #[test]
    fn test_params_errors_split_by_kind() {
        let e: MintError = ParamsError::InvalidReceivingAddress("gnodi1bogus".into()).into();
        assert_eq!(e, MintError::InvalidAddress("gnodi1bogus".into()));

        let e: MintError = ParamsError::ZeroMaxSupply.into();
        assert_eq!(e.kind(), "InvalidSchedule");

        let e: MintError = ParamsError::NoIssuingAuthority.into();
        assert_eq!(e.kind(), "InvalidSchedule");
    }

    #[test]
    fn test_schedule_errors_unwrap_params() {
        let e: MintError = ScheduleError::InvalidParams(ParamsError::EmptyReceivingAddress).into();
        assert_eq!(e.kind(), "InvalidAddress");

        let start = CalendarDate::new(2025, 1, 1).unwrap();
        let as_of = CalendarDate::new(2024, 12, 31).unwrap();
        let e: MintError = ScheduleError::from(DateError::EndBeforeStart { start, end: as_of }).into();
        assert_eq!(
            e,
            MintError::InvalidSchedule(ScheduleError::BeforeStart { start, as_of })
        );
    }

    #[test]
    fn test_ledger_errors_pass_through() {
        let e: MintError = LedgerError::ZeroAmount.into();
        assert_eq!(e, MintError::CollaboratorFailure(LedgerError::ZeroAmount));
        assert_eq!(e.kind(), "CollaboratorFailure");
    }
}
