//! Error types for ledger collaborators.

use thiserror::Error;

/// Errors returned by [`Issuer`](crate::Issuer) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Zero-amount mint or transfer.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("invalid denom: {0:?}")]
    InvalidDenom(String),

    #[error("invalid recipient: {0:?}")]
    InvalidRecipient(String),

    #[error("insufficient funds in {address}: balance {balance}{denom}, requested {requested}{denom}")]
    InsufficientFunds {
        address: String,
        denom: String,
        balance: u64,
        requested: u64,
    },

    /// Total supply of a denom would overflow.
    #[error("supply overflow for {0}")]
    SupplyOverflow(String),

    #[error("balance overflow for {address} in {denom}")]
    BalanceOverflow { address: String, denom: String },

    /// Rejected by the surrounding ledger for a reason of its own.
    #[error("rejected by ledger: {0}")]
    Rejected(String),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
