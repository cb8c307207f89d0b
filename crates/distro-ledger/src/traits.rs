//! Capability traits the mint transition depends on.
//!
//! These are the only ledger operations the core needs. The surrounding
//! ledger framework owns accounts, balances, and supply; the core reads a
//! supply snapshot and requests mutations, nothing more.

use crate::error::Result;

/// Read access to the issued supply of a denom.
pub trait SupplyOracle {
    /// Current total issued supply of `denom`.
    fn current_supply(&self, denom: &str) -> u64;
}

/// Issuance through the module-owned issuer account.
///
/// Neither operation is atomic with the other; atomicity of a mint
/// (issue then transfer) is provided by the host's transactional commit.
pub trait Issuer {
    /// Create `amount` new units of `denom` in the issuer account.
    fn mint(&self, denom: &str, amount: u64) -> Result<()>;

    /// Move `amount` of `denom` from the issuer account to `to`.
    fn transfer(&self, denom: &str, amount: u64, to: &str) -> Result<()>;
}

impl<T: SupplyOracle + ?Sized> SupplyOracle for &T {
    fn current_supply(&self, denom: &str) -> u64 {
        (**self).current_supply(denom)
    }
}

impl<T: Issuer + ?Sized> Issuer for &T {
    fn mint(&self, denom: &str, amount: u64) -> Result<()> {
        (**self).mint(denom, amount)
    }

    fn transfer(&self, denom: &str, amount: u64, to: &str) -> Result<()> {
        (**self).transfer(denom, amount, to)
    }
}
