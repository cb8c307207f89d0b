//! In-memory ledger.
//!
//! Holds total supply per denom and balances per (address, denom). It stands
//! in for the surrounding ledger framework in tests and simulations, and
//! models the host's transactional state commit through
//! [`MemoryLedger::atomically`].

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{LedgerError, Result};
use crate::traits::{Issuer, SupplyOracle};

/// Default name of the module-owned issuer account.
pub const DEFAULT_ISSUER_ACCOUNT: &str = "distro";

/// In-memory ledger. Thread-safe via RwLock.
#[derive(Debug)]
pub struct MemoryLedger {
    issuer_account: String,
    state: RwLock<LedgerState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LedgerState {
    /// Total issued supply by denom.
    supply: BTreeMap<String, u64>,
    /// Balances by (address, denom).
    balances: BTreeMap<(String, String), u64>,
}

impl MemoryLedger {
    /// Create an empty ledger whose issuer account is `issuer_account`.
    pub fn new(issuer_account: impl Into<String>) -> Self {
        Self {
            issuer_account: issuer_account.into(),
            state: RwLock::new(LedgerState::default()),
        }
    }

    pub fn issuer_account(&self) -> &str {
        &self.issuer_account
    }

    /// Credit a genesis allocation: raises both the balance and the supply.
    pub fn allocate(&self, address: &str, denom: &str, amount: u64) -> Result<()> {
        let mut state = self.write();
        let supply = state.supply.get(denom).copied().unwrap_or(0);
        let new_supply = supply
            .checked_add(amount)
            .ok_or_else(|| LedgerError::SupplyOverflow(denom.to_string()))?;
        let new_balance = credited(&state, address, denom, amount)?;
        state.supply.insert(denom.to_string(), new_supply);
        state
            .balances
            .insert((address.to_string(), denom.to_string()), new_balance);
        Ok(())
    }

    pub fn balance(&self, address: &str, denom: &str) -> u64 {
        balance_of(&self.read(), address, denom)
    }

    pub fn issuer_balance(&self, denom: &str) -> u64 {
        self.balance(&self.issuer_account, denom)
    }

    /// Run `f` against a branch of this ledger, committing the branch only
    /// if `f` returns `Ok`.
    ///
    /// On `Err` nothing `f` did is observable. The ledger stays write-locked
    /// until the branch commits or is dropped, so concurrent branches are
    /// serialized. `f` must work through the branch it is given; touching
    /// `self` from inside `f` deadlocks.
    pub fn atomically<T, E>(
        &self,
        f: impl FnOnce(&MemoryLedger) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        let mut state = self.write();
        let branch = MemoryLedger {
            issuer_account: self.issuer_account.clone(),
            state: RwLock::new(state.clone()),
        };

        let out = f(&branch)?;

        *state = branch
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        tracing::trace!("ledger branch committed");
        Ok(out)
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_ISSUER_ACCOUNT)
    }
}

impl SupplyOracle for MemoryLedger {
    fn current_supply(&self, denom: &str) -> u64 {
        self.read().supply.get(denom).copied().unwrap_or(0)
    }
}

impl Issuer for MemoryLedger {
    fn mint(&self, denom: &str, amount: u64) -> Result<()> {
        check_amount(denom, amount)?;
        let mut state = self.write();

        let supply = state.supply.get(denom).copied().unwrap_or(0);
        let new_supply = supply
            .checked_add(amount)
            .ok_or_else(|| LedgerError::SupplyOverflow(denom.to_string()))?;
        let new_balance = credited(&state, &self.issuer_account, denom, amount)?;

        state.supply.insert(denom.to_string(), new_supply);
        state
            .balances
            .insert((self.issuer_account.clone(), denom.to_string()), new_balance);

        tracing::trace!(denom, amount, supply = new_supply, "minted");
        Ok(())
    }

    fn transfer(&self, denom: &str, amount: u64, to: &str) -> Result<()> {
        check_amount(denom, amount)?;
        if to.is_empty() {
            return Err(LedgerError::InvalidRecipient(to.to_string()));
        }
        if to == self.issuer_account {
            return Ok(());
        }
        let mut state = self.write();

        let balance = balance_of(&state, &self.issuer_account, denom);
        if balance < amount {
            return Err(LedgerError::InsufficientFunds {
                address: self.issuer_account.clone(),
                denom: denom.to_string(),
                balance,
                requested: amount,
            });
        }
        let recipient_balance = credited(&state, to, denom, amount)?;

        state.balances.insert(
            (self.issuer_account.clone(), denom.to_string()),
            balance - amount,
        );
        state
            .balances
            .insert((to.to_string(), denom.to_string()), recipient_balance);

        tracing::trace!(denom, amount, to, "transferred from issuer");
        Ok(())
    }
}

fn check_amount(denom: &str, amount: u64) -> Result<()> {
    if denom.is_empty() {
        return Err(LedgerError::InvalidDenom(denom.to_string()));
    }
    if amount == 0 {
        return Err(LedgerError::ZeroAmount);
    }
    Ok(())
}

fn balance_of(state: &LedgerState, address: &str, denom: &str) -> u64 {
    state
        .balances
        .get(&(address.to_string(), denom.to_string()))
        .copied()
        .unwrap_or(0)
}

/// Balance of `address` after crediting `amount`.
fn credited(state: &LedgerState, address: &str, denom: &str, amount: u64) -> Result<u64> {
    balance_of(state, address, denom)
        .checked_add(amount)
        .ok_or_else(|| LedgerError::BalanceOverflow {
            address: address.to_string(),
            denom: denom.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALICE: &str = "gnodi1qgpqyqszqgpqyqszqgpqyqszqgpqyqszyhvy2g";

    #[test]
    fn test_mint_raises_supply_and_issuer_balance() {
        let ledger = MemoryLedger::default();
        ledger.mint("ugnod", 100).unwrap();
        ledger.mint("ugnod", 50).unwrap();

        assert_eq!(ledger.current_supply("ugnod"), 150);
        assert_eq!(ledger.issuer_balance("ugnod"), 150);
        assert_eq!(ledger.current_supply("other"), 0);
    }

    #[test]
    fn test_transfer_moves_funds_out_of_issuer() {
        let ledger = MemoryLedger::default();
        ledger.mint("ugnod", 100).unwrap();
        ledger.transfer("ugnod", 60, ALICE).unwrap();

        assert_eq!(ledger.issuer_balance("ugnod"), 40);
        assert_eq!(ledger.balance(ALICE, "ugnod"), 60);
        assert_eq!(ledger.current_supply("ugnod"), 100);
    }

    #[test]
    fn test_transfer_insufficient_funds() {
        let ledger = MemoryLedger::default();
        ledger.mint("ugnod", 10).unwrap();
        let err = ledger.transfer("ugnod", 11, ALICE).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientFunds {
                balance: 10,
                requested: 11,
                ..
            }
        ));
        assert_eq!(ledger.issuer_balance("ugnod"), 10);
    }

    #[test]
    fn test_rejects_zero_and_empty() {
        let ledger = MemoryLedger::default();
        assert_eq!(ledger.mint("ugnod", 0), Err(LedgerError::ZeroAmount));
        assert!(matches!(ledger.mint("", 1), Err(LedgerError::InvalidDenom(_))));
        ledger.mint("ugnod", 1).unwrap();
        assert!(matches!(
            ledger.transfer("ugnod", 1, ""),
            Err(LedgerError::InvalidRecipient(_))
        ));
    }

    #[test]
    fn test_supply_overflow() {
        let ledger = MemoryLedger::default();
        ledger.mint("ugnod", u64::MAX).unwrap();
        assert!(matches!(
            ledger.mint("ugnod", 1),
            Err(LedgerError::SupplyOverflow(_))
        ));
        assert_eq!(ledger.current_supply("ugnod"), u64::MAX);
    }

    #[test]
    fn test_allocate() {
        let ledger = MemoryLedger::default();
        ledger.allocate(ALICE, "ugnod", 500).unwrap();
        assert_eq!(ledger.balance(ALICE, "ugnod"), 500);
        assert_eq!(ledger.current_supply("ugnod"), 500);
        assert_eq!(ledger.issuer_balance("ugnod"), 0);
    }

    #[test]
    fn test_atomically_commits_on_ok() {
        let ledger = MemoryLedger::default();
        let out: Result<u64> = ledger.atomically(|tx| {
            tx.mint("ugnod", 100)?;
            tx.transfer("ugnod", 100, ALICE)?;
            Ok(tx.current_supply("ugnod"))
        });
        assert_eq!(out.unwrap(), 100);
        assert_eq!(ledger.balance(ALICE, "ugnod"), 100);
    }

    #[test]
    fn test_atomically_discards_on_err() {
        let ledger = MemoryLedger::default();
        let out: Result<()> = ledger.atomically(|tx| {
            tx.mint("ugnod", 100)?;
            tx.transfer("ugnod", 101, ALICE)
        });
        assert!(out.is_err());
        assert_eq!(ledger.current_supply("ugnod"), 0);
        assert_eq!(ledger.issuer_balance("ugnod"), 0);
    }

    #[test]
    fn test_concurrent_branches_all_commit() {
        let ledger = MemoryLedger::default();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..250 {
                        let out: Result<()> = ledger.atomically(|tx| {
                            tx.mint("ugnod", 1)?;
                            std::thread::yield_now();
                            tx.transfer("ugnod", 1, ALICE)
                        });
                        out.unwrap();
                    }
                });
            }
        });
        assert_eq!(ledger.current_supply("ugnod"), 1_000);
        assert_eq!(ledger.balance(ALICE, "ugnod"), 1_000);
    }

    proptest! {
        #[test]
        fn prop_failed_branch_leaves_no_trace(
            seeded in 0u64..1_000_000,
            minted in 1u64..1_000_000,
            excess in 1u64..1_000,
        ) {
            let ledger = MemoryLedger::default();
            if seeded > 0 {
                ledger.mint("ugnod", seeded).unwrap();
            }
            let before = ledger.current_supply("ugnod");
            let out: Result<()> = ledger.atomically(|tx| {
                tx.mint("ugnod", minted)?;
                tx.transfer("ugnod", seeded + minted + excess, ALICE)
            });
            prop_assert!(out.is_err());
            prop_assert_eq!(ledger.current_supply("ugnod"), before);
            prop_assert_eq!(ledger.balance(ALICE, "ugnod"), 0);
        }
    }
}
