//! Account address syntax.
//!
//! The core never resolves addresses to accounts; it only needs to know
//! whether a string is a syntactically valid account address on this chain.

use bech32::primitives::decode::CheckedHrpstring;
use bech32::Bech32;

/// Default human-readable prefix of account addresses.
pub const DEFAULT_ADDRESS_PREFIX: &str = "gnodi";

/// Maximum decoded address length in bytes.
pub const MAX_ADDRESS_LEN: usize = 255;

/// Address syntax validator.
pub trait AddressValidator {
    /// Whether `address` is a syntactically valid account address.
    fn is_valid_address(&self, address: &str) -> bool;
}

impl<V: AddressValidator + ?Sized> AddressValidator for &V {
    fn is_valid_address(&self, address: &str) -> bool {
        (**self).is_valid_address(address)
    }
}

/// Bech32 account addresses with a fixed human-readable prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bech32AddressValidator {
    prefix: String,
}

impl Bech32AddressValidator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().to_lowercase(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for Bech32AddressValidator {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS_PREFIX)
    }
}

impl AddressValidator for Bech32AddressValidator {
    fn is_valid_address(&self, address: &str) -> bool {
        let Ok(checked) = CheckedHrpstring::new::<Bech32>(address) else {
            return false;
        };
        if checked.hrp().to_lowercase() != self.prefix {
            return false;
        }
        let len = checked.byte_iter().len();
        (1..=MAX_ADDRESS_LEN).contains(&len)
    }
}
