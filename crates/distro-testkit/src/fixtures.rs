//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use bech32::{Bech32, Hrp};
use distro::{
    BlockTime, CalendarDate, DistroModule, Issuer, LedgerError, MemoryLedger, MintCommitted,
    MintError, MintRequest, ModuleConfig, ScheduleParams, SupplyOracle,
};
use distro_core::DEFAULT_ADDRESS_PREFIX;

const SECONDS_PER_DAY: i64 = 86_400;

/// A loaded module with an empty ledger.
pub struct TestFixture {
    pub module: DistroModule,
    pub ledger: MemoryLedger,
    pub authorities: Vec<String>,
    pub receiver: String,
}

impl TestFixture {
    /// One authority; 1,000,000 max supply halving yearly from 2025-01-01.
    pub fn new() -> Self {
        Self::with_authorities(1)
    }

    /// `count` authorities, derived from seeds `1..=count`.
    pub fn with_authorities(count: u8) -> Self {
        let authorities: Vec<String> = (1..=count).map(address).collect();
        let params = ScheduleParams::new(
            authorities.iter().cloned(),
            address(0),
            "ugnod",
            1_000_000,
            "2025-01-01",
            12,
        );
        Self::with_params(params).expect("fixture params are valid")
    }

    pub fn with_params(params: ScheduleParams) -> Result<Self, MintError> {
        let authorities = params.issuing_authorities.iter().cloned().collect();
        let receiver = params.receiving_address.clone();
        let module = DistroModule::new(ModuleConfig::default(), params)?;
        let ledger = module.new_ledger();
        Ok(Self {
            module,
            ledger,
            authorities,
            receiver,
        })
    }

    /// Submit a mint at midnight UTC of `date` (`YYYY-MM-DD`).
    pub fn mint_on(
        &self,
        signer: &str,
        amount: u64,
        date: &str,
    ) -> Result<MintCommitted, MintError> {
        self.module.handle_mint(
            &self.ledger,
            &MintRequest::new(signer, amount),
            block_time(parse_date(date)),
        )
    }

    pub fn supply(&self) -> u64 {
        self.ledger.current_supply(&self.module.params().denom)
    }

    /// Schedule limit at `date`.
    pub fn limit_on(&self, date: &str) -> u64 {
        self.module
            .schedule()
            .maximum_cumulative_issuance(parse_date(date))
            .expect("date is on or after the schedule start")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic account address: 20 bytes of `seed` under the default prefix.
pub fn address(seed: u8) -> String {
    let hrp = Hrp::parse(DEFAULT_ADDRESS_PREFIX).expect("default prefix is a valid hrp");
    bech32::encode::<Bech32>(hrp, &[seed; 20]).expect("20-byte payload fits")
}

/// Midnight UTC of `date`.
pub fn block_time(date: CalendarDate) -> BlockTime {
    BlockTime::from_unix_seconds(date.day_number() * SECONDS_PER_DAY)
}

fn parse_date(date: &str) -> CalendarDate {
    CalendarDate::parse(date).expect("fixture dates are YYYY-MM-DD")
}

/// Where a [`FaultyIssuer`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPoint {
    Mint,
    Transfer,
}

/// Issuer that delegates to a ledger but fails at one point.
pub struct FaultyIssuer<'a> {
    inner: &'a MemoryLedger,
    fault: FaultPoint,
}

impl<'a> FaultyIssuer<'a> {
    pub fn new(inner: &'a MemoryLedger, fault: FaultPoint) -> Self {
        Self { inner, fault }
    }

    fn injected() -> LedgerError {
        LedgerError::Rejected("injected fault".into())
    }
}

impl Issuer for FaultyIssuer<'_> {
    fn mint(&self, denom: &str, amount: u64) -> distro::ledger::Result<()> {
        if self.fault == FaultPoint::Mint {
            return Err(Self::injected());
        }
        self.inner.mint(denom, amount)
    }

    fn transfer(&self, denom: &str, amount: u64, to: &str) -> distro::ledger::Result<()> {
        if self.fault == FaultPoint::Transfer {
            return Err(Self::injected());
        }
        self.inner.transfer(denom, amount, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use distro::{Bech32AddressValidator, MintTransition};

    #[test]
    fn test_addresses_are_stable() {
        assert_eq!(address(1), "gnodi1qyqszqgpqyqszqgpqyqszqgpqyqszqgp4n2pp7");
        assert_eq!(address(2), "gnodi1qgpqyqszqgpqyqszqgpqyqszqgpqyqszyhvy2g");
        assert_ne!(address(0), address(1));
    }

    #[test]
    fn test_fixture_mints() {
        let fixture = TestFixture::with_authorities(3);
        assert_eq!(fixture.authorities.len(), 3);

        for signer in &fixture.authorities {
            fixture.mint_on(signer, 100, "2025-07-01").unwrap();
        }
        assert_eq!(fixture.supply(), 300);
        assert_eq!(fixture.ledger.balance(&fixture.receiver, "ugnod"), 300);
        assert_eq!(fixture.limit_on("2026-01-01"), 500_000);
    }

    #[test]
    fn test_faults_leave_no_trace() {
        let fixture = TestFixture::new();
        let params = fixture.module.params();
        let request = MintRequest::new(fixture.authorities[0].clone(), 1_000);
        let as_of = CalendarDate::parse("2025-07-01").unwrap();

        for fault in [FaultPoint::Mint, FaultPoint::Transfer] {
            let result = fixture.ledger.atomically(|tx| {
                MintTransition::new(
                    tx,
                    FaultyIssuer::new(tx, fault),
                    Bech32AddressValidator::default(),
                )
                .process_mint(&request, params, as_of)
            });
            assert_eq!(
                result.unwrap_err(),
                MintError::CollaboratorFailure(LedgerError::Rejected("injected fault".into()))
            );
            assert_eq!(fixture.supply(), 0);
            assert_eq!(fixture.ledger.issuer_balance("ugnod"), 0);
        }
    }
}
