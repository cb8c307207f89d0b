//! End-to-end mint scenarios against the in-memory ledger.

use std::cell::Cell;

use distro::{
    Bech32AddressValidator, BlockTime, CalendarDate, DistroModule, Issuer, LedgerError,
    MemoryLedger, MintError, MintRequest, MintTransition, ModuleConfig, ScheduleParams,
    SupplyOracle,
};

const AUTHORITY: &str = "gnodi1qyqszqgpqyqszqgpqyqszqgpqyqszqgp4n2pp7";
const SECOND_AUTHORITY: &str = "gnodi1qszqgpqyqszqgpqyqszqgpqyqszqgpqy9h2q84";
const RECEIVER: &str = "gnodi1qgpqyqszqgpqyqszqgpqyqszqgpqyqszyhvy2g";
const OUTSIDER: &str = "gnodi1qvpsxqcrqvpsxqcrqvpsxqcrqvpsxqcr98d9qf";

const DAY: i64 = 86_400;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn params() -> ScheduleParams {
    ScheduleParams::new(
        [AUTHORITY, SECOND_AUTHORITY],
        RECEIVER,
        "ugnod",
        1_000_000,
        "2025-01-01",
        12,
    )
}

fn date(s: &str) -> CalendarDate {
    CalendarDate::parse(s).unwrap()
}

/// Midnight UTC of `s`.
fn block_time(s: &str) -> BlockTime {
    BlockTime::from_unix_seconds(date(s).day_number() * DAY)
}

/// Oracle that counts reads.
struct CountingOracle {
    supply: u64,
    reads: Cell<u32>,
}

impl CountingOracle {
    fn new(supply: u64) -> Self {
        Self {
            supply,
            reads: Cell::new(0),
        }
    }
}

impl SupplyOracle for CountingOracle {
    fn current_supply(&self, _denom: &str) -> u64 {
        self.reads.set(self.reads.get() + 1);
        self.supply
    }
}

/// Issuer that mints through the wrapped ledger and rejects every transfer.
struct RejectTransfers<'a>(&'a MemoryLedger);

impl Issuer for RejectTransfers<'_> {
    fn mint(&self, denom: &str, amount: u64) -> distro::ledger::Result<()> {
        self.0.mint(denom, amount)
    }

    fn transfer(&self, _denom: &str, _amount: u64, _to: &str) -> distro::ledger::Result<()> {
        Err(LedgerError::Rejected("receiving account is blocked".into()))
    }
}

#[test]
fn test_unauthorized_signer_never_reads_supply() {
    init_tracing();
    let oracle = CountingOracle::new(0);
    let ledger = MemoryLedger::default();
    let t = MintTransition::new(&oracle, &ledger, Bech32AddressValidator::default());

    let err = t
        .process_mint(&MintRequest::new(OUTSIDER, 10), &params(), date("2025-07-01"))
        .unwrap_err();
    assert_eq!(
        err,
        MintError::Unauthorized {
            signer: OUTSIDER.into()
        }
    );
    assert_eq!(oracle.reads.get(), 0);

    let err = t
        .process_mint(&MintRequest::new("gnodi1bogus", 10), &params(), date("2025-07-01"))
        .unwrap_err();
    assert_eq!(err.kind(), "InvalidAddress");
    assert_eq!(oracle.reads.get(), 0);

    t.process_mint(&MintRequest::new(AUTHORITY, 10), &params(), date("2025-07-01"))
        .unwrap();
    assert_eq!(oracle.reads.get(), 1);
}

#[test]
fn test_max_supply_governs_when_tighter() {
    init_tracing();
    // Supply already near the ceiling, e.g. from a genesis allocation.
    let oracle = CountingOracle::new(999_999);
    let ledger = MemoryLedger::default();
    let t = MintTransition::new(&oracle, &ledger, Bech32AddressValidator::default());

    let err = t
        .process_mint(&MintRequest::new(AUTHORITY, 2), &params(), date("2035-01-01"))
        .unwrap_err();
    assert_eq!(
        err,
        MintError::MaxSupplyExceeded {
            requested: 2,
            current_supply: 999_999,
            max_supply: 1_000_000,
        }
    );
    assert_eq!(ledger.current_supply("ugnod"), 0);
}

#[test]
fn test_schedule_limit_governs_when_tighter() {
    init_tracing();
    let ledger = MemoryLedger::default();
    let t = MintTransition::new(&ledger, &ledger, Bech32AddressValidator::default());

    // Well under max supply, over the mid-2025 limit of 247,945.
    let err = t
        .process_mint(&MintRequest::new(AUTHORITY, 300_000), &params(), date("2025-07-01"))
        .unwrap_err();
    assert_eq!(
        err,
        MintError::ScheduleLimitExceeded {
            requested: 300_000,
            current_supply: 0,
            limit: 247_945,
        }
    );
    assert_eq!(ledger.current_supply("ugnod"), 0);
}

#[test]
fn test_failed_transfer_leaves_supply_unchanged() {
    init_tracing();
    let ledger = MemoryLedger::default();

    let result = ledger.atomically(|tx| {
        MintTransition::new(tx, RejectTransfers(tx), Bech32AddressValidator::default())
            .process_mint(&MintRequest::new(AUTHORITY, 1_000), &params(), date("2025-07-01"))
    });

    assert_eq!(
        result.unwrap_err(),
        MintError::CollaboratorFailure(LedgerError::Rejected(
            "receiving account is blocked".into()
        ))
    );
    assert_eq!(ledger.current_supply("ugnod"), 0);
    assert_eq!(ledger.issuer_balance("ugnod"), 0);
    assert_eq!(ledger.balance(RECEIVER, "ugnod"), 0);
}

#[test]
fn test_existing_issuer_funds_are_not_paid_out() {
    init_tracing();
    let module = DistroModule::new(ModuleConfig::default(), params()).unwrap();
    let ledger = module.new_ledger();
    ledger.mint("ugnod", 100).unwrap();

    module
        .handle_mint(
            &ledger,
            &MintRequest::new(AUTHORITY, 50),
            block_time("2025-07-01"),
        )
        .unwrap();
    assert_eq!(ledger.current_supply("ugnod"), 150);
    assert_eq!(ledger.balance(RECEIVER, "ugnod"), 50);
    assert_eq!(ledger.issuer_balance("ugnod"), 100);
}

#[test]
fn test_limit_grows_with_block_time() {
    init_tracing();
    let module = DistroModule::new(ModuleConfig::default(), params()).unwrap();
    let ledger = module.new_ledger();

    let at_start = module.handle_mint(
        &ledger,
        &MintRequest::new(AUTHORITY, 1),
        block_time("2025-01-01"),
    );
    assert!(matches!(
        at_start,
        Err(MintError::ScheduleLimitExceeded { limit: 0, .. })
    ));

    module
        .handle_mint(
            &ledger,
            &MintRequest::new(AUTHORITY, 247_945),
            block_time("2025-07-01"),
        )
        .unwrap();

    let same_day = module.handle_mint(
        &ledger,
        &MintRequest::new(SECOND_AUTHORITY, 1),
        block_time("2025-07-01"),
    );
    assert_eq!(same_day.unwrap_err().kind(), "ScheduleLimitExceeded");

    // End of period one: 500,000.
    let committed = module
        .handle_mint(
            &ledger,
            &MintRequest::new(SECOND_AUTHORITY, 252_055),
            block_time("2026-01-01"),
        )
        .unwrap();
    assert_eq!(committed.limit, 500_000);
    assert_eq!(ledger.current_supply("ugnod"), 500_000);
    assert_eq!(ledger.balance(RECEIVER, "ugnod"), 500_000);
}

#[test]
fn test_block_time_before_start_is_invalid_schedule() {
    init_tracing();
    let module = DistroModule::new(ModuleConfig::default(), params()).unwrap();
    let ledger = module.new_ledger();

    let err = module
        .handle_mint(
            &ledger,
            &MintRequest::new(AUTHORITY, 1),
            BlockTime::from_unix_seconds(block_time("2025-01-01").unix_seconds() - 1),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "InvalidSchedule");
}

#[test]
fn test_params_from_json() {
    let json = format!(
        r#"{{
            "issuing_authorities": ["{AUTHORITY}"],
            "receiving_address": "{RECEIVER}",
            "denom": "ugnod",
            "max_supply": 21000000000000,
            "schedule_start_date": "2025-07-22",
            "halving_period_months": 12
        }}"#
    );
    let params: ScheduleParams = serde_json::from_str(&json).unwrap();
    let module = DistroModule::new(ModuleConfig::default(), params).unwrap();

    let snapshot = module
        .schedule_snapshot(block_time("2026-07-22"))
        .unwrap();
    assert_eq!(snapshot.current_period, 2);
    assert_eq!(snapshot.limit, 10_500_000_000_000);
}
