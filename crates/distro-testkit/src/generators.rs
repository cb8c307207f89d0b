//! Proptest generators for property-based testing.

use proptest::prelude::*;

use distro::{CalendarDate, MintRequest, Schedule, ScheduleParams};

use crate::fixtures::address;

/// 1970-01-01 through 2199-12-31.
const DAY_NUMBER_RANGE: std::ops::RangeInclusive<i64> = 0..=84_005;

/// Generate a calendar date in the supported test range.
pub fn calendar_date() -> impl Strategy<Value = CalendarDate> {
    DAY_NUMBER_RANGE.prop_map(|n| CalendarDate::from_day_number(n).expect("in range"))
}

/// Generate a date that favours month ends, where day overflow happens.
pub fn month_end_date() -> impl Strategy<Value = CalendarDate> {
    (1970i32..2200, 1u32..=12, 28u32..=31).prop_filter_map("valid date", |(y, m, d)| {
        CalendarDate::new(y, m, d).ok()
    })
}

/// Generate a non-zero max supply, biased toward the extremes.
pub fn max_supply() -> impl Strategy<Value = u64> {
    prop_oneof![
        1u64..=16,
        1u64..=u64::MAX,
        Just(21_000_000_000_000u64),
        (u64::MAX - 16)..=u64::MAX,
    ]
}

/// Generate a halving period in months.
pub fn halving_period_months() -> impl Strategy<Value = u64> {
    prop_oneof![Just(1u64), Just(12u64), 1u64..=240]
}

/// Generate a mint amount, zero included.
pub fn amount() -> impl Strategy<Value = u64> {
    prop_oneof![Just(0u64), 1u64..=1_000_000, any::<u64>()]
}

/// Generate a mint request signed by one of the first `signers` derived
/// addresses.
pub fn mint_request(signers: u8) -> impl Strategy<Value = MintRequest> {
    (1..=signers.max(1), amount()).prop_map(|(seed, amount)| MintRequest::new(address(seed), amount))
}

/// Tuning for [`ScheduleCase`] generation.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleCaseParams {
    /// Furthest evaluation date, in days after the start.
    pub max_days_after_start: i64,
}

impl Default for ScheduleCaseParams {
    fn default() -> Self {
        Self {
            max_days_after_start: 366 * 60,
        }
    }
}

/// A valid schedule plus two evaluation dates `start <= earlier <= later`.
#[derive(Debug, Clone)]
pub struct ScheduleCase {
    pub params: ScheduleParams,
    pub earlier: CalendarDate,
    pub later: CalendarDate,
}

impl ScheduleCase {
    pub fn schedule(&self) -> Schedule {
        Schedule::try_from(&self.params).expect("generated params are valid")
    }
}

impl Arbitrary for ScheduleCase {
    type Parameters = ScheduleCaseParams;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let span = args.max_days_after_start.max(0);
        (
            month_end_or_any(),
            max_supply(),
            halving_period_months(),
            0..=span,
            0..=span,
        )
            .prop_map(|(start, max_supply, months, a, b)| {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                ScheduleCase {
                    params: ScheduleParams::new(
                        [address(1)],
                        address(0),
                        "ugnod",
                        max_supply,
                        start.to_string(),
                        months,
                    ),
                    earlier: start.add_days(lo).expect("within calendar range"),
                    later: start.add_days(hi).expect("within calendar range"),
                }
            })
            .boxed()
    }
}

fn month_end_or_any() -> impl Strategy<Value = CalendarDate> {
    prop_oneof![calendar_date(), month_end_date()]
}
