//! The halving emission schedule.
//!
//! The schedule is cut into contiguous halving periods of
//! `halving_period_months` calendar months starting at the schedule start
//! date. Period `p` (1-indexed) has a yearly cap of
//! `max_supply / 2^(p-1) / 2`, each division truncating.
//!
//! The maximum cumulative issuance at a given date is:
//!
//! - the full cap of every completed period, plus
//! - the cap of the current period pro-rated by whole days elapsed in it.
//!
//! Every value here is consensus-critical. The computation is integer-only,
//! reads no clock, and keeps no state: the same `(schedule, as_of)` always
//! yields the same limit on every executor.

use std::num::NonZeroU64;

use crate::calendar::{self, CalendarDate};
use crate::error::{ParamsError, ScheduleError};
use crate::params::ScheduleParams;

/// A parsed, validated monetary policy.
///
/// Only the fields the calculator needs. Construction guarantees a non-zero
/// max supply and halving period and a well-formed start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    max_supply: u64,
    start: CalendarDate,
    halving_period_months: NonZeroU64,
}

/// Every intermediate of one limit evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSnapshot {
    pub as_of: CalendarDate,
    pub months_elapsed: u64,
    /// 1-indexed period containing `as_of`.
    pub current_period: u64,
    /// Sum of the full caps of periods `1..current_period`.
    pub completed_emission: u64,
    pub period_start: CalendarDate,
    /// Last day (inclusive) of the current period.
    pub period_end: CalendarDate,
    pub days_in_period: u64,
    /// Whole days from `period_start` to `as_of`, in `0..=days_in_period`.
    pub days_elapsed: u64,
    pub period_yearly_limit: u64,
    /// Maximum cumulative issuance at `as_of`.
    pub limit: u64,
}

impl Schedule {
    pub fn new(
        max_supply: u64,
        start: CalendarDate,
        halving_period_months: u64,
    ) -> Result<Self, ScheduleError> {
        if max_supply == 0 {
            return Err(ParamsError::ZeroMaxSupply.into());
        }
        let halving_period_months =
            NonZeroU64::new(halving_period_months).ok_or(ParamsError::ZeroHalvingPeriod)?;
        Ok(Self {
            max_supply,
            start,
            halving_period_months,
        })
    }

    pub const fn max_supply(&self) -> u64 {
        self.max_supply
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn halving_period_months(&self) -> u64 {
        self.halving_period_months.get()
    }

    /// Maximum cumulative issuance permitted at `as_of`.
    pub fn maximum_cumulative_issuance(&self, as_of: CalendarDate) -> Result<u64, ScheduleError> {
        Ok(self.snapshot(as_of)?.limit)
    }

    /// Evaluate the schedule at `as_of`, keeping every intermediate.
    ///
    /// Fails with [`ScheduleError::BeforeStart`] if `as_of` precedes the
    /// schedule start.
    pub fn snapshot(&self, as_of: CalendarDate) -> Result<ScheduleSnapshot, ScheduleError> {
        if as_of < self.start {
            return Err(ScheduleError::BeforeStart {
                start: self.start,
                as_of,
            });
        }

        let months_elapsed = calendar::months_between(self.start, as_of)?;
        let period_months = self.halving_period_months.get();
        let current_period = months_elapsed / period_months + 1;

        let mut completed_emission: u64 = 0;
        for period in 1..current_period {
            let cap = period_yearly_limit(self.max_supply, period);
            if cap == 0 {
                // Caps only shrink from here on.
                break;
            }
            completed_emission = completed_emission
                .checked_add(cap)
                .ok_or(ScheduleError::Overflow)?;
        }

        let start_offset = months_offset(current_period - 1, period_months)?;
        let end_offset = months_offset(current_period, period_months)?;
        let period_start = self.start.add_months(start_offset)?;
        let period_end = self.start.add_months_and_days(end_offset, -1)?;

        let days_in_period = non_negative(calendar::days_between(period_start, period_end) + 1);
        // Day overflow in month addition can put the period start after
        // `as_of` (start on the 31st, period begins on the 2nd or 3rd).
        let days_elapsed =
            non_negative(calendar::days_between(period_start, as_of)).min(days_in_period);

        let yearly_limit = period_yearly_limit(self.max_supply, current_period);
        let current_emission = if days_in_period == 0 {
            0
        } else {
            pro_rate(yearly_limit, days_elapsed, days_in_period)
        };

        let limit = completed_emission
            .checked_add(current_emission)
            .ok_or(ScheduleError::Overflow)?;

        Ok(ScheduleSnapshot {
            as_of,
            months_elapsed,
            current_period,
            completed_emission,
            period_start,
            period_end,
            days_in_period,
            days_elapsed,
            period_yearly_limit: yearly_limit,
            limit,
        })
    }
}

impl TryFrom<&ScheduleParams> for Schedule {
    type Error = ScheduleError;

    fn try_from(params: &ScheduleParams) -> Result<Self, Self::Error> {
        let start = params.start_date()?;
        Schedule::new(params.max_supply, start, params.halving_period_months)
    }
}

/// Maximum cumulative issuance permitted by `params` at `as_of`.
///
/// Fails with `ScheduleError` if the schedule fields of `params` are invalid
/// or `as_of` precedes the start date.
pub fn maximum_cumulative_issuance(
    params: &ScheduleParams,
    as_of: CalendarDate,
) -> Result<u64, ScheduleError> {
    Schedule::try_from(params)?.maximum_cumulative_issuance(as_of)
}

/// Yearly cap of halving period `period` (1-indexed):
/// `max_supply / 2^(period-1) / 2`.
pub fn period_yearly_limit(max_supply: u64, period: u64) -> u64 {
    let halvings = period.saturating_sub(1);
    if halvings >= u64::BITS as u64 {
        return 0;
    }
    (max_supply >> halvings) / 2
}

/// `amount * numerator / denominator`, truncating. Requires
/// `numerator <= denominator`, so the result fits in `u64`.
fn pro_rate(amount: u64, numerator: u64, denominator: u64) -> u64 {
    let product = u128::from(amount) * u128::from(numerator);
    (product / u128::from(denominator)) as u64
}

fn months_offset(periods: u64, period_months: u64) -> Result<i64, ScheduleError> {
    periods
        .checked_mul(period_months)
        .and_then(|m| i64::try_from(m).ok())
        .ok_or(ScheduleError::Overflow)
}

fn non_negative(days: i64) -> u64 {
    u64::try_from(days).unwrap_or(0)
}
