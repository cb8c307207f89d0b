//! Proleptic Gregorian calendar arithmetic.
//!
//! Dates carry no time of day and no time zone. Every operation is integer
//! arithmetic over day numbers (days since 1970-01-01), so results do not
//! depend on locale, system clock, or platform.
//!
//! Month addition follows the day-overflow rule: the month is advanced first
//! and any day past the end of the target month rolls into the next one.
//! Jan 31 of a leap year plus one month is Mar 2, never Feb 29.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DateError;

/// Seconds in one UTC day.
pub const SECONDS_PER_DAY: i64 = 86_400;

const MIN_DAY_NUMBER: i64 = days_from_civil(i32::MIN as i64, 1, 1);
const MAX_DAY_NUMBER: i64 = days_from_civil(i32::MAX as i64, 12, 31);

/// A calendar date.
///
/// Field order makes the derived ordering chronological.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Create a date, checking month and day ranges.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::MonthOutOfRange(month));
        }
        let month = month as u8;
        if day == 0 || day > days_in_month(year, month) as u32 {
            return Err(DateError::DayOutOfRange { year, month, day });
        }
        Ok(Self {
            year,
            month,
            day: day as u8,
        })
    }

    /// Parse a strict `YYYY-MM-DD` date.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(DateError::Format(s.to_string()));
        }
        let field = |range: std::ops::Range<usize>| -> Result<u32, DateError> {
            bytes[range].iter().try_fold(0u32, |acc, b| {
                if b.is_ascii_digit() {
                    Ok(acc * 10 + u32::from(b - b'0'))
                } else {
                    Err(DateError::Format(s.to_string()))
                }
            })
        };
        let year = field(0..4)?;
        let month = field(5..7)?;
        let day = field(8..10)?;
        Self::new(year as i32, month, day)
    }

    /// The UTC calendar day containing a Unix timestamp.
    pub fn from_unix_seconds(seconds: i64) -> Result<Self, DateError> {
        Self::from_day_number(seconds.div_euclid(SECONDS_PER_DAY))
    }

    /// Build a date from its day number (days since 1970-01-01).
    pub fn from_day_number(day_number: i64) -> Result<Self, DateError> {
        if !(MIN_DAY_NUMBER..=MAX_DAY_NUMBER).contains(&day_number) {
            return Err(DateError::OutOfRange);
        }
        let (year, month, day) = civil_from_days(day_number);
        Ok(Self {
            year: i32::try_from(year).map_err(|_| DateError::OutOfRange)?,
            month,
            day,
        })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Days since 1970-01-01 (negative before the epoch).
    pub const fn day_number(&self) -> i64 {
        days_from_civil(self.year as i64, self.month as i64, self.day as i64)
    }

    /// Add whole months, then whole days, normalizing day overflow.
    pub fn add_months_and_days(&self, months: i64, days: i64) -> Result<Self, DateError> {
        let month_index = (self.year as i64)
            .checked_mul(12)
            .and_then(|m| m.checked_add(self.month as i64 - 1))
            .and_then(|m| m.checked_add(months))
            .ok_or(DateError::OutOfRange)?;
        let year = month_index.div_euclid(12);
        let month = month_index.rem_euclid(12) + 1;
        if year < i32::MIN as i64 || year > i32::MAX as i64 {
            return Err(DateError::OutOfRange);
        }
        let day_number = days_from_civil(year, month, 1)
            .checked_add(self.day as i64 - 1)
            .and_then(|d| d.checked_add(days))
            .ok_or(DateError::OutOfRange)?;
        Self::from_day_number(day_number)
    }

    /// Add whole months, normalizing day overflow.
    pub fn add_months(&self, months: i64) -> Result<Self, DateError> {
        self.add_months_and_days(months, 0)
    }

    /// Add whole days.
    pub fn add_days(&self, days: i64) -> Result<Self, DateError> {
        let day_number = self
            .day_number()
            .checked_add(days)
            .ok_or(DateError::OutOfRange)?;
        Self::from_day_number(day_number)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

/// Whole calendar months from `start` to `end`.
///
/// A final partial month is not counted: the difference is decremented when
/// `end.day < start.day`, and never goes below zero.
pub fn months_between(start: CalendarDate, end: CalendarDate) -> Result<u64, DateError> {
    if end < start {
        return Err(DateError::EndBeforeStart { start, end });
    }
    let years = end.year as i64 - start.year as i64;
    let mut months = years * 12 + end.month as i64 - start.month as i64;
    if end.day < start.day {
        months -= 1;
    }
    Ok(months.max(0) as u64)
}

/// Signed whole days from `from` to `to`.
pub fn days_between(from: CalendarDate, to: CalendarDate) -> i64 {
    to.day_number() - from.day_number()
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Day number of a civil date (Howard Hinnant, public domain).
const fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400; // [0, 399]
    let mp = (month + 9) % 12; // March = 0
    let doy = (153 * mp + 2) / 5 + day - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * 146_097 + doe - 719_468
}

/// Civil date of a day number (Howard Hinnant, public domain).
fn civil_from_days(day_number: i64) -> (i64, u8, u8) {
    let z = day_number + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month as u8, day as u8)
}
