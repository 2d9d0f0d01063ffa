//! Engine calendar
//!
//! Emergence windows are authored as (month, day) pairs and compared on a
//! fixed 365-day ordinal scale with a 28-day February. The calendar is
//! leap-year-agnostic on purpose: hatch windows are multi-week biological
//! intervals, so a one-day drift every four years is irrelevant, and a fixed
//! scale keeps window membership deterministic across years.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Days in the fixed engine year.
pub const DAYS_PER_YEAR: u32 = 365;

/// Cumulative days before each month (28-day February).
const CUMULATIVE_DAYS: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// A year-agnostic calendar date used for all window queries.
///
/// Construction validates the month/day bounds; once built, every evaluator
/// call on it is infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Build a validated query date (month 1-12, day 1-31).
    pub fn new(month: u32, day: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(EngineError::InvalidDate { month, day });
        }
        Ok(Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Ordinal position on the fixed 365-day scale (1-based).
    pub fn ordinal(&self) -> u32 {
        day_of_year(self.month, self.day)
    }
}

impl From<NaiveDate> for MonthDay {
    fn from(date: NaiveDate) -> Self {
        // chrono guarantees month 1-12 and day 1-31
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Convert a (month, day) pair to its fixed-calendar ordinal.
///
/// Days past a month's true length (e.g. Feb 30) still map monotonically;
/// authored windows never use them but the conversion must not panic.
pub fn day_of_year(month: u32, day: u32) -> u32 {
    let month_index = (month.clamp(1, 12) - 1) as usize;
    CUMULATIVE_DAYS[month_index] + day
}

/// Circular ordinal distance between two dates on the 365-day ring.
///
/// Used by peak detection so that a pattern peaking in late December is
/// still "near peak" for an early-January query.
pub fn circular_distance(a: u32, b: u32) -> u32 {
    let direct = a.abs_diff(b);
    direct.min(DAYS_PER_YEAR - direct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_year_fixed_february() {
        assert_eq!(day_of_year(1, 1), 1);
        assert_eq!(day_of_year(2, 28), 59);
        assert_eq!(day_of_year(3, 1), 60);
        assert_eq!(day_of_year(12, 31), 365);
    }

    #[test]
    fn test_month_day_validation() {
        assert!(MonthDay::new(4, 20).is_ok());
        assert_eq!(
            MonthDay::new(13, 1),
            Err(EngineError::InvalidDate { month: 13, day: 1 })
        );
        assert_eq!(
            MonthDay::new(0, 10),
            Err(EngineError::InvalidDate { month: 0, day: 10 })
        );
        assert_eq!(
            MonthDay::new(6, 32),
            Err(EngineError::InvalidDate { month: 6, day: 32 })
        );
    }

    #[test]
    fn test_from_naive_date() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
        let md = MonthDay::from(date);
        assert_eq!(md.month(), 4);
        assert_eq!(md.day(), 20);
    }

    #[test]
    fn test_circular_distance_wraps_year_boundary() {
        // Dec 28 (ordinal 362) vs Jan 3 (ordinal 3): 6 days apart across
        // the boundary, not 359.
        let dec28 = day_of_year(12, 28);
        let jan3 = day_of_year(1, 3);
        assert_eq!(circular_distance(dec28, jan3), 6);
        assert_eq!(circular_distance(jan3, dec28), 6);

        // Mid-year distances are plain differences
        assert_eq!(circular_distance(day_of_year(4, 15), day_of_year(4, 20)), 5);
    }
}
