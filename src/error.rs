//! Engine error taxonomy
//!
//! Per-lure and per-dimension data issues never propagate as hard failures:
//! a missing reading disables its dimension, a malformed profile range is
//! dropped with a warning, an empty catalog yields an empty suggestion list.
//! Only a structurally invalid top-level request fails the whole call.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Query date outside the fixed 365-day engine calendar
    /// (month must be 1-12, day must be 1-31).
    #[error("invalid query date: month {month}, day {day}")]
    InvalidDate { month: u32, day: u32 },
}
