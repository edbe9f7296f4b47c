//! Period error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building or resolving a period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Month outside 1..=12.
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    /// Quarter outside 1..=4.
    #[error("Invalid quarter: {0} (expected 1-4)")]
    InvalidQuarter(u32),

    /// A monthly period was requested without a month.
    #[error("Monthly period requires a month")]
    MissingMonth,

    /// A quarterly period was requested without a quarter.
    #[error("Quarterly period requires a quarter")]
    MissingQuarter,

    /// Year cannot be represented as a calendar date.
    #[error("Year out of range: {0}")]
    YearOutOfRange(i32),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}
