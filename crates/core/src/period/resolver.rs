//! Period types and date range resolution.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::PeriodError;

/// Kind of reporting period selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// A single calendar month.
    Monthly,
    /// A calendar quarter (Jan-Mar, Apr-Jun, Jul-Sep, Oct-Dec).
    Quarterly,
    /// A full calendar year.
    Yearly,
}

impl PeriodType {
    /// Returns the path segment used by the period report endpoints.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("Unknown period type: {s}")),
        }
    }
}

/// A validated period selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Period {
    /// A single month of a year.
    Monthly {
        /// Calendar year.
        year: i32,
        /// Month, 1-12.
        month: u32,
    },
    /// A quarter of a year.
    Quarterly {
        /// Calendar year.
        year: i32,
        /// Quarter, 1-4.
        quarter: u32,
    },
    /// A whole year.
    Yearly {
        /// Calendar year.
        year: i32,
    },
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start_date: NaiveDate,
    /// Last day of the range.
    pub end_date: NaiveDate,
}

/// A period resolved into current and comparison date ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPeriod {
    /// Period type.
    pub period_type: PeriodType,
    /// Calendar year.
    pub year: i32,
    /// Month for monthly periods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Quarter for quarterly periods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u32>,
    /// Human readable caption (e.g. "February 2024", "Q1 2024").
    pub label: String,
    /// Current period start.
    pub start_date: NaiveDate,
    /// Current period end.
    pub end_date: NaiveDate,
    /// Comparison period start (one year earlier).
    pub comparison_start_date: NaiveDate,
    /// Comparison period end (one year earlier).
    pub comparison_end_date: NaiveDate,
}

impl Period {
    /// Creates a monthly period.
    pub fn monthly(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        Ok(Self::Monthly { year, month })
    }

    /// Creates a quarterly period.
    pub fn quarterly(year: i32, quarter: u32) -> Result<Self, PeriodError> {
        if !(1..=4).contains(&quarter) {
            return Err(PeriodError::InvalidQuarter(quarter));
        }
        Ok(Self::Quarterly { year, quarter })
    }

    /// Creates a yearly period.
    #[must_use]
    pub const fn yearly(year: i32) -> Self {
        Self::Yearly { year }
    }

    /// Builds a period from loosely typed selector values.
    ///
    /// Month is only consulted for monthly periods and quarter only for
    /// quarterly ones.
    pub fn from_parts(
        period_type: PeriodType,
        year: i32,
        month: Option<u32>,
        quarter: Option<u32>,
    ) -> Result<Self, PeriodError> {
        match period_type {
            PeriodType::Monthly => Self::monthly(year, month.ok_or(PeriodError::MissingMonth)?),
            PeriodType::Quarterly => {
                Self::quarterly(year, quarter.ok_or(PeriodError::MissingQuarter)?)
            }
            PeriodType::Yearly => Ok(Self::yearly(year)),
        }
    }

    /// Returns the period type.
    #[must_use]
    pub const fn period_type(&self) -> PeriodType {
        match self {
            Self::Monthly { .. } => PeriodType::Monthly,
            Self::Quarterly { .. } => PeriodType::Quarterly,
            Self::Yearly { .. } => PeriodType::Yearly,
        }
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        match self {
            Self::Monthly { year, .. } | Self::Quarterly { year, .. } | Self::Yearly { year } => {
                *year
            }
        }
    }

    /// Returns the caption shown above statements.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Monthly { year, month } => format!("{} {year}", month_name(*month)),
            Self::Quarterly { year, quarter } => format!("Q{quarter} {year}"),
            Self::Yearly { year } => year.to_string(),
        }
    }

    /// Returns the current-period date range.
    ///
    /// Month and quarter are re-checked here since a deserialized period
    /// bypasses the constructors.
    pub fn date_range(&self) -> Result<DateRange, PeriodError> {
        let year = self.year();
        let (start_month, end_month) = match *self {
            Self::Monthly { month, .. } => {
                if !(1..=12).contains(&month) {
                    return Err(PeriodError::InvalidMonth(month));
                }
                (month, month)
            }
            Self::Quarterly { quarter, .. } => {
                if !(1..=4).contains(&quarter) {
                    return Err(PeriodError::InvalidQuarter(quarter));
                }
                let first = (quarter - 1) * 3 + 1;
                (first, first + 2)
            }
            Self::Yearly { .. } => (1, 12),
        };

        let start_date = NaiveDate::from_ymd_opt(year, start_month, 1)
            .ok_or(PeriodError::YearOutOfRange(year))?;
        let end_date =
            last_day_of_month(year, end_month).ok_or(PeriodError::YearOutOfRange(year))?;

        Ok(DateRange {
            start_date,
            end_date,
        })
    }

    /// Resolves the period into current and comparison date ranges.
    pub fn resolve(&self) -> Result<ResolvedPeriod, PeriodError> {
        let current = self.date_range()?;
        let comparison = current.one_year_earlier()?;

        let (month, quarter) = match self {
            Self::Monthly { month, .. } => (Some(*month), None),
            Self::Quarterly { quarter, .. } => (None, Some(*quarter)),
            Self::Yearly { .. } => (None, None),
        };

        Ok(ResolvedPeriod {
            period_type: self.period_type(),
            year: self.year(),
            month,
            quarter,
            label: self.label(),
            start_date: current.start_date,
            end_date: current.end_date,
            comparison_start_date: comparison.start_date,
            comparison_end_date: comparison.end_date,
        })
    }
}

impl DateRange {
    /// Creates a range, rejecting a start after the end.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, PeriodError> {
        if start_date > end_date {
            return Err(PeriodError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Returns true if the given date falls within this range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the same range shifted one calendar year back.
    pub fn one_year_earlier(&self) -> Result<Self, PeriodError> {
        let shift = |date: NaiveDate| {
            one_year_earlier(date).ok_or(PeriodError::YearOutOfRange(date.year()))
        };
        Ok(Self {
            start_date: shift(self.start_date)?,
            end_date: shift(self.end_date)?,
        })
    }

    /// Returns the caption used in statement headers and file names.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("{} to {}", self.start_date, self.end_date)
    }
}

impl ResolvedPeriod {
    /// Returns the current-period range.
    #[must_use]
    pub const fn current(&self) -> DateRange {
        DateRange {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// Returns the comparison-period range.
    #[must_use]
    pub const fn comparison(&self) -> DateRange {
        DateRange {
            start_date: self.comparison_start_date,
            end_date: self.comparison_end_date,
        }
    }
}

/// Returns the last day of a month, or `None` for an unrepresentable month.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Returns the same month and day one year earlier.
///
/// February 29 has no counterpart in the previous year and maps to February 28.
/// Returns `None` when the earlier date is not representable.
#[must_use]
pub fn one_year_earlier(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(12))
}

/// Returns month name.
pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
