//! Reporting periods and prior-year comparison ranges.
//!
//! A period selection (monthly, quarterly or yearly) resolves into a concrete
//! current date range plus the same range one calendar year earlier.

pub mod error;
pub mod resolver;


pub use error::PeriodError;
pub use resolver::{
    DateRange, Period, PeriodType, ResolvedPeriod, last_day_of_month, one_year_earlier,
};
