//! Core statement logic for Nepfin.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! Everything here is a stateless transformation from bill records or
//! pre-aggregated totals into Nepal-standard financial statements.
//!
//! # Modules
//!
//! - `period` - Reporting periods and prior-year comparison ranges
//! - `schedule` - Schedule number classification of categories
//! - `statements` - Statement view models and amount formatting
//! - `aggregation` - Bill records to statement aggregates
//! - `ledger` - Transaction ledger with running balance
//! - `export` - Statement exporters and file naming
//! - `sequence` - Request sequencing for discarding stale responses
//! - `money` - Overflow-free amount arithmetic

pub mod aggregation;
pub mod export;
pub mod ledger;
pub mod money;
pub mod period;
pub mod schedule;
pub mod sequence;
pub mod statements;
