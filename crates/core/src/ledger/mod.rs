//! Transaction ledger.
//!
//! Lists bills in a date range with debit and credit columns and a running
//! balance in which credits add and debits subtract.

pub mod report;


pub use report::{LEDGER_COLUMNS, LEDGER_FILE_STEM, Ledger, LedgerRow};
