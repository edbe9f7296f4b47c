//! Statement view models.
//!
//! A view model is the single rendering source for a statement: the
//! on-screen table and every exporter consume the same ordered rows. Rows
//! carry both the raw amounts and their display strings.

pub mod builder;
pub mod format;
pub mod types;


pub use builder::{NO_EXPENSES, StatementBuilder};
pub use format::{PLACEHOLDER, format_amount, round_amount};
pub use types::{
    COMPARISON_COLUMN, CURRENT_COLUMN, RowKind, StatementContext, StatementHeader, StatementKind,
    StatementRow, StatementSummary, StatementViewModel,
};
