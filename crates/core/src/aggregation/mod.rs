//! Bill aggregation.
//!
//! Turns raw bill records into the aggregate shapes the statement builders
//! consume. All functions are pure: the caller supplies the bills and the
//! date range.

pub mod bill;
pub mod service;
pub mod summary;
pub mod types;

#[cfg(test)]
mod tests;

pub use bill::{AccountType, Bill, TransactionType, UNCATEGORIZED};
pub use service::{AggregationService, profit_margin};
pub use summary::{CategorySpend, ExpenseReport, ExpenseReportFilter, MonthlySpending};
pub use types::{
    BalanceSheetAggregate, BalanceSheetTotals, CashFlowAggregate, CategoryBreakdown,
    CategoryTotal, ExpenseSummary, IncomeStatementAggregate, PeriodReport, TrialBalance,
    TrialBalanceRow,
};
