//! Schedule number classification.
//!
//! Nepal-standard statements print a schedule number next to each line item.
//! Income statement expenses are classified by keyword; balance sheet and
//! cash flow lines use fixed lookup tables.
//!
//! | Statement        | Schedules |
//! |------------------|-----------|
//! | Balance sheet    | 1 - 12    |
//! | Income statement | 10 - 17   |
//! | Cash flow        | 18 - 23   |

pub mod classifier;
pub mod tables;


pub use classifier::{
    EXPENSE_SCHEDULES, INCOME_TAX, KeywordGroup, OTHER_INCOME, REVENUE_FROM_OPERATIONS,
    RevenueClass, ScheduleEntry, ScheduleRef, classify_expense, classify_revenue,
};
pub use tables::{BalanceSheetLine, BalanceSheetSection, CashFlowLine};
