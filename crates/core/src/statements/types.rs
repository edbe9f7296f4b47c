//! Statement view model types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::format::format_amount;

/// Column header for the current period.
pub const CURRENT_COLUMN: &str = "Current Year Rs.";
/// Column header for the comparison period.
pub const COMPARISON_COLUMN: &str = "Previous Year Rs.";

/// Kind of a statement row. Drives indentation and emphasis when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Section heading without amounts.
    SectionHeader,
    /// Regular line item.
    LineItem,
    /// Section subtotal.
    Subtotal,
    /// Grand total.
    Total,
    /// Blank separator.
    Spacer,
}

/// One row of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Particulars column.
    pub label: String,
    /// Schedule number, when the line carries one.
    pub schedule_number: Option<u8>,
    /// Current period amount.
    pub current_amount: Option<Decimal>,
    /// Comparison period amount.
    pub comparison_amount: Option<Decimal>,
    /// Formatted current amount.
    pub current_display: String,
    /// Formatted comparison amount.
    pub comparison_display: String,
    /// Row kind.
    pub row_kind: RowKind,
}

impl StatementRow {
    fn with_amounts(
        label: impl Into<String>,
        schedule_number: Option<u8>,
        current_amount: Option<Decimal>,
        comparison_amount: Option<Decimal>,
        row_kind: RowKind,
    ) -> Self {
        Self {
            label: label.into(),
            schedule_number,
            current_display: format_amount(current_amount),
            comparison_display: format_amount(comparison_amount),
            current_amount,
            comparison_amount,
            row_kind,
        }
    }

    /// Creates a section header.
    pub fn header(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            schedule_number: None,
            current_amount: None,
            comparison_amount: None,
            current_display: String::new(),
            comparison_display: String::new(),
            row_kind: RowKind::SectionHeader,
        }
    }

    /// Creates a blank spacer row.
    #[must_use]
    pub fn spacer() -> Self {
        Self {
            row_kind: RowKind::Spacer,
            ..Self::header("")
        }
    }

    /// Creates a line item.
    pub fn line(
        label: impl Into<String>,
        schedule_number: Option<u8>,
        current: Option<Decimal>,
        comparison: Option<Decimal>,
    ) -> Self {
        Self::with_amounts(label, schedule_number, current, comparison, RowKind::LineItem)
    }

    /// Creates a subtotal.
    pub fn subtotal(
        label: impl Into<String>,
        current: Option<Decimal>,
        comparison: Option<Decimal>,
    ) -> Self {
        Self::with_amounts(label, None, current, comparison, RowKind::Subtotal)
    }

    /// Creates a grand total.
    pub fn total(
        label: impl Into<String>,
        current: Option<Decimal>,
        comparison: Option<Decimal>,
    ) -> Self {
        Self::with_amounts(label, None, current, comparison, RowKind::Total)
    }
}

/// Statement type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Statement of financial position.
    BalanceSheet,
    /// Statement of profit or loss.
    IncomeStatement,
    /// Cash flow statement.
    CashFlow,
}

impl StatementKind {
    /// Printed title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::BalanceSheet => "Statement of Financial Position",
            Self::IncomeStatement => "Statement of Profit or Loss",
            Self::CashFlow => "Cash Flow Statement",
        }
    }

    /// Footer printed under the statement.
    #[must_use]
    pub const fn footer(self) -> &'static str {
        match self {
            Self::BalanceSheet => "Schedules 1 to 12 form integral part of financial statements.",
            Self::IncomeStatement => {
                "Schedules 10 to 17 form integral part of financial statements."
            }
            Self::CashFlow => "Schedules 18 to 23 form integral part of financial statements.",
        }
    }

    /// Stem used in export file names.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::IncomeStatement => "income_statement",
            Self::CashFlow => "cash_flow",
        }
    }
}

/// Caller-supplied header context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementContext {
    /// Company name.
    pub company_name: String,
    /// Currency code.
    pub currency: String,
    /// Period caption, e.g. "As of 2024-03-31".
    pub period_caption: String,
}

impl StatementContext {
    /// Creates a header context.
    pub fn new(
        company_name: impl Into<String>,
        currency: impl Into<String>,
        period_caption: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            currency: currency.into(),
            period_caption: period_caption.into(),
        }
    }
}

/// Statement header block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementHeader {
    /// Company name.
    pub company_name: String,
    /// Statement title.
    pub title: String,
    /// Period caption.
    pub period_caption: String,
    /// Currency code.
    pub currency: String,
    /// Current column header.
    pub current_column: String,
    /// Comparison column header.
    pub comparison_column: String,
}

impl StatementHeader {
    /// Builds the header for a statement kind.
    #[must_use]
    pub fn new(kind: StatementKind, context: &StatementContext) -> Self {
        Self {
            company_name: context.company_name.clone(),
            title: kind.title().to_string(),
            period_caption: context.period_caption.clone(),
            currency: context.currency.clone(),
            current_column: CURRENT_COLUMN.to_string(),
            comparison_column: COMPARISON_COLUMN.to_string(),
        }
    }
}

/// Headline figures shown next to the statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Profit for the year (income statement).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_income: Option<Decimal>,
    /// Profit over revenue in percent (income statement).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<Decimal>,
    /// Assets equal equity plus liabilities (balance sheet).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balanced: Option<bool>,
    /// Net change in cash (cash flow).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_change_in_cash: Option<Decimal>,
    /// Cash at the end of the period (cash flow).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_ending: Option<Decimal>,
}

/// A fully built statement: header, ordered rows, footer and summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementViewModel {
    /// Statement type.
    pub kind: StatementKind,
    /// Header block.
    pub header: StatementHeader,
    /// Rows in print order.
    pub rows: Vec<StatementRow>,
    /// Footer text.
    pub footer: String,
    /// Headline figures.
    pub summary: StatementSummary,
}

impl StatementViewModel {
    /// Returns the first row with the given label.
    #[must_use]
    pub fn row(&self, label: &str) -> Option<&StatementRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}
