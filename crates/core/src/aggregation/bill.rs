//! Bill records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::period::DateRange;

/// Category name used for bills without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Direction of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money out.
    Debit,
    /// Money in.
    Credit,
}

impl TransactionType {
    /// Returns the printable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "Debit",
            Self::Credit => "Credit",
        }
    }
}

/// Account type a bill posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Expense account.
    Expense,
    /// Revenue account.
    Revenue,
    /// Asset account.
    Asset,
    /// Liability account.
    Liability,
    /// Equity account.
    Equity,
}

impl AccountType {
    /// All account types in chart-of-accounts order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Returns true if debits increase the balance.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }
}

/// A recorded bill or receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Bill ID.
    pub id: Uuid,
    /// Date on the bill.
    pub bill_date: NaiveDate,
    /// Invoice number.
    #[serde(default)]
    pub invoice_number: Option<String>,
    /// Vendor name.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Category name.
    #[serde(default)]
    pub category: Option<String>,
    /// Amount in NPR.
    pub amount_npr: Decimal,
    /// Tax included in the amount.
    #[serde(default)]
    pub tax_amount: Decimal,
    /// Debit or credit.
    pub transaction_type: TransactionType,
    /// Account type.
    pub account_type: AccountType,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Bill {
    /// Creates a bill with the required fields.
    #[must_use]
    pub fn new(
        bill_date: NaiveDate,
        category: impl Into<String>,
        amount_npr: Decimal,
        transaction_type: TransactionType,
        account_type: AccountType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            bill_date,
            invoice_number: None,
            vendor: None,
            category: Some(category.into()),
            amount_npr,
            tax_amount: Decimal::ZERO,
            transaction_type,
            account_type,
            notes: None,
        }
    }

    /// Category name, or [`UNCATEGORIZED`].
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Returns true if the category equals any of `names`, ignoring case.
    #[must_use]
    pub fn in_categories(&self, names: &[&str]) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| names.iter().any(|n| n.eq_ignore_ascii_case(c)))
    }

    /// Returns true for credit bills.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        self.transaction_type == TransactionType::Credit
    }

    /// Amount signed by direction: credits positive, debits negative.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        if self.is_credit() {
            self.amount_npr
        } else {
            -self.amount_npr
        }
    }

    /// Amount signed by the account's normal balance.
    #[must_use]
    pub fn normal_amount(&self) -> Decimal {
        if self.account_type.is_debit_normal() {
            -self.signed_amount()
        } else {
            self.signed_amount()
        }
    }

    /// Returns true if the bill date falls inside `range`.
    #[must_use]
    pub fn within(&self, range: &DateRange) -> bool {
        range.contains(self.bill_date)
    }
}
