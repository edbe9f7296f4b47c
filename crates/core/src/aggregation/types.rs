//! Aggregate shapes consumed by the statement builders.
//!
//! These mirror the JSON the dashboard receives. Every amount tolerates a
//! missing or `null` field and reads it as zero, so a partial payload still
//! produces a renderable statement.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::bill::AccountType;
use crate::money::sum_amounts;
use crate::period::{DateRange, ResolvedPeriod};
use crate::schedule::{BalanceSheetLine, BalanceSheetSection};
use crate::statements::round_amount;

/// Reads an optional decimal, treating `null` as zero.
pub(crate) fn zero_if_null<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Decimal>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Total for one category over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category display name.
    pub category_name: String,
    /// Aggregated amount.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub amount: Decimal,
}

impl CategoryTotal {
    /// Creates a category total.
    pub fn new(category_name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category_name: category_name.into(),
            amount,
        }
    }
}

/// Ordered per-category totals.
///
/// Serializes as a JSON object whose key order is the insertion order, and
/// deserializes from either such an object or an array of [`CategoryTotal`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown(pub Vec<CategoryTotal>);

impl CategoryBreakdown {
    /// Returns true if no categories are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the totals in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryTotal> {
        self.0.iter()
    }

    /// Sum of all amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        sum_amounts(self.0.iter().map(|c| c.amount))
    }

    /// Adds to an existing category or appends a new one.
    pub fn add(&mut self, category_name: &str, amount: Decimal) {
        match self.0.iter_mut().find(|c| c.category_name == category_name) {
            Some(existing) => existing.amount = existing.amount.saturating_add(amount),
            None => self.0.push(CategoryTotal::new(category_name, amount)),
        }
    }
}

impl FromIterator<CategoryTotal> for CategoryBreakdown {
    fn from_iter<I: IntoIterator<Item = CategoryTotal>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.category_name, &entry.amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryBreakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = CategoryBreakdown;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category to amount or a list of category totals")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut totals = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, amount)) = access.next_entry::<String, Option<Decimal>>()? {
                    totals.push(CategoryTotal::new(name, amount.unwrap_or_default()));
                }
                Ok(CategoryBreakdown(totals))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut totals = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(total) = access.next_element::<CategoryTotal>()? {
                    totals.push(total);
                }
                Ok(CategoryBreakdown(totals))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(CategoryBreakdown::default())
            }
        }

        deserializer.deserialize_any(BreakdownVisitor)
    }
}

/// Expense side of the income statement aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseSummary {
    /// Expense totals per category, in first-appearance order.
    pub breakdown: CategoryBreakdown,
    /// Total expenses. Falls back to the breakdown sum when absent.
    pub total_expenses: Option<Decimal>,
}

impl ExpenseSummary {
    /// Returns the supplied total, or the breakdown sum.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total_expenses.unwrap_or_else(|| self.breakdown.total())
    }
}

/// Income statement totals for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeStatementAggregate {
    /// Period covered.
    pub period: Option<DateRange>,
    /// Total revenue.
    #[serde(deserialize_with = "zero_if_null")]
    pub revenue: Decimal,
    /// Revenue per category. When present, drives the operations/other split.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_breakdown: Option<CategoryBreakdown>,
    /// Expenses.
    pub expenses: ExpenseSummary,
    /// Revenue less expenses.
    #[serde(deserialize_with = "zero_if_null")]
    pub net_income: Decimal,
    /// Net income over revenue, in percent.
    #[serde(deserialize_with = "zero_if_null")]
    pub profit_margin: Decimal,
}

/// Balance sheet line amounts as of one date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct BalanceSheetAggregate {
    /// Date the balances are taken at.
    pub as_of_date: Option<NaiveDate>,
    #[serde(deserialize_with = "zero_if_null")]
    pub property_plant_equipment: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_receivables: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub investments: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub loans_advances: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub inventories: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub advance_income_tax: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub trade_receivables: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub cash: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub vat_receivable: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub share_capital: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub reserves: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub non_current_loans: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub provisions: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub current_loans: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub trade_payables: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub income_tax_liability: Decimal,
    #[serde(deserialize_with = "zero_if_null")]
    pub vat_payable: Decimal,
}

impl BalanceSheetAggregate {
    /// Returns the amount for a line.
    #[must_use]
    pub const fn amount(&self, line: BalanceSheetLine) -> Decimal {
        *self.slot(line)
    }

    /// Sets the amount for a line.
    pub fn set(&mut self, line: BalanceSheetLine, amount: Decimal) {
        *self.slot_mut(line) = amount;
    }

    /// Sum of the lines in one section.
    #[must_use]
    pub fn section_total(&self, section: BalanceSheetSection) -> Decimal {
        sum_amounts(section.lines().iter().map(|&line| self.amount(line)))
    }

    /// Non-current plus current assets.
    #[must_use]
    pub fn total_assets(&self) -> Decimal {
        self.section_total(BalanceSheetSection::NonCurrentAssets)
            .saturating_add(self.section_total(BalanceSheetSection::CurrentAssets))
    }

    /// Non-current plus current liabilities.
    #[must_use]
    pub fn total_liabilities(&self) -> Decimal {
        self.section_total(BalanceSheetSection::NonCurrentLiabilities)
            .saturating_add(self.section_total(BalanceSheetSection::CurrentLiabilities))
    }

    /// Share capital plus reserves.
    #[must_use]
    pub fn total_equity(&self) -> Decimal {
        self.section_total(BalanceSheetSection::Equity)
    }

    /// Side totals and whether they agree at two decimals.
    #[must_use]
    pub fn totals(&self) -> BalanceSheetTotals {
        let total_assets = self.total_assets();
        let total_liabilities = self.total_liabilities();
        let total_equity = self.total_equity();
        let total_liabilities_and_equity = total_liabilities.saturating_add(total_equity);

        BalanceSheetTotals {
            total_assets,
            total_liabilities,
            total_equity,
            total_liabilities_and_equity,
            balanced: round_amount(total_assets) == round_amount(total_liabilities_and_equity),
        }
    }

    const fn slot(&self, line: BalanceSheetLine) -> &Decimal {
        use BalanceSheetLine as L;
        match line {
            L::PropertyPlantEquipment => &self.property_plant_equipment,
            L::OtherReceivables => &self.other_receivables,
            L::Investments => &self.investments,
            L::LoansAndAdvances => &self.loans_advances,
            L::Inventories => &self.inventories,
            L::AdvanceIncomeTax => &self.advance_income_tax,
            L::TradeReceivables => &self.trade_receivables,
            L::Cash => &self.cash,
            L::VatReceivable => &self.vat_receivable,
            L::ShareCapital => &self.share_capital,
            L::Reserves => &self.reserves,
            L::NonCurrentLoans => &self.non_current_loans,
            L::Provisions => &self.provisions,
            L::CurrentLoans => &self.current_loans,
            L::TradePayables => &self.trade_payables,
            L::IncomeTaxLiability => &self.income_tax_liability,
            L::VatPayable => &self.vat_payable,
        }
    }

    fn slot_mut(&mut self, line: BalanceSheetLine) -> &mut Decimal {
        use BalanceSheetLine as L;
        match line {
            L::PropertyPlantEquipment => &mut self.property_plant_equipment,
            L::OtherReceivables => &mut self.other_receivables,
            L::Investments => &mut self.investments,
            L::LoansAndAdvances => &mut self.loans_advances,
            L::Inventories => &mut self.inventories,
            L::AdvanceIncomeTax => &mut self.advance_income_tax,
            L::TradeReceivables => &mut self.trade_receivables,
            L::Cash => &mut self.cash,
            L::VatReceivable => &mut self.vat_receivable,
            L::ShareCapital => &mut self.share_capital,
            L::Reserves => &mut self.reserves,
            L::NonCurrentLoans => &mut self.non_current_loans,
            L::Provisions => &mut self.provisions,
            L::CurrentLoans => &mut self.current_loans,
            L::TradePayables => &mut self.trade_payables,
            L::IncomeTaxLiability => &mut self.income_tax_liability,
            L::VatPayable => &mut self.vat_payable,
        }
    }
}

/// Totals of both sides of a balance sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetTotals {
    /// Non-current plus current assets.
    pub total_assets: Decimal,
    /// Non-current plus current liabilities.
    pub total_liabilities: Decimal,
    /// Share capital plus reserves.
    pub total_equity: Decimal,
    /// Liabilities plus equity.
    pub total_liabilities_and_equity: Decimal,
    /// Assets equal liabilities plus equity at two decimals.
    pub balanced: bool,
}

/// Cash flow inputs for one period.
///
/// Outflows (tax paid, purchases, repayments, dividends) may be supplied with
/// either sign; the builder always treats them as outflows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowAggregate {
    /// Period covered.
    pub period: Option<DateRange>,
    /// Profit before tax.
    #[serde(deserialize_with = "zero_if_null")]
    pub profit_before_tax: Decimal,
    /// Depreciation and amortization add-back.
    #[serde(deserialize_with = "zero_if_null")]
    pub depreciation: Decimal,
    /// Change in operating assets.
    #[serde(deserialize_with = "zero_if_null")]
    pub changes_in_assets: Decimal,
    /// Change in operating liabilities.
    #[serde(deserialize_with = "zero_if_null")]
    pub changes_in_liabilities: Decimal,
    /// Income tax paid.
    #[serde(deserialize_with = "zero_if_null")]
    pub tax_paid: Decimal,
    /// Purchase of property, plant and equipment.
    #[serde(deserialize_with = "zero_if_null")]
    pub purchase_of_property: Decimal,
    /// Proceeds from sale of assets.
    #[serde(deserialize_with = "zero_if_null")]
    pub proceeds_from_sale: Decimal,
    /// Proceeds from borrowings.
    #[serde(deserialize_with = "zero_if_null")]
    pub proceeds_from_borrowing: Decimal,
    /// Repayment of borrowings.
    #[serde(deserialize_with = "zero_if_null")]
    pub repayment_of_borrowing: Decimal,
    /// Dividends paid.
    #[serde(deserialize_with = "zero_if_null")]
    pub dividends_paid: Decimal,
    /// Cash and cash equivalents at the start of the period.
    #[serde(deserialize_with = "zero_if_null")]
    pub cash_beginning: Decimal,
}

/// Aggregates for one resolved dashboard period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// Resolved period with comparison dates.
    pub period: ResolvedPeriod,
    /// Balance sheet as of the period end.
    pub balance_sheet: BalanceSheetAggregate,
    /// Totals and balance check of `balance_sheet`.
    pub balance_sheet_totals: BalanceSheetTotals,
    /// Income statement over the period.
    pub income_statement: IncomeStatementAggregate,
}

/// One account line of a trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account type of the bills.
    pub account_type: AccountType,
    /// Category the bills are booked under.
    pub account_name: String,
    /// Debit balance, zero when the balance sits on the credit side.
    pub debit: Decimal,
    /// Credit balance, zero when the balance sits on the debit side.
    pub credit: Decimal,
}

impl TrialBalanceRow {
    /// Places `balance` on the account's normal side, or on the opposite
    /// side when it is negative.
    #[must_use]
    pub fn new(
        account_type: AccountType,
        account_name: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        let amount = balance.abs();
        let on_debit_side = account_type.is_debit_normal() == balance.is_sign_positive();
        let (debit, credit) = if on_debit_side {
            (amount, Decimal::ZERO)
        } else {
            (Decimal::ZERO, amount)
        };
        Self {
            account_type,
            account_name: account_name.into(),
            debit,
            credit,
        }
    }
}

/// Per-account balances as of a date, with the debit/credit check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Date the balances are taken at.
    pub as_of_date: NaiveDate,
    /// Accounts with a non-zero balance.
    pub accounts: Vec<TrialBalanceRow>,
    /// Sum of the debit column.
    pub total_debits: Decimal,
    /// Sum of the credit column.
    pub total_credits: Decimal,
    /// Debits equal credits at two decimals.
    pub balanced: bool,
}
