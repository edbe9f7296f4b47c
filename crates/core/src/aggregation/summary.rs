//! Spending summaries over bills.
//!
//! Unlike the statements, these count every bill regardless of account
//! type and report plain bill amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bill::Bill;
use super::service::AggregationService;
use crate::money::sum_amounts;
use crate::period::resolver::month_name;
use crate::period::{DateRange, Period, PeriodError};

/// Narrows the bills an expense report covers.
///
/// Empty lists and missing bounds match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseReportFilter {
    /// Category names, compared ignoring case.
    pub categories: Vec<String>,
    /// Vendor name fragments, compared ignoring case.
    pub vendors: Vec<String>,
    /// Smallest bill amount included.
    pub min_amount: Option<Decimal>,
    /// Largest bill amount included.
    pub max_amount: Option<Decimal>,
}

impl ExpenseReportFilter {
    /// Returns true if `bill` passes every condition.
    #[must_use]
    pub fn matches(&self, bill: &Bill) -> bool {
        let category_ok = self.categories.is_empty()
            || bill.category.as_deref().is_some_and(|c| {
                self.categories.iter().any(|n| n.eq_ignore_ascii_case(c))
            });

        let vendor_ok = self.vendors.is_empty()
            || bill.vendor.as_deref().is_some_and(|v| {
                let vendor = v.to_lowercase();
                self.vendors
                    .iter()
                    .map(|n| n.trim().to_lowercase())
                    .any(|n| vendor.contains(&n))
            });

        category_ok
            && vendor_ok
            && self.min_amount.is_none_or(|min| bill.amount_npr >= min)
            && self.max_amount.is_none_or(|max| bill.amount_npr <= max)
    }
}

/// Spending in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpend {
    /// Category display name.
    pub category_name: String,
    /// Sum of bill amounts.
    pub total_amount: Decimal,
    /// Number of bills.
    pub bill_count: usize,
}

/// Spending per category over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseReport {
    /// Range covered.
    pub period: DateRange,
    /// `start to end` caption.
    pub date_range: String,
    /// Number of matching bills.
    pub total_bills: usize,
    /// Sum of matching bill amounts.
    pub total_amount: Decimal,
    /// Per-category spending, largest first.
    pub categories: Vec<CategorySpend>,
    /// Matching bills without a category.
    pub uncategorized_bills: usize,
}

/// Spending in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySpending {
    /// Month number, 1 to 12.
    pub month: u32,
    /// English month name.
    pub month_name: String,
    /// Sum of bill amounts.
    pub total_amount: Decimal,
    /// Number of bills.
    pub bill_count: usize,
}

impl AggregationService {
    /// Summarizes spending per category for bills in `range` that pass
    /// `filter`.
    ///
    /// Categories are sorted by total, largest first. Ties keep first
    /// appearance order.
    #[must_use]
    pub fn expense_report(
        bills: &[Bill],
        range: DateRange,
        filter: &ExpenseReportFilter,
    ) -> ExpenseReport {
        let matching: Vec<&Bill> = bills
            .iter()
            .filter(|b| b.within(&range) && filter.matches(b))
            .collect();

        let mut categories: Vec<CategorySpend> = Vec::new();
        for bill in &matching {
            let name = bill.category_name();
            match categories.iter_mut().find(|c| c.category_name == name) {
                Some(spend) => {
                    spend.total_amount = spend.total_amount.saturating_add(bill.amount_npr);
                    spend.bill_count += 1;
                }
                None => categories.push(CategorySpend {
                    category_name: name.to_string(),
                    total_amount: bill.amount_npr,
                    bill_count: 1,
                }),
            }
        }
        categories.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));

        let total_amount = sum_amounts(matching.iter().map(|b| b.amount_npr));
        tracing::debug!(
            start = %range.start_date,
            end = %range.end_date,
            bills = matching.len(),
            %total_amount,
            "Built expense report"
        );

        ExpenseReport {
            period: range,
            date_range: format!("{} to {}", range.start_date, range.end_date),
            total_bills: matching.len(),
            total_amount,
            categories,
            uncategorized_bills: matching.iter().filter(|b| b.category.is_none()).count(),
        }
    }

    /// Spending per calendar month of `year`, January first.
    pub fn monthly_summary(bills: &[Bill], year: i32) -> Result<Vec<MonthlySpending>, PeriodError> {
        (1..=12)
            .map(|month| {
                let range = Period::monthly(year, month)?.date_range()?;
                let in_month: Vec<&Bill> = bills.iter().filter(|b| b.within(&range)).collect();
                Ok(MonthlySpending {
                    month,
                    month_name: month_name(month).to_string(),
                    total_amount: sum_amounts(in_month.iter().map(|b| b.amount_npr)),
                    bill_count: in_month.len(),
                })
            })
            .collect()
    }
}
