//! Bill aggregation service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::bill::{AccountType, Bill, TransactionType};
use super::types::{
    BalanceSheetAggregate, CashFlowAggregate, CategoryBreakdown, ExpenseSummary,
    IncomeStatementAggregate, PeriodReport, TrialBalance, TrialBalanceRow,
};
use crate::money::{percent_of, sum_amounts};
use crate::period::{DateRange, ResolvedPeriod};
use crate::schedule::BalanceSheetSection;
use crate::statements::round_amount;

/// Depreciation and amortization categories.
pub const DEPRECIATION_CATEGORIES: &[&str] = &["Depreciation", "Amortization"];
/// Capital expenditure categories.
pub const PROPERTY_CATEGORIES: &[&str] = &[
    "Fixed Assets",
    "Property and Equipment",
    "Property",
    "Equipment",
    "Assets",
];
/// Borrowing proceeds categories.
pub const BORROWING_CATEGORIES: &[&str] = &["Borrowings", "Loan", "Financing"];
/// Borrowing repayment categories.
pub const REPAYMENT_CATEGORIES: &[&str] = &["Loan Repayment", "Loan Payment", "Debt Payment"];
/// Dividend categories.
pub const DIVIDEND_CATEGORIES: &[&str] = &["Dividends", "Distribution"];
/// Cash and bank categories.
pub const CASH_CATEGORIES: &[&str] = &["Cash", "Bank", "Cash and Bank"];

/// Service for turning bill records into statement aggregates.
pub struct AggregationService;

impl AggregationService {
    /// Builds the income statement aggregate over a date range.
    ///
    /// Revenue is credits less debits on revenue bills. Expenses are grouped
    /// per category in first-appearance order and only positive totals kept.
    #[must_use]
    pub fn income_statement(bills: &[Bill], range: DateRange) -> IncomeStatementAggregate {
        let mut revenue_breakdown = CategoryBreakdown::default();
        let mut expense_breakdown = CategoryBreakdown::default();

        for bill in bills.iter().filter(|b| b.within(&range)) {
            match bill.account_type {
                AccountType::Revenue => {
                    revenue_breakdown.add(bill.category_name(), bill.signed_amount());
                }
                AccountType::Expense => {
                    expense_breakdown.add(bill.category_name(), bill.amount_npr);
                }
                _ => {}
            }
        }

        let revenue = revenue_breakdown.total();
        let breakdown: CategoryBreakdown = expense_breakdown
            .0
            .into_iter()
            .filter(|c| c.amount > Decimal::ZERO)
            .collect();
        let total_expenses = breakdown.total();
        let net_income = revenue.saturating_sub(total_expenses);

        tracing::debug!(
            start = %range.start_date,
            end = %range.end_date,
            %revenue,
            %total_expenses,
            "Aggregated income statement"
        );

        IncomeStatementAggregate {
            period: Some(range),
            revenue,
            revenue_breakdown: (!revenue_breakdown.is_empty()).then_some(revenue_breakdown),
            expenses: ExpenseSummary {
                breakdown,
                total_expenses: Some(total_expenses),
            },
            net_income,
            profit_margin: profit_margin(net_income, revenue),
        }
    }

    /// Builds the balance sheet aggregate as of a date.
    ///
    /// Each line sums the bills whose category matches one of its names.
    /// Reserves are revenue less expenses up to the date.
    #[must_use]
    pub fn balance_sheet(bills: &[Bill], as_of_date: NaiveDate) -> BalanceSheetAggregate {
        let to_date: Vec<&Bill> = bills.iter().filter(|b| b.bill_date <= as_of_date).collect();

        let mut aggregate = BalanceSheetAggregate {
            as_of_date: Some(as_of_date),
            ..BalanceSheetAggregate::default()
        };

        for section in BalanceSheetSection::ALL {
            for &line in section.lines() {
                let names = line.category_names();
                if names.is_empty() {
                    continue;
                }
                let amount = sum_amounts(
                    to_date
                        .iter()
                        .filter(|b| b.in_categories(names))
                        .map(|b| b.amount_npr),
                );
                aggregate.set(line, amount);
            }
        }

        let revenue = account_balance(&to_date, AccountType::Revenue);
        let expenses = account_balance(&to_date, AccountType::Expense);
        aggregate.reserves = revenue.saturating_sub(expenses);

        aggregate
    }

    /// Builds the cash flow aggregate over a date range.
    ///
    /// Profit before tax comes from the income statement aggregate. Beginning
    /// cash is taken from bills strictly before the range start.
    #[must_use]
    pub fn cash_flow(bills: &[Bill], range: DateRange) -> CashFlowAggregate {
        let income = Self::income_statement(bills, range);
        let in_range: Vec<&Bill> = bills.iter().filter(|b| b.within(&range)).collect();

        let depreciation =
            category_total(&in_range, DEPRECIATION_CATEGORIES, TransactionType::Debit);
        let purchase_of_property =
            category_total(&in_range, PROPERTY_CATEGORIES, TransactionType::Debit);
        let proceeds_from_borrowing =
            category_total(&in_range, BORROWING_CATEGORIES, TransactionType::Credit);
        let repayment_of_borrowing =
            category_total(&in_range, REPAYMENT_CATEGORIES, TransactionType::Debit);
        let dividends_paid = category_total(&in_range, DIVIDEND_CATEGORIES, TransactionType::Debit);

        tracing::debug!(
            start = %range.start_date,
            end = %range.end_date,
            profit_before_tax = %income.net_income,
            "Aggregated cash flow"
        );

        CashFlowAggregate {
            period: Some(range),
            profit_before_tax: income.net_income,
            depreciation,
            changes_in_assets: Decimal::ZERO,
            changes_in_liabilities: Decimal::ZERO,
            tax_paid: Decimal::ZERO,
            purchase_of_property,
            proceeds_from_sale: Decimal::ZERO,
            proceeds_from_borrowing,
            repayment_of_borrowing,
            dividends_paid,
            cash_beginning: Self::cash_before(bills, range.start_date),
        }
    }

    /// Cash position from bills dated strictly before `date`.
    ///
    /// Uses the cash and bank categories when any such bill exists, otherwise
    /// the net of all credits and debits.
    #[must_use]
    pub fn cash_before(bills: &[Bill], date: NaiveDate) -> Decimal {
        let before: Vec<&Bill> = bills.iter().filter(|b| b.bill_date < date).collect();

        let cash_bills: Vec<&&Bill> = before
            .iter()
            .filter(|b| b.in_categories(CASH_CATEGORIES))
            .collect();

        if cash_bills.is_empty() {
            sum_amounts(before.iter().map(|b| b.signed_amount()))
        } else {
            sum_amounts(cash_bills.iter().map(|b| b.amount_npr))
        }
    }

    /// Builds the dashboard report for a resolved period.
    #[must_use]
    pub fn period_report(bills: &[Bill], period: ResolvedPeriod) -> PeriodReport {
        let current = period.current();
        let balance_sheet = Self::balance_sheet(bills, current.end_date);
        PeriodReport {
            balance_sheet_totals: balance_sheet.totals(),
            balance_sheet,
            income_statement: Self::income_statement(bills, current),
            period,
        }
    }

    /// Builds the trial balance as of a date.
    ///
    /// One account per account type and category, ordered by account type
    /// and then first appearance. A positive balance sits on the account's
    /// normal side and a negative one on the opposite side. Zero balances
    /// are left out.
    #[must_use]
    pub fn trial_balance(bills: &[Bill], as_of_date: NaiveDate) -> TrialBalance {
        let mut balances: Vec<(AccountType, CategoryBreakdown)> = AccountType::ALL
            .iter()
            .map(|&account_type| (account_type, CategoryBreakdown::default()))
            .collect();

        for bill in bills.iter().filter(|b| b.bill_date <= as_of_date) {
            if let Some((_, breakdown)) = balances
                .iter_mut()
                .find(|(account_type, _)| *account_type == bill.account_type)
            {
                breakdown.add(bill.category_name(), bill.normal_amount());
            }
        }

        let accounts: Vec<TrialBalanceRow> = balances
            .into_iter()
            .flat_map(|(account_type, breakdown)| {
                breakdown
                    .0
                    .into_iter()
                    .filter(|c| !c.amount.is_zero())
                    .map(move |c| TrialBalanceRow::new(account_type, c.category_name, c.amount))
            })
            .collect();

        let total_debits = sum_amounts(accounts.iter().map(|a| a.debit));
        let total_credits = sum_amounts(accounts.iter().map(|a| a.credit));
        let balanced = round_amount(total_debits) == round_amount(total_credits);

        tracing::debug!(
            %as_of_date,
            accounts = accounts.len(),
            %total_debits,
            %total_credits,
            balanced,
            "Built trial balance"
        );

        TrialBalance {
            as_of_date,
            accounts,
            total_debits,
            total_credits,
            balanced,
        }
    }
}

/// Net income over revenue in percent.
///
/// Zero when revenue is not positive or the ratio is not representable.
#[must_use]
pub fn profit_margin(net_income: Decimal, revenue: Decimal) -> Decimal {
    percent_of(net_income, revenue)
}

fn account_balance(bills: &[&Bill], account_type: AccountType) -> Decimal {
    sum_amounts(
        bills
            .iter()
            .filter(|b| b.account_type == account_type)
            .map(|b| b.normal_amount()),
    )
}

fn category_total(bills: &[&Bill], names: &[&str], direction: TransactionType) -> Decimal {
    sum_amounts(
        bills
            .iter()
            .filter(|b| b.transaction_type == direction && b.in_categories(names))
            .map(|b| b.amount_npr),
    )
}
