//! Statement view model builders.
//!
//! Each builder takes the current aggregate and an optional comparison
//! aggregate and lays them out in the fixed row order of its statement.
//! Builders never fail: missing figures read as zero, missing comparison
//! data prints as `-` and totals saturate at the `Decimal` bounds.

use rust_decimal::Decimal;

use super::types::{
    StatementContext, StatementHeader, StatementKind, StatementRow, StatementSummary,
    StatementViewModel,
};
use crate::aggregation::{
    BalanceSheetAggregate, CashFlowAggregate, CategoryBreakdown, IncomeStatementAggregate,
    profit_margin,
};
use crate::schedule::{
    BalanceSheetSection, CashFlowLine, INCOME_TAX, OTHER_INCOME, REVENUE_FROM_OPERATIONS,
    RevenueClass, ScheduleRef, classify_expense, classify_revenue,
};

/// Placeholder line when no expenses exist in either column.
pub const NO_EXPENSES: &str = "No expenses recorded";

/// Share of revenue attributed to operations when no breakdown is supplied.
fn operations_share() -> Decimal {
    Decimal::new(8, 1)
}

/// Current and comparison sources for one statement.
struct Columns<'a, T> {
    current: &'a T,
    comparison: Option<&'a T>,
}

impl<T> Columns<'_, T> {
    fn pick(&self, f: impl Fn(&T) -> Decimal) -> (Option<Decimal>, Option<Decimal>) {
        (Some(f(self.current)), self.comparison.map(&f))
    }

    fn line(
        &self,
        label: &str,
        schedule: Option<u8>,
        f: impl Fn(&T) -> Decimal,
    ) -> StatementRow {
        let (current, comparison) = self.pick(f);
        StatementRow::line(label, schedule, current, comparison)
    }

    fn subtotal(&self, label: &str, f: impl Fn(&T) -> Decimal) -> StatementRow {
        let (current, comparison) = self.pick(f);
        StatementRow::subtotal(label, current, comparison)
    }

    fn total(&self, label: &str, f: impl Fn(&T) -> Decimal) -> StatementRow {
        let (current, comparison) = self.pick(f);
        StatementRow::total(label, current, comparison)
    }
}

/// Builds statement view models.
pub struct StatementBuilder;

impl StatementBuilder {
    /// Builds the statement of profit or loss.
    ///
    /// Revenue splits into operations (10) and other income (11): by
    /// [`classify_revenue`] when a revenue breakdown is present, otherwise
    /// 80/20 of the total. Expenses are classified into schedules 12-16,
    /// merged per schedule and sorted by schedule number, with unclassified
    /// categories after them in first-appearance order.
    #[must_use]
    pub fn income_statement(
        context: &StatementContext,
        current: &IncomeStatementAggregate,
        comparison: Option<&IncomeStatementAggregate>,
    ) -> StatementViewModel {
        let current = IncomeFigures::from_aggregate(current);
        let comparison = comparison.map(IncomeFigures::from_aggregate);
        let columns = Columns {
            current: &current,
            comparison: comparison.as_ref(),
        };

        let mut rows = vec![
            StatementRow::header("REVENUE"),
            columns.line(
                REVENUE_FROM_OPERATIONS.name,
                Some(REVENUE_FROM_OPERATIONS.number),
                |f| f.operations,
            ),
            columns.line(OTHER_INCOME.name, Some(OTHER_INCOME.number), |f| f.other),
            columns.subtotal("Total Revenue", IncomeFigures::total_revenue),
            StatementRow::spacer(),
            StatementRow::header("EXPENSES"),
        ];

        let mut keys: Vec<ScheduleRef> = current.expenses.iter().map(|(k, _)| k.clone()).collect();
        if let Some(comparison) = &comparison {
            for (key, _) in &comparison.expenses {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
        }
        sort_by_schedule(&mut keys, |k| k);

        if keys.is_empty() {
            rows.push(StatementRow::line(NO_EXPENSES, None, None, None));
        }
        for key in &keys {
            rows.push(columns.line(&key.display_name, key.number, |f| f.expense(key)));
        }

        rows.extend([
            columns.subtotal("Total Expenses", |f| f.total_expenses),
            StatementRow::spacer(),
            columns.subtotal("Profit/(Loss) Before Tax", IncomeFigures::profit_before_tax),
            // tax is not computed; the line stays a placeholder
            StatementRow::line(
                format!("Less: {}", INCOME_TAX.name),
                Some(INCOME_TAX.number),
                None,
                None,
            ),
            columns.total("Profit/(Loss) for the Year", IncomeFigures::profit_for_year),
        ]);

        let net_income = current.profit_for_year();

        StatementViewModel {
            kind: StatementKind::IncomeStatement,
            header: StatementHeader::new(StatementKind::IncomeStatement, context),
            rows,
            footer: StatementKind::IncomeStatement.footer().to_string(),
            summary: StatementSummary {
                net_income: Some(net_income),
                profit_margin: Some(profit_margin(net_income, current.total_revenue())),
                ..StatementSummary::default()
            },
        }
    }

    /// Builds the statement of financial position.
    ///
    /// The `balanced` summary flag compares total assets against total equity
    /// plus total liabilities at two decimals. An imbalance is reported, not
    /// raised.
    #[must_use]
    pub fn balance_sheet(
        context: &StatementContext,
        current: &BalanceSheetAggregate,
        comparison: Option<&BalanceSheetAggregate>,
    ) -> StatementViewModel {
        let columns = Columns {
            current,
            comparison,
        };

        let mut rows = Vec::new();
        for section in BalanceSheetSection::ALL {
            rows.push(StatementRow::header(section.title()));
            for &line in section.lines() {
                rows.push(columns.line(line.label(), line.schedule(), |a| a.amount(line)));
            }
            rows.push(columns.subtotal(section.subtotal_label(), |a| a.section_total(section)));

            match section {
                BalanceSheetSection::CurrentAssets => {
                    rows.push(columns.total("Total Assets", BalanceSheetAggregate::total_assets));
                    rows.push(StatementRow::spacer());
                }
                BalanceSheetSection::CurrentLiabilities => {
                    rows.push(columns.total(
                        "Total Liabilities",
                        BalanceSheetAggregate::total_liabilities,
                    ));
                    rows.push(StatementRow::spacer());
                    rows.push(columns.total("Total Equity & Liabilities", |a| {
                        a.totals().total_liabilities_and_equity
                    }));
                }
                _ => {}
            }
        }
        rows.push(StatementRow::spacer());
        rows.push(StatementRow::line("Contingent Liabilities", None, None, None));

        let totals = current.totals();
        if !totals.balanced {
            tracing::warn!(
                assets = %totals.total_assets,
                equity_and_liabilities = %totals.total_liabilities_and_equity,
                "Balance sheet does not balance"
            );
        }

        StatementViewModel {
            kind: StatementKind::BalanceSheet,
            header: StatementHeader::new(StatementKind::BalanceSheet, context),
            rows,
            footer: StatementKind::BalanceSheet.footer().to_string(),
            summary: StatementSummary {
                balanced: Some(totals.balanced),
                ..StatementSummary::default()
            },
        }
    }

    /// Builds the cash flow statement (indirect method).
    ///
    /// Outflows print negative whatever sign they arrive with. Net change is
    /// the sum of the three section totals and ending cash is beginning cash
    /// plus net change.
    #[must_use]
    pub fn cash_flow(
        context: &StatementContext,
        current: &CashFlowAggregate,
        comparison: Option<&CashFlowAggregate>,
    ) -> StatementViewModel {
        let current = CashFlowFigures::from(current);
        let comparison = comparison.map(CashFlowFigures::from);
        let columns = Columns {
            current: &current,
            comparison: comparison.as_ref(),
        };
        let scheduled = |line: CashFlowLine, f: fn(&CashFlowFigures) -> Decimal| {
            columns.line(line.label(), Some(line.schedule()), f)
        };

        let rows = vec![
            StatementRow::header("A. Cash Flow from Operating Activities"),
            scheduled(CashFlowLine::ProfitBeforeTax, |f| f.profit_before_tax),
            StatementRow::header("Adjustments for:"),
            scheduled(CashFlowLine::Depreciation, |f| f.depreciation),
            columns.subtotal(
                "Operating Profit Before Working Capital Changes",
                CashFlowFigures::operating_profit,
            ),
            StatementRow::header("Working Capital Changes:"),
            columns.line("Changes in Operating Assets", None, |f| f.changes_in_assets),
            columns.line("Changes in Operating Liabilities", None, |f| {
                f.changes_in_liabilities
            }),
            columns.subtotal("Cash Generated from Operations", CashFlowFigures::cash_generated),
            scheduled(CashFlowLine::IncomeTaxPaid, |f| -f.tax_paid),
            columns.subtotal("Net Cash from Operating Activities", CashFlowFigures::operating),
            StatementRow::spacer(),
            StatementRow::header("B. Cash Flow from Investing Activities"),
            scheduled(CashFlowLine::PurchaseOfProperty, |f| -f.purchase_of_property),
            columns.line("Proceeds from Sale of Assets", None, |f| f.proceeds_from_sale),
            columns.subtotal("Net Cash from Investing Activities", CashFlowFigures::investing),
            StatementRow::spacer(),
            StatementRow::header("C. Cash Flow from Financing Activities"),
            scheduled(CashFlowLine::ProceedsFromBorrowings, |f| {
                f.proceeds_from_borrowing
            }),
            columns.line("Repayment of Borrowings", None, |f| -f.repayment_of_borrowing),
            scheduled(CashFlowLine::DividendsPaid, |f| -f.dividends_paid),
            columns.subtotal("Net Cash from Financing Activities", CashFlowFigures::financing),
            StatementRow::spacer(),
            columns.total(
                "Net Increase/(Decrease) in Cash and Cash Equivalents",
                CashFlowFigures::net_change,
            ),
            columns.line(
                "Cash and Cash Equivalents at Beginning of Period",
                None,
                |f| f.cash_beginning,
            ),
            columns.total(
                "Cash and Cash Equivalents at End of Period",
                CashFlowFigures::cash_ending,
            ),
        ];

        StatementViewModel {
            kind: StatementKind::CashFlow,
            header: StatementHeader::new(StatementKind::CashFlow, context),
            rows,
            footer: StatementKind::CashFlow.footer().to_string(),
            summary: StatementSummary {
                net_change_in_cash: Some(current.net_change()),
                cash_ending: Some(current.cash_ending()),
                ..StatementSummary::default()
            },
        }
    }
}

/// Income statement figures after revenue split and expense grouping.
struct IncomeFigures {
    operations: Decimal,
    other: Decimal,
    expenses: Vec<(ScheduleRef, Decimal)>,
    total_expenses: Decimal,
}

impl IncomeFigures {
    fn from_aggregate(aggregate: &IncomeStatementAggregate) -> Self {
        let (operations, other) = match &aggregate.revenue_breakdown {
            Some(breakdown) if !breakdown.is_empty() => split_revenue(breakdown),
            _ => {
                let operations = aggregate
                    .revenue
                    .checked_mul(operations_share())
                    .unwrap_or(Decimal::ZERO);
                (operations, aggregate.revenue.saturating_sub(operations))
            }
        };

        Self {
            operations,
            other,
            expenses: group_expenses(&aggregate.expenses.breakdown),
            total_expenses: aggregate.expenses.total(),
        }
    }

    fn total_revenue(&self) -> Decimal {
        self.operations.saturating_add(self.other)
    }

    fn profit_before_tax(&self) -> Decimal {
        self.total_revenue().saturating_sub(self.total_expenses)
    }

    fn profit_for_year(&self) -> Decimal {
        self.profit_before_tax()
    }

    fn expense(&self, key: &ScheduleRef) -> Decimal {
        self.expenses
            .iter()
            .find(|(k, _)| k == key)
            .map_or(Decimal::ZERO, |(_, amount)| *amount)
    }
}

fn split_revenue(breakdown: &CategoryBreakdown) -> (Decimal, Decimal) {
    breakdown
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(ops, other), entry| {
            match classify_revenue(&entry.category_name) {
                RevenueClass::Operations => (ops.saturating_add(entry.amount), other),
                RevenueClass::Other => (ops, other.saturating_add(entry.amount)),
            }
        })
}

/// Classifies and merges expense categories, then orders them by schedule.
fn group_expenses(breakdown: &CategoryBreakdown) -> Vec<(ScheduleRef, Decimal)> {
    let mut grouped: Vec<(ScheduleRef, Decimal)> = Vec::new();
    for entry in breakdown.iter() {
        let key = classify_expense(&entry.category_name);
        match grouped.iter_mut().find(|(k, _)| *k == key) {
            Some((_, amount)) => *amount = amount.saturating_add(entry.amount),
            None => grouped.push((key, entry.amount)),
        }
    }
    sort_by_schedule(&mut grouped, |(k, _)| k);
    grouped
}

/// Stable sort: classified by ascending schedule, then unclassified.
fn sort_by_schedule<T>(items: &mut [T], key: impl Fn(&T) -> &ScheduleRef) {
    items.sort_by_key(|item| {
        let number = key(item).number;
        (number.is_none(), number)
    });
}

/// Cash flow figures with outflows normalized to magnitudes.
struct CashFlowFigures {
    profit_before_tax: Decimal,
    depreciation: Decimal,
    changes_in_assets: Decimal,
    changes_in_liabilities: Decimal,
    tax_paid: Decimal,
    purchase_of_property: Decimal,
    proceeds_from_sale: Decimal,
    proceeds_from_borrowing: Decimal,
    repayment_of_borrowing: Decimal,
    dividends_paid: Decimal,
    cash_beginning: Decimal,
}

impl From<&CashFlowAggregate> for CashFlowFigures {
    fn from(a: &CashFlowAggregate) -> Self {
        Self {
            profit_before_tax: a.profit_before_tax,
            depreciation: a.depreciation,
            changes_in_assets: a.changes_in_assets,
            changes_in_liabilities: a.changes_in_liabilities,
            tax_paid: a.tax_paid.abs(),
            purchase_of_property: a.purchase_of_property.abs(),
            proceeds_from_sale: a.proceeds_from_sale,
            proceeds_from_borrowing: a.proceeds_from_borrowing,
            repayment_of_borrowing: a.repayment_of_borrowing.abs(),
            dividends_paid: a.dividends_paid.abs(),
            cash_beginning: a.cash_beginning,
        }
    }
}

impl CashFlowFigures {
    fn operating_profit(&self) -> Decimal {
        self.profit_before_tax.saturating_add(self.depreciation)
    }

    fn cash_generated(&self) -> Decimal {
        self.operating_profit()
            .saturating_add(self.changes_in_assets)
            .saturating_add(self.changes_in_liabilities)
    }

    fn operating(&self) -> Decimal {
        self.cash_generated().saturating_sub(self.tax_paid)
    }

    fn investing(&self) -> Decimal {
        self.proceeds_from_sale.saturating_sub(self.purchase_of_property)
    }

    fn financing(&self) -> Decimal {
        self.proceeds_from_borrowing
            .saturating_sub(self.repayment_of_borrowing)
            .saturating_sub(self.dividends_paid)
    }

    fn net_change(&self) -> Decimal {
        self.operating()
            .saturating_add(self.investing())
            .saturating_add(self.financing())
    }

    fn cash_ending(&self) -> Decimal {
        self.cash_beginning.saturating_add(self.net_change())
    }
}
