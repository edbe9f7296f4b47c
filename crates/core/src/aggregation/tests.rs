//! Tests for bill aggregation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::bill::{AccountType, Bill, TransactionType};
use super::service::{AggregationService, profit_margin};
use super::summary::ExpenseReportFilter;
use super::types::{
    BalanceSheetAggregate, CashFlowAggregate, CategoryBreakdown, IncomeStatementAggregate,
    TrialBalanceRow,
};
use crate::period::{DateRange, Period};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, end).unwrap()
}

fn expense(d: NaiveDate, category: &str, amount: Decimal) -> Bill {
    Bill::new(d, category, amount, TransactionType::Debit, AccountType::Expense)
}

fn revenue(d: NaiveDate, category: &str, amount: Decimal) -> Bill {
    Bill::new(d, category, amount, TransactionType::Credit, AccountType::Revenue)
}

proptest! {
    /// Non-positive revenue always yields a zero margin.
    #[test]
    fn test_margin_zero_without_revenue(
        net in -1_000_000i64..1_000_000i64,
        revenue in -1_000_000i64..=0i64,
    ) {
        prop_assert_eq!(
            profit_margin(Decimal::from(net), Decimal::from(revenue)),
            Decimal::ZERO
        );
    }

    /// Revenue equals credits less debits on revenue bills in range.
    #[test]
    fn test_revenue_is_net_of_refunds(
        credits in prop::collection::vec(1i64..100_000, 0..10),
        debits in prop::collection::vec(1i64..100_000, 0..10),
    ) {
        let day = date(2024, 6, 15);
        let mut bills: Vec<Bill> = credits
            .iter()
            .map(|&c| revenue(day, "Sales", Decimal::from(c)))
            .collect();
        bills.extend(debits.iter().map(|&d| {
            Bill::new(day, "Sales", Decimal::from(d), TransactionType::Debit, AccountType::Revenue)
        }));

        let aggregate = AggregationService::income_statement(
            &bills,
            range(date(2024, 6, 1), date(2024, 6, 30)),
        );

        let expected: i64 = credits.iter().sum::<i64>() - debits.iter().sum::<i64>();
        prop_assert_eq!(aggregate.revenue, Decimal::from(expected));
    }

    /// Without cash categories, beginning cash is the net of all prior bills.
    #[test]
    fn test_cash_before_falls_back_to_net(
        amounts in prop::collection::vec((1i64..50_000, any::<bool>()), 0..12),
    ) {
        let bills: Vec<Bill> = amounts
            .iter()
            .map(|&(amount, credit)| {
                let direction = if credit { TransactionType::Credit } else { TransactionType::Debit };
                Bill::new(date(2024, 1, 10), "Sales", Decimal::from(amount), direction, AccountType::Revenue)
            })
            .collect();

        let expected: i64 = amounts
            .iter()
            .map(|&(amount, credit)| if credit { amount } else { -amount })
            .sum();

        prop_assert_eq!(
            AggregationService::cash_before(&bills, date(2024, 2, 1)),
            Decimal::from(expected)
        );
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_income_statement_totals() {
        let bills = vec![
            revenue(date(2024, 3, 1), "Sales", dec!(10000)),
            Bill::new(
                date(2024, 3, 2),
                "Sales",
                dec!(500),
                TransactionType::Debit,
                AccountType::Revenue,
            ),
            expense(date(2024, 3, 5), "Office Admin", dec!(3000)),
            expense(date(2024, 3, 6), "Cost of Goods", dec!(2000)),
        ];

        let aggregate = AggregationService::income_statement(
            &bills,
            range(date(2024, 3, 1), date(2024, 3, 31)),
        );

        assert_eq!(aggregate.revenue, dec!(9500));
        assert_eq!(aggregate.expenses.total(), dec!(5000));
        assert_eq!(aggregate.net_income, dec!(4500));
        assert_eq!(aggregate.profit_margin, dec!(47.37));
    }

    #[test]
    fn test_expense_breakdown_keeps_first_appearance_order() {
        let bills = vec![
            expense(date(2024, 3, 5), "Office Admin", dec!(1000)),
            expense(date(2024, 3, 6), "Cost of Goods", dec!(2000)),
            expense(date(2024, 3, 7), "Office Admin", dec!(500)),
        ];

        let aggregate = AggregationService::income_statement(
            &bills,
            range(date(2024, 3, 1), date(2024, 3, 31)),
        );

        let names: Vec<&str> = aggregate
            .expenses
            .breakdown
            .iter()
            .map(|c| c.category_name.as_str())
            .collect();
        assert_eq!(names, vec!["Office Admin", "Cost of Goods"]);
        assert_eq!(aggregate.expenses.breakdown.0[0].amount, dec!(1500));
    }

    #[test]
    fn test_bills_outside_range_are_excluded() {
        let bills = vec![
            expense(date(2024, 2, 29), "Rent", dec!(700)),
            expense(date(2024, 3, 1), "Rent", dec!(100)),
            expense(date(2024, 4, 1), "Rent", dec!(900)),
        ];

        let aggregate = AggregationService::income_statement(
            &bills,
            range(date(2024, 3, 1), date(2024, 3, 31)),
        );

        assert_eq!(aggregate.expenses.total(), dec!(100));
    }

    #[test]
    fn test_uncategorized_and_zero_totals() {
        let mut no_category = expense(date(2024, 3, 2), "x", dec!(40));
        no_category.category = None;
        let bills = vec![no_category, expense(date(2024, 3, 3), "Free Sample", dec!(0))];

        let aggregate = AggregationService::income_statement(
            &bills,
            range(date(2024, 3, 1), date(2024, 3, 31)),
        );

        assert_eq!(aggregate.expenses.breakdown.0.len(), 1);
        assert_eq!(aggregate.expenses.breakdown.0[0].category_name, "Uncategorized");
        assert_eq!(aggregate.profit_margin, Decimal::ZERO);
        assert!(aggregate.revenue_breakdown.is_none());
    }

    #[test]
    fn test_balance_sheet_lines_and_reserves() {
        let bills = vec![
            Bill::new(
                date(2024, 1, 5),
                "equipment",
                dec!(50000),
                TransactionType::Debit,
                AccountType::Asset,
            ),
            Bill::new(
                date(2024, 1, 6),
                "Share Capital",
                dec!(100000),
                TransactionType::Credit,
                AccountType::Equity,
            ),
            revenue(date(2024, 2, 1), "Sales", dec!(20000)),
            expense(date(2024, 2, 2), "Rent", dec!(5000)),
            // after the as-of date
            Bill::new(
                date(2024, 4, 1),
                "Equipment",
                dec!(9999),
                TransactionType::Debit,
                AccountType::Asset,
            ),
        ];

        let aggregate = AggregationService::balance_sheet(&bills, date(2024, 3, 31));

        assert_eq!(aggregate.property_plant_equipment, dec!(50000));
        assert_eq!(aggregate.share_capital, dec!(100000));
        assert_eq!(aggregate.reserves, dec!(15000));
        assert_eq!(aggregate.cash, Decimal::ZERO);
        assert_eq!(aggregate.as_of_date, Some(date(2024, 3, 31)));
    }

    #[test]
    fn test_cash_flow_categories() {
        let bills = vec![
            Bill::new(
                date(2023, 12, 31),
                "Bank",
                dec!(40000),
                TransactionType::Credit,
                AccountType::Asset,
            ),
            revenue(date(2024, 1, 10), "Sales", dec!(30000)),
            expense(date(2024, 1, 11), "Depreciation", dec!(1000)),
            Bill::new(
                date(2024, 1, 12),
                "Equipment",
                dec!(8000),
                TransactionType::Debit,
                AccountType::Asset,
            ),
            Bill::new(
                date(2024, 1, 13),
                "Loan",
                dec!(15000),
                TransactionType::Credit,
                AccountType::Liability,
            ),
            Bill::new(
                date(2024, 1, 14),
                "Dividends",
                dec!(2000),
                TransactionType::Debit,
                AccountType::Equity,
            ),
        ];

        let aggregate =
            AggregationService::cash_flow(&bills, range(date(2024, 1, 1), date(2024, 1, 31)));

        assert_eq!(aggregate.profit_before_tax, dec!(29000));
        assert_eq!(aggregate.depreciation, dec!(1000));
        assert_eq!(aggregate.purchase_of_property, dec!(8000));
        assert_eq!(aggregate.proceeds_from_borrowing, dec!(15000));
        assert_eq!(aggregate.dividends_paid, dec!(2000));
        assert_eq!(aggregate.tax_paid, Decimal::ZERO);
        assert_eq!(aggregate.cash_beginning, dec!(40000));
    }

    #[test]
    fn test_cash_before_excludes_start_date() {
        let bills = vec![
            Bill::new(
                date(2024, 1, 1),
                "Cash",
                dec!(500),
                TransactionType::Credit,
                AccountType::Asset,
            ),
        ];
        assert_eq!(
            AggregationService::cash_before(&bills, date(2024, 1, 1)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_period_report_uses_period_end() {
        let period = Period::monthly(2024, 2).unwrap().resolve().unwrap();
        let bills = vec![revenue(date(2024, 2, 29), "Sales", dec!(1200))];

        let report = AggregationService::period_report(&bills, period);

        assert_eq!(report.balance_sheet.as_of_date, Some(date(2024, 2, 29)));
        assert_eq!(report.income_statement.revenue, dec!(1200));
        assert_eq!(report.period.label, "February 2024");
    }

    #[test]
    fn test_breakdown_deserializes_from_map_in_order() {
        let breakdown: CategoryBreakdown =
            serde_json::from_str(r#"{"Zeta": 1, "Alpha": "2.50", "Mid": null}"#).unwrap();

        let names: Vec<&str> = breakdown.iter().map(|c| c.category_name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(breakdown.total(), dec!(3.50));
    }

    #[test]
    fn test_breakdown_deserializes_from_list() {
        let breakdown: CategoryBreakdown = serde_json::from_str(
            r#"[{"category_name": "Rent", "amount": 100}, {"category_name": "Fuel"}]"#,
        )
        .unwrap();

        assert_eq!(breakdown.0.len(), 2);
        assert_eq!(breakdown.0[1].amount, Decimal::ZERO);
    }

    #[test]
    fn test_missing_fields_read_as_zero() {
        let income: IncomeStatementAggregate =
            serde_json::from_str(r#"{"revenue": null}"#).unwrap();
        assert_eq!(income.revenue, Decimal::ZERO);
        assert!(income.expenses.breakdown.is_empty());

        let balance: BalanceSheetAggregate =
            serde_json::from_str(r#"{"cash": "125.5", "unknown": 1}"#).unwrap();
        assert_eq!(balance.cash, dec!(125.5));
        assert_eq!(balance.reserves, Decimal::ZERO);

        let cash_flow: CashFlowAggregate = serde_json::from_str("{}").unwrap();
        assert_eq!(cash_flow, CashFlowAggregate::default());
    }

    #[test]
    fn test_breakdown_serializes_as_ordered_map() {
        let mut breakdown = CategoryBreakdown::default();
        breakdown.add("Zeta", dec!(1));
        breakdown.add("Alpha", dec!(2));

        let json = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(json, r#"{"Zeta":"1","Alpha":"2"}"#);
    }

    #[test]
    fn test_period_report_carries_balance_sheet_totals() {
        let period = Period::quarterly(2024, 1).unwrap().resolve().unwrap();
        let bills = vec![
            Bill::new(
                date(2024, 1, 5),
                "Share Capital",
                dec!(50000),
                TransactionType::Credit,
                AccountType::Equity,
            ),
            Bill::new(
                date(2024, 1, 5),
                "Cash",
                dec!(50000),
                TransactionType::Debit,
                AccountType::Asset,
            ),
        ];

        let report = AggregationService::period_report(&bills, period);
        let totals = report.balance_sheet_totals;

        assert_eq!(totals, report.balance_sheet.totals());
        assert_eq!(totals.total_assets, dec!(50000));
        assert_eq!(totals.total_liabilities, Decimal::ZERO);
        assert_eq!(totals.total_equity, dec!(50000));
        assert!(totals.balanced);
    }

    #[test]
    fn test_margin_of_extreme_ratio_is_zero() {
        let bills = vec![
            revenue(date(2024, 3, 1), "Sales", dec!(0.0000000001)),
            expense(date(2024, 3, 2), "Rent", dec!(100000000000000000000)),
        ];

        let aggregate = AggregationService::income_statement(
            &bills,
            range(date(2024, 3, 1), date(2024, 3, 31)),
        );

        assert_eq!(aggregate.profit_margin, Decimal::ZERO);
        assert!(aggregate.net_income < Decimal::ZERO);
    }

    #[test]
    fn test_sums_saturate_instead_of_overflowing() {
        let bills = vec![
            expense(date(2024, 3, 1), "Rent", Decimal::MAX),
            expense(date(2024, 3, 2), "Rent", Decimal::MAX),
            revenue(date(2024, 3, 3), "Sales", Decimal::MAX),
        ];

        let aggregate = AggregationService::income_statement(
            &bills,
            range(date(2024, 3, 1), date(2024, 3, 31)),
        );
        assert_eq!(aggregate.expenses.total(), Decimal::MAX);
        assert_eq!(aggregate.net_income, Decimal::ZERO);

        let sheet = AggregationService::balance_sheet(&bills, date(2024, 3, 31));
        assert_eq!(sheet.reserves, Decimal::ZERO);
    }

    #[test]
    fn test_trial_balance_sides_and_order() {
        let bills = vec![
            expense(date(2024, 3, 5), "Office Admin", dec!(3000)),
            revenue(date(2024, 3, 1), "Sales", dec!(10000)),
            Bill::new(
                date(2024, 1, 10),
                "Share Capital",
                dec!(7000),
                TransactionType::Credit,
                AccountType::Equity,
            ),
            // a revenue account with only refunds has a debit balance
            Bill::new(
                date(2024, 3, 2),
                "Consulting",
                dec!(400),
                TransactionType::Debit,
                AccountType::Revenue,
            ),
            // after the as-of date
            expense(date(2024, 4, 1), "Office Admin", dec!(999)),
        ];

        let trial = AggregationService::trial_balance(&bills, date(2024, 3, 31));

        assert_eq!(
            trial.accounts,
            vec![
                TrialBalanceRow {
                    account_type: AccountType::Equity,
                    account_name: "Share Capital".into(),
                    debit: Decimal::ZERO,
                    credit: dec!(7000),
                },
                TrialBalanceRow {
                    account_type: AccountType::Revenue,
                    account_name: "Sales".into(),
                    debit: Decimal::ZERO,
                    credit: dec!(10000),
                },
                TrialBalanceRow {
                    account_type: AccountType::Revenue,
                    account_name: "Consulting".into(),
                    debit: dec!(400),
                    credit: Decimal::ZERO,
                },
                TrialBalanceRow {
                    account_type: AccountType::Expense,
                    account_name: "Office Admin".into(),
                    debit: dec!(3000),
                    credit: Decimal::ZERO,
                },
            ]
        );
        assert_eq!(trial.total_debits, dec!(3400));
        assert_eq!(trial.total_credits, dec!(17000));
        assert!(!trial.balanced);
    }

    #[test]
    fn test_trial_balance_balances_double_entry() {
        let bills = vec![
            Bill::new(
                date(2024, 1, 5),
                "Cash",
                dec!(2500.005),
                TransactionType::Debit,
                AccountType::Asset,
            ),
            revenue(date(2024, 1, 5), "Sales", dec!(2500.005)),
            expense(date(2024, 1, 6), "Rent", Decimal::ZERO),
        ];

        let trial = AggregationService::trial_balance(&bills, date(2024, 1, 31));

        assert_eq!(trial.accounts.len(), 2);
        assert!(trial.balanced);
    }

    #[test]
    fn test_expense_report_groups_and_filters() {
        let mut telecom = expense(date(2024, 3, 5), "Office Admin", dec!(3000));
        telecom.vendor = Some("Nepal Telecom".into());
        let mut uncategorized = expense(date(2024, 3, 6), "x", dec!(250));
        uncategorized.category = None;
        let bills = vec![
            telecom,
            expense(date(2024, 3, 7), "Cost of Goods", dec!(5000)),
            expense(date(2024, 3, 8), "office admin", dec!(1000)),
            uncategorized,
            expense(date(2024, 4, 1), "Cost of Goods", dec!(9999)),
        ];
        let march = range(date(2024, 3, 1), date(2024, 3, 31));

        let report =
            AggregationService::expense_report(&bills, march, &ExpenseReportFilter::default());
        assert_eq!(report.total_bills, 4);
        assert_eq!(report.total_amount, dec!(9250));
        assert_eq!(report.uncategorized_bills, 1);
        assert_eq!(report.date_range, "2024-03-01 to 2024-03-31");
        let names: Vec<&str> = report
            .categories
            .iter()
            .map(|c| c.category_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Cost of Goods", "Office Admin", "office admin", "Uncategorized"]
        );

        let filter = ExpenseReportFilter {
            categories: vec!["OFFICE ADMIN".into()],
            min_amount: Some(dec!(2000)),
            ..ExpenseReportFilter::default()
        };
        let report = AggregationService::expense_report(&bills, march, &filter);
        assert_eq!(report.total_bills, 1);
        assert_eq!(report.categories[0].total_amount, dec!(3000));

        let filter = ExpenseReportFilter {
            vendors: vec![" telecom".into()],
            ..ExpenseReportFilter::default()
        };
        let report = AggregationService::expense_report(&bills, march, &filter);
        assert_eq!(report.total_bills, 1);
        assert_eq!(report.categories[0].bill_count, 1);
    }

    #[test]
    fn test_expense_filter_deserializes_with_defaults() {
        let filter: ExpenseReportFilter =
            serde_json::from_str(r#"{"max_amount": "500"}"#).unwrap();
        assert!(filter.categories.is_empty());
        assert_eq!(filter.max_amount, Some(dec!(500)));
        assert!(!filter.matches(&expense(date(2024, 3, 1), "Rent", dec!(501))));
    }

    #[test]
    fn test_monthly_summary_covers_every_month() {
        let bills = vec![
            expense(date(2024, 2, 29), "Rent", dec!(1200)),
            revenue(date(2024, 2, 1), "Sales", dec!(300)),
            expense(date(2024, 12, 31), "Rent", dec!(50)),
            expense(date(2025, 1, 1), "Rent", dec!(70)),
        ];

        let months = AggregationService::monthly_summary(&bills, 2024).unwrap();

        assert_eq!(months.len(), 12);
        assert_eq!(months[0].month_name, "January");
        assert_eq!(months[0].bill_count, 0);
        assert_eq!(months[1].total_amount, dec!(1500));
        assert_eq!(months[1].bill_count, 2);
        assert_eq!(months[11].month, 12);
        assert_eq!(months[11].total_amount, dec!(50));
    }

    #[test]
    fn test_monthly_summary_rejects_unrepresentable_year() {
        assert!(AggregationService::monthly_summary(&[], i32::MAX).is_err());
    }
}
