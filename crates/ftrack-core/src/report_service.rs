//! Year-scoped report: totals, leading expense categories and the monthly slice.

use std::collections::BTreeSet;

use ftrack_domain::{Transaction, TransactionKind};

use crate::category_service::{CategoryService, CategoryTotal};
use crate::monthly_service::{MonthlyService, MonthlyTotals};
use crate::summary_service::{SummaryService, TransactionSummary};

#[derive(Debug, Clone, PartialEq)]
pub struct YearReport {
    pub year: i32,
    pub summary: TransactionSummary,
    pub top_expenses: Vec<CategoryTotal>,
    /// Months of the year with activity, January first.
    pub months: Vec<MonthlyTotals>,
    pub transaction_count: usize,
}

pub struct ReportService;

impl ReportService {
    /// Years that have at least one transaction, newest first.
    pub fn available_years(transactions: &[Transaction]) -> Vec<i32> {
        let years: BTreeSet<i32> = transactions.iter().map(|txn| txn.month().year).collect();
        years.into_iter().rev().collect()
    }

    pub fn year_report(transactions: &[Transaction], year: i32, top: usize) -> YearReport {
        let scoped: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| txn.month().year == year)
            .cloned()
            .collect();
        YearReport {
            year,
            summary: SummaryService::summarize(&scoped),
            top_expenses: CategoryService::top(&scoped, TransactionKind::Expense, top),
            months: MonthlyService::for_year(&scoped, year),
            transaction_count: scoped.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use ftrack_domain::NewTransaction;

    fn txn(amount: f64, kind: TransactionKind, category: &str, y: i32, m: u32) -> Transaction {
        NewTransaction::new(amount, kind, category, "", NaiveDate::from_ymd_opt(y, m, 10).unwrap())
            .into_transaction(format!("{category}{y}{m}"), Utc::now())
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(2000.0, TransactionKind::Income, "Salary", 2024, 2),
            txn(400.0, TransactionKind::Expense, "Rent", 2024, 11),
            txn(120.0, TransactionKind::Expense, "Travel", 2024, 2),
            txn(999.0, TransactionKind::Expense, "Rent", 2023, 7),
            txn(50.0, TransactionKind::Expense, "Other", 2022, 1),
        ]
    }

    #[test]
    fn available_years_are_descending_and_unique() {
        assert_eq!(ReportService::available_years(&sample()), vec![2024, 2023, 2022]);
        assert!(ReportService::available_years(&[]).is_empty());
    }

    #[test]
    fn year_report_only_counts_selected_year() {
        let report = ReportService::year_report(&sample(), 2024, 5);
        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.summary.total_income, 2000.0);
        assert_eq!(report.summary.total_expenses, 520.0);
        assert_eq!(report.top_expenses[0].name, "Rent");
        assert_eq!(report.top_expenses[0].value, 400.0);
        let months: Vec<u32> = report.months.iter().map(|m| m.month.month).collect();
        assert_eq!(months, vec![2, 11]);
    }

    #[test]
    fn year_without_data_is_empty() {
        let report = ReportService::year_report(&sample(), 2030, 5);
        assert_eq!(report.transaction_count, 0);
        assert_eq!(report.summary, TransactionSummary::default());
        assert!(report.months.is_empty());
    }
}
