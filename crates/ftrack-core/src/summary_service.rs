//! Whole-list totals: summary, income/expense comparison, and monthly averages.

use ftrack_domain::{Transaction, TransactionKind, EXPENSE_COLOR, INCOME_COLOR};

use crate::monthly_service::MonthlyService;

/// Income, expenses and their difference over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransactionSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
}

impl TransactionSummary {
    pub fn new(total_income: f64, total_expenses: f64) -> Self {
        Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }
}

/// One labelled bar of the income-versus-expenses comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonBucket {
    pub name: String,
    pub amount: f64,
    pub color: &'static str,
}

/// Per-month averages over every month that has activity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AverageStats {
    pub avg_monthly_income: f64,
    pub avg_monthly_expenses: f64,
    /// Number of distinct months with at least one transaction.
    pub months: usize,
}

pub struct SummaryService;

impl SummaryService {
    pub fn summarize(transactions: &[Transaction]) -> TransactionSummary {
        TransactionSummary::new(
            Self::total_for(transactions, TransactionKind::Income),
            Self::total_for(transactions, TransactionKind::Expense),
        )
    }

    pub fn total_for(transactions: &[Transaction], kind: TransactionKind) -> f64 {
        transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn comparison(transactions: &[Transaction]) -> [ComparisonBucket; 2] {
        [
            ComparisonBucket {
                name: "Income".to_string(),
                amount: Self::total_for(transactions, TransactionKind::Income),
                color: INCOME_COLOR,
            },
            ComparisonBucket {
                name: "Expenses".to_string(),
                amount: Self::total_for(transactions, TransactionKind::Expense),
                color: EXPENSE_COLOR,
            },
        ]
    }

    /// Averages monthly sums over the distinct (year, month) buckets present.
    ///
    /// The denominator is at least 1, so an empty list yields zeros.
    pub fn averages(transactions: &[Transaction]) -> AverageStats {
        let series = MonthlyService::series(transactions);
        let months = series.len();
        let denominator = months.max(1) as f64;
        let income: f64 = series.iter().map(|bucket| bucket.income).sum();
        let expenses: f64 = series.iter().map(|bucket| bucket.expenses).sum();
        AverageStats {
            avg_monthly_income: income / denominator,
            avg_monthly_expenses: expenses / denominator,
            months,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use ftrack_domain::NewTransaction;

    fn txn(amount: f64, kind: TransactionKind, y: i32, m: u32, d: u32) -> Transaction {
        NewTransaction::new(
            amount,
            kind,
            "Other",
            "",
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
        .into_transaction(format!("{y}-{m}-{d}-{amount}"), Utc::now())
    }

    #[test]
    fn empty_list_summarizes_to_zero() {
        assert_eq!(
            SummaryService::summarize(&[]),
            TransactionSummary {
                total_income: 0.0,
                total_expenses: 0.0,
                balance: 0.0
            }
        );
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let list = vec![
            txn(50.0, TransactionKind::Expense, 2024, 1, 1),
            txn(20.0, TransactionKind::Income, 2024, 1, 2),
        ];
        let summary = SummaryService::summarize(&list);
        assert_eq!(summary.balance, summary.total_income - summary.total_expenses);
        assert_eq!(summary.balance, -30.0);
    }

    #[test]
    fn comparison_has_income_then_expenses() {
        let list = vec![
            txn(10.0, TransactionKind::Income, 2024, 1, 1),
            txn(4.0, TransactionKind::Expense, 2024, 1, 1),
        ];
        let [income, expenses] = SummaryService::comparison(&list);
        assert_eq!(income.name, "Income");
        assert_eq!(income.amount, 10.0);
        assert_eq!(expenses.name, "Expenses");
        assert_eq!(expenses.amount, 4.0);
        assert_eq!(expenses.color, EXPENSE_COLOR);
    }

    #[test]
    fn averages_divide_by_months_with_any_activity() {
        let list = vec![
            txn(900.0, TransactionKind::Income, 2024, 1, 3),
            txn(300.0, TransactionKind::Expense, 2024, 1, 9),
            txn(900.0, TransactionKind::Income, 2024, 2, 3),
            txn(900.0, TransactionKind::Income, 2024, 3, 3),
            txn(600.0, TransactionKind::Expense, 2024, 3, 20),
        ];
        let stats = SummaryService::averages(&list);
        assert_eq!(stats.months, 3);
        assert_eq!(stats.avg_monthly_expenses, 300.0);
        assert_eq!(stats.avg_monthly_income, 900.0);
    }

    #[test]
    fn averages_of_empty_list_are_zero() {
        let stats = SummaryService::averages(&[]);
        assert_eq!(stats.months, 0);
        assert_eq!(stats.avg_monthly_income, 0.0);
        assert_eq!(stats.avg_monthly_expenses, 0.0);
    }
}
