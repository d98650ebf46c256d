//! Calendar-month time series over transactions.

use std::collections::BTreeMap;

use ftrack_domain::{MonthKey, Transaction, TransactionKind};

/// Income and expense sums for one month bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotals {
    pub month: MonthKey,
    pub income: f64,
    pub expenses: f64,
}

impl MonthlyTotals {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            income: 0.0,
            expenses: 0.0,
        }
    }

    pub fn balance(&self) -> f64 {
        self.income - self.expenses
    }

    fn add(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => self.income += transaction.amount,
            TransactionKind::Expense => self.expenses += transaction.amount,
        }
    }
}

pub struct MonthlyService;

impl MonthlyService {
    /// Every month with activity, oldest first.
    pub fn series(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
        Self::bucket(transactions.iter())
    }

    /// The latest `count` months of the series, still oldest first.
    pub fn recent(transactions: &[Transaction], count: usize) -> Vec<MonthlyTotals> {
        let series = Self::series(transactions);
        let skip = series.len().saturating_sub(count);
        series.into_iter().skip(skip).collect()
    }

    /// Months of `year` that have activity, ordered January to December.
    pub fn for_year(transactions: &[Transaction], year: i32) -> Vec<MonthlyTotals> {
        Self::bucket(transactions.iter().filter(|txn| txn.month().year == year))
    }

    /// Totals for a single month; zero when the month has no transactions.
    pub fn totals_for(transactions: &[Transaction], month: MonthKey) -> MonthlyTotals {
        let mut totals = MonthlyTotals::empty(month);
        for transaction in transactions.iter().filter(|txn| month.contains(txn.date)) {
            totals.add(transaction);
        }
        totals
    }

    fn bucket<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Vec<MonthlyTotals> {
        let mut buckets: BTreeMap<MonthKey, MonthlyTotals> = BTreeMap::new();
        for transaction in transactions {
            let key = transaction.month();
            buckets
                .entry(key)
                .or_insert_with(|| MonthlyTotals::empty(key))
                .add(transaction);
        }
        buckets.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use ftrack_domain::NewTransaction;

    fn txn(amount: f64, kind: TransactionKind, y: i32, m: u32) -> Transaction {
        NewTransaction::new(amount, kind, "Other", "", NaiveDate::from_ymd_opt(y, m, 15).unwrap())
            .into_transaction(format!("{y}{m}{amount}"), Utc::now())
    }

    fn months(series: &[MonthlyTotals]) -> Vec<(i32, u32)> {
        series.iter().map(|b| (b.month.year, b.month.month)).collect()
    }

    #[test]
    fn series_is_chronological_regardless_of_input_order() {
        let list = vec![
            txn(1.0, TransactionKind::Expense, 2024, 3),
            txn(1.0, TransactionKind::Expense, 2023, 11),
            txn(1.0, TransactionKind::Income, 2024, 1),
        ];
        assert_eq!(
            months(&MonthlyService::series(&list)),
            vec![(2023, 11), (2024, 1), (2024, 3)]
        );
    }

    #[test]
    fn buckets_accumulate_income_and_expenses() {
        let list = vec![
            txn(100.0, TransactionKind::Income, 2024, 5),
            txn(30.0, TransactionKind::Expense, 2024, 5),
            txn(20.0, TransactionKind::Expense, 2024, 5),
        ];
        let series = MonthlyService::series(&list);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].income, 100.0);
        assert_eq!(series[0].expenses, 50.0);
        assert_eq!(series[0].balance(), 50.0);
    }

    #[test]
    fn recent_keeps_latest_months() {
        let list: Vec<Transaction> = (1..=8)
            .map(|m| txn(m as f64, TransactionKind::Expense, 2024, m))
            .collect();
        let recent = MonthlyService::recent(&list, 6);
        assert_eq!(recent.len(), 6);
        assert_eq!(recent.first().unwrap().month, MonthKey::new(2024, 3));
        assert_eq!(recent.last().unwrap().month, MonthKey::new(2024, 8));
        assert_eq!(MonthlyService::recent(&list[..2], 6).len(), 2);
    }

    #[test]
    fn for_year_filters_and_orders_by_month() {
        let list = vec![
            txn(1.0, TransactionKind::Expense, 2024, 12),
            txn(1.0, TransactionKind::Expense, 2023, 6),
            txn(1.0, TransactionKind::Expense, 2024, 2),
        ];
        assert_eq!(
            months(&MonthlyService::for_year(&list, 2024)),
            vec![(2024, 2), (2024, 12)]
        );
    }

    #[test]
    fn totals_for_missing_month_are_zero() {
        let list = vec![txn(5.0, TransactionKind::Income, 2024, 1)];
        let totals = MonthlyService::totals_for(&list, MonthKey::new(2024, 2));
        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expenses, 0.0);
    }
}
