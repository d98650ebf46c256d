//! Per-category totals for chart and top-N views.

use std::collections::HashSet;

use ftrack_domain::{category_color, Transaction, TransactionKind};

/// Summed amount for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

pub struct CategoryService;

impl CategoryService {
    /// Groups transactions of `kind` by category, largest total first.
    ///
    /// Categories with equal totals keep the order in which they were first seen.
    pub fn breakdown(transactions: &[Transaction], kind: TransactionKind) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for transaction in transactions.iter().filter(|txn| txn.kind == kind) {
            match totals
                .iter_mut()
                .find(|entry| entry.name == transaction.category)
            {
                Some(entry) => entry.value += transaction.amount,
                None => totals.push(CategoryTotal {
                    name: transaction.category.clone(),
                    value: transaction.amount,
                    color: category_color(&transaction.category),
                }),
            }
        }
        totals.sort_by(|a, b| b.value.total_cmp(&a.value));
        totals
    }

    pub fn top(
        transactions: &[Transaction],
        kind: TransactionKind,
        count: usize,
    ) -> Vec<CategoryTotal> {
        let mut totals = Self::breakdown(transactions, kind);
        totals.truncate(count);
        totals
    }

    /// Number of distinct category names across all transactions.
    pub fn distinct_count(transactions: &[Transaction]) -> usize {
        transactions
            .iter()
            .map(|txn| txn.category.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use ftrack_domain::{NewTransaction, DEFAULT_CATEGORY_COLOR};

    fn expense(category: &str, amount: f64) -> Transaction {
        NewTransaction::new(
            amount,
            TransactionKind::Expense,
            category,
            "",
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        )
        .into_transaction(format!("{category}-{amount}"), Utc::now())
    }

    fn names(totals: &[CategoryTotal]) -> Vec<&str> {
        totals.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn breakdown_sorts_descending_with_stable_ties() {
        let list = vec![
            expense("Rent", 50.0),
            expense("Travel", 80.0),
            expense("Shopping", 30.0),
            expense("Rent", 30.0),
            expense("Healthcare", 80.0),
        ];
        let totals = CategoryService::breakdown(&list, TransactionKind::Expense);
        assert_eq!(names(&totals), vec!["Travel", "Rent", "Healthcare", "Shopping"]);
        assert_eq!(totals[1].value, 80.0);
    }

    #[test]
    fn breakdown_ignores_other_kind_and_colors_unknowns() {
        let mut list = vec![expense("Crypto", 10.0)];
        list.push(
            NewTransaction::new(
                99.0,
                TransactionKind::Income,
                "Salary",
                "",
                NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            )
            .into_transaction("inc".into(), Utc::now()),
        );
        let totals = CategoryService::breakdown(&list, TransactionKind::Expense);
        assert_eq!(names(&totals), vec!["Crypto"]);
        assert_eq!(totals[0].color, DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn top_truncates_to_requested_count() {
        let list: Vec<Transaction> = (0..8)
            .map(|i| expense(&format!("Cat{i}"), f64::from(i)))
            .collect();
        let top = CategoryService::top(&list, TransactionKind::Expense, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].name, "Cat7");
    }

    #[test]
    fn distinct_count_spans_both_kinds() {
        let list = vec![expense("Rent", 1.0), expense("Rent", 2.0), expense("Other", 3.0)];
        assert_eq!(CategoryService::distinct_count(&list), 2);
    }
}
