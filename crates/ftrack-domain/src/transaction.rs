//! Domain models for income and expense transactions.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::*;

/// A single income or expense record.
///
/// `amount` is never negative; the direction of money is carried by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {} [{}]", self.date, self.description, self.category)
    }
}

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// User-supplied transaction fields, before the store assigns `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            kind,
            category: category.into(),
            description: description.into(),
            date,
        }
    }

    pub fn into_transaction(self, id: String, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            description: self.description,
            date: self.date,
            created_at,
        }
    }
}

/// Partial update merged into an existing transaction. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<f64>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }

    pub fn apply(self, transaction: &mut Transaction) {
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(kind) = self.kind {
            transaction.kind = kind;
        }
        if let Some(category) = self.category {
            transaction.category = category;
        }
        if let Some(description) = self.description {
            transaction.description = description;
        }
        if let Some(date) = self.date {
            transaction.date = date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Transaction {
        NewTransaction::new(
            1200.0,
            TransactionKind::Income,
            "Salary",
            "Paycheck",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .into_transaction(
            "txn-1".into(),
            Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["date"], "2024-01-05");
        assert_eq!(json["amount"], 1200.0);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn deserializes_browser_style_timestamps() {
        let raw = r#"{
            "id": "abc",
            "amount": 300,
            "type": "expense",
            "category": "Food & Dining",
            "description": "Groceries",
            "date": "2024-01-10",
            "createdAt": "2024-01-10T12:00:00.000Z"
        }"#;
        let txn: Transaction = serde_json::from_str(raw).unwrap();
        assert!(txn.is_expense());
        assert_eq!(txn.amount, 300.0);
        assert_eq!(txn.month(), MonthKey::new(2024, 1));
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut txn = sample();
        let patch = TransactionPatch {
            amount: Some(1500.0),
            description: Some("Bonus".into()),
            ..TransactionPatch::default()
        };
        patch.apply(&mut txn);
        assert_eq!(txn.amount, 1500.0);
        assert_eq!(txn.description, "Bonus");
        assert_eq!(txn.category, "Salary");
        assert_eq!(txn.kind, TransactionKind::Income);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(TransactionKind::parse("Income"), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse(" EXPENSE "), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse("transfer"), None);
    }
}
