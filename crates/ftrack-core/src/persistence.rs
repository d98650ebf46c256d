//! Loading and saving record collections through a [`KeyValueStore`].
//!
//! Three independent keys are used: transactions, savings goals, and the dark-mode
//! flag. A blob that cannot be decoded loads as an empty collection.

use ftrack_domain::{SavingsGoal, Transaction};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{storage::KeyValueStore, CoreError};

pub const TRANSACTIONS_KEY: &str = "finance-tracker-transactions";
pub const SAVINGS_GOALS_KEY: &str = "finance-tracker-savings-goals";
pub const DARK_MODE_KEY: &str = "finance-tracker-dark-mode";

/// Every key the tracker persists, in load order.
pub const PERSISTED_KEYS: [&str; 3] = [TRANSACTIONS_KEY, SAVINGS_GOALS_KEY, DARK_MODE_KEY];

/// State recovered from storage at session start.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub savings_goals: Vec<SavingsGoal>,
    pub dark_mode: bool,
    /// Human-readable notes about blobs that were discarded while loading.
    pub warnings: Vec<String>,
}

/// Serializes a record list into the persisted JSON array format.
pub fn encode_records<T: Serialize>(records: &[T]) -> Result<String, CoreError> {
    Ok(serde_json::to_string(records)?)
}

/// Parses a persisted JSON array.
pub fn decode_records<T: DeserializeOwned>(blob: &str) -> Result<Vec<T>, CoreError> {
    Ok(serde_json::from_str(blob)?)
}

/// The only component that talks to the key-value substrate.
pub struct PersistenceBridge {
    storage: Box<dyn KeyValueStore>,
}

impl PersistenceBridge {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Reads all three keys. Never fails: unreadable entries fall back to defaults.
    pub fn load_snapshot(&self) -> Snapshot {
        let mut warnings = Vec::new();
        let transactions = self.load_list(TRANSACTIONS_KEY, &mut warnings);
        let savings_goals = self.load_list(SAVINGS_GOALS_KEY, &mut warnings);
        let dark_mode = self.load_dark_mode(&mut warnings);
        Snapshot {
            transactions,
            savings_goals,
            dark_mode,
            warnings,
        }
    }

    pub fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        self.save_list(TRANSACTIONS_KEY, transactions)
    }

    pub fn save_savings_goals(&self, goals: &[SavingsGoal]) -> Result<(), CoreError> {
        self.save_list(SAVINGS_GOALS_KEY, goals)
    }

    pub fn save_dark_mode(&self, enabled: bool) -> Result<(), CoreError> {
        let value = if enabled { "true" } else { "false" };
        self.storage.save(DARK_MODE_KEY, value)
    }

    fn save_list<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), CoreError> {
        let blob = encode_records(records)?;
        self.storage.save(key, &blob)?;
        debug!(key, count = records.len(), "saved records");
        Ok(())
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str, warnings: &mut Vec<String>) -> Vec<T> {
        let blob = match self.storage.load(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key, error = %err, "failed to read stored records; starting empty");
                warnings.push(format!("{key}: unreadable ({err})"));
                return Vec::new();
            }
        };
        match decode_records(&blob) {
            Ok(records) => records,
            Err(err) => {
                warn!(key, error = %err, "discarding malformed stored records");
                warnings.push(format!("{key}: malformed data discarded ({err})"));
                Vec::new()
            }
        }
    }

    fn load_dark_mode(&self, warnings: &mut Vec<String>) -> bool {
        match self.storage.load(DARK_MODE_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!(key = DARK_MODE_KEY, error = %err, "failed to read dark mode flag");
                warnings.push(format!("{DARK_MODE_KEY}: unreadable ({err})"));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::{NaiveDate, TimeZone, Utc};
    use ftrack_domain::{NewSavingsGoal, NewTransaction, SavingsContribution, TransactionKind};

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            NewTransaction::new(
                300.0,
                TransactionKind::Expense,
                "Food & Dining",
                "Groceries",
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            )
            .into_transaction("t2".into(), Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap()),
            NewTransaction::new(
                1200.0,
                TransactionKind::Income,
                "Salary",
                "Paycheck",
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            )
            .into_transaction("t1".into(), Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap()),
        ]
    }

    #[test]
    fn transactions_round_trip_by_value() {
        let store = MemoryStore::new();
        let bridge = PersistenceBridge::new(Box::new(store.clone()));
        let records = sample_transactions();

        bridge.save_transactions(&records).unwrap();
        let snapshot = bridge.load_snapshot();

        assert_eq!(snapshot.transactions, records);
        assert!(snapshot.warnings.is_empty());
    }

    #[test]
    fn goals_round_trip_with_contributions() {
        let store = MemoryStore::new();
        let bridge = PersistenceBridge::new(Box::new(store));
        let created = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let mut goal = NewSavingsGoal::new("Laptop", 1200.0, 6).into_goal("g1".into(), created);
        goal.append_contribution(SavingsContribution::new("c1".into(), 200.0, created));

        bridge.save_savings_goals(&[goal.clone()]).unwrap();
        let snapshot = bridge.load_snapshot();

        assert_eq!(snapshot.savings_goals, vec![goal]);
    }

    #[test]
    fn malformed_blob_loads_as_empty_with_warning() {
        let store = MemoryStore::new()
            .with_entry(TRANSACTIONS_KEY, "{not json")
            .with_entry(SAVINGS_GOALS_KEY, r#"[{"id": 1}]"#);
        let bridge = PersistenceBridge::new(Box::new(store));

        let snapshot = bridge.load_snapshot();

        assert!(snapshot.transactions.is_empty());
        assert!(snapshot.savings_goals.is_empty());
        assert_eq!(snapshot.warnings.len(), 2);
    }

    #[test]
    fn dark_mode_reads_only_literal_true() {
        let on = PersistenceBridge::new(Box::new(
            MemoryStore::new().with_entry(DARK_MODE_KEY, "true"),
        ));
        let odd = PersistenceBridge::new(Box::new(
            MemoryStore::new().with_entry(DARK_MODE_KEY, "yes"),
        ));
        assert!(on.load_snapshot().dark_mode);
        assert!(!odd.load_snapshot().dark_mode);
    }

    #[test]
    fn dark_mode_is_saved_as_literal_string() {
        let store = MemoryStore::new();
        let bridge = PersistenceBridge::new(Box::new(store.clone()));
        bridge.save_dark_mode(true).unwrap();
        assert_eq!(store.get(DARK_MODE_KEY).as_deref(), Some("true"));
        bridge.save_dark_mode(false).unwrap();
        assert_eq!(store.get(DARK_MODE_KEY).as_deref(), Some("false"));
    }
}
