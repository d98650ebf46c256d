//! The single owner of transaction and savings-goal records.

use ftrack_domain::{
    new_record_id, Identifiable, NewSavingsGoal, NewTransaction, SavingsContribution,
    SavingsGoal, SavingsGoalPatch, Transaction, TransactionPatch,
};
use tracing::{error, info};

use crate::{
    persistence::{PersistenceBridge, Snapshot},
    storage::KeyValueStore,
    summary_service::{SummaryService, TransactionSummary},
    time::Clock,
    CoreError,
};

/// Outcome of the initial load, for callers that want to report it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub transactions: usize,
    pub savings_goals: usize,
    pub dark_mode: bool,
    pub warnings: Vec<String>,
}

/// Result of resolving a user-typed id or id prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdMatch {
    Unique(String),
    Ambiguous(usize),
    Missing,
}

/// Holds the canonical record lists and applies every mutation to them.
///
/// New records are prepended, so both lists stay most-recent-first. Mutations save
/// the affected collection through the [`PersistenceBridge`] once [`RecordStore::load`]
/// has run; before that the store is in its loading phase and writes nothing.
pub struct RecordStore {
    transactions: Vec<Transaction>,
    savings_goals: Vec<SavingsGoal>,
    dark_mode: bool,
    loading: bool,
    bridge: PersistenceBridge,
    clock: Box<dyn Clock>,
    last_save_error: Option<CoreError>,
}

impl RecordStore {
    pub fn new(storage: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        Self {
            transactions: Vec::new(),
            savings_goals: Vec::new(),
            dark_mode: false,
            loading: true,
            bridge: PersistenceBridge::new(storage),
            clock,
            last_save_error: None,
        }
    }

    /// Replaces in-memory state with what storage holds and ends the loading phase.
    pub fn load(&mut self) -> LoadReport {
        let Snapshot {
            transactions,
            savings_goals,
            dark_mode,
            warnings,
        } = self.bridge.load_snapshot();
        self.transactions = transactions;
        self.savings_goals = savings_goals;
        self.dark_mode = dark_mode;
        self.loading = false;
        info!(
            transactions = self.transactions.len(),
            savings_goals = self.savings_goals.len(),
            "records loaded"
        );
        LoadReport {
            transactions: self.transactions.len(),
            savings_goals: self.savings_goals.len(),
            dark_mode,
            warnings,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn bridge(&self) -> &PersistenceBridge {
        &self.bridge
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn savings_goals(&self) -> &[SavingsGoal] {
        &self.savings_goals
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn savings_goal(&self, id: &str) -> Option<&SavingsGoal> {
        self.savings_goals.iter().find(|goal| goal.id == id)
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Totals over the current transaction list, recomputed on every call.
    pub fn summary(&self) -> TransactionSummary {
        SummaryService::summarize(&self.transactions)
    }

    /// Returns and clears the most recent save failure, if any.
    pub fn take_save_error(&mut self) -> Option<CoreError> {
        self.last_save_error.take()
    }

    pub fn add_transaction(&mut self, data: NewTransaction) -> String {
        let id = new_record_id();
        let transaction = data.into_transaction(id.clone(), self.clock.now());
        self.transactions.insert(0, transaction);
        self.persist_transactions();
        id
    }

    /// Merges `patch` into the matching transaction. Returns `false` when `id` is unknown.
    pub fn update_transaction(&mut self, id: &str, patch: TransactionPatch) -> bool {
        let Some(transaction) = self.transactions.iter_mut().find(|txn| txn.id == id) else {
            return false;
        };
        patch.apply(transaction);
        self.persist_transactions();
        true
    }

    /// Removes the matching transaction. Returns `false` when `id` is unknown.
    pub fn delete_transaction(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            self.persist_transactions();
        }
        removed
    }

    pub fn add_savings_goal(&mut self, data: NewSavingsGoal) -> String {
        let id = new_record_id();
        let goal = data.into_goal(id.clone(), self.clock.now());
        self.savings_goals.insert(0, goal);
        self.persist_savings_goals();
        id
    }

    pub fn update_savings_goal(&mut self, id: &str, patch: SavingsGoalPatch) -> bool {
        let Some(goal) = self.savings_goals.iter_mut().find(|goal| goal.id == id) else {
            return false;
        };
        patch.apply(goal);
        self.persist_savings_goals();
        true
    }

    pub fn delete_savings_goal(&mut self, id: &str) -> bool {
        let before = self.savings_goals.len();
        self.savings_goals.retain(|goal| goal.id != id);
        let removed = self.savings_goals.len() != before;
        if removed {
            self.persist_savings_goals();
        }
        removed
    }

    /// Appends a contribution to the goal and recomputes its progress.
    ///
    /// Returns the new contribution id, or `None` when `goal_id` is unknown. The amount
    /// is taken as given; callers reject non-positive values.
    pub fn add_contribution(&mut self, goal_id: &str, amount: f64) -> Option<String> {
        let now = self.clock.now();
        let goal = self
            .savings_goals
            .iter_mut()
            .find(|goal| goal.id == goal_id)?;
        let id = new_record_id();
        goal.append_contribution(SavingsContribution::new(id.clone(), amount, now));
        self.persist_savings_goals();
        Some(id)
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.set_dark_mode(!self.dark_mode);
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
        if self.loading {
            return;
        }
        let result = self.bridge.save_dark_mode(enabled);
        self.record_save(result);
    }

    pub fn find_transaction_id(&self, prefix: &str) -> IdMatch {
        match_id_prefix(&self.transactions, prefix)
    }

    pub fn find_savings_goal_id(&self, prefix: &str) -> IdMatch {
        match_id_prefix(&self.savings_goals, prefix)
    }

    fn persist_transactions(&mut self) {
        if self.loading {
            return;
        }
        let result = self.bridge.save_transactions(&self.transactions);
        self.record_save(result);
    }

    fn persist_savings_goals(&mut self) {
        if self.loading {
            return;
        }
        let result = self.bridge.save_savings_goals(&self.savings_goals);
        self.record_save(result);
    }

    fn record_save(&mut self, result: Result<(), CoreError>) {
        if let Err(err) = result {
            error!(error = %err, "failed to save records");
            self.last_save_error = Some(err);
        }
    }
}

/// Resolves an exact id, or else a unique id prefix, within `records`.
pub fn match_id_prefix<T: Identifiable>(records: &[T], prefix: &str) -> IdMatch {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return IdMatch::Missing;
    }
    if let Some(exact) = records.iter().find(|record| record.id() == prefix) {
        return IdMatch::Unique(exact.id().to_string());
    }
    let matches: Vec<&T> = records
        .iter()
        .filter(|record| record.id().starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [] => IdMatch::Missing,
        [single] => IdMatch::Unique(single.id().to_string()),
        many => IdMatch::Ambiguous(many.len()),
    }
}
