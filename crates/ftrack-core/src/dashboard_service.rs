//! Landing-page view: this month against last month, recent activity and charts.

use chrono::NaiveDate;
use ftrack_domain::{MonthKey, Transaction, TransactionKind};

use crate::category_service::{CategoryService, CategoryTotal};
use crate::monthly_service::{MonthlyService, MonthlyTotals};
use crate::summary_service::{ComparisonBucket, SummaryService};

/// How many items each dashboard section shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLimits {
    pub months: usize,
    pub recent: usize,
    pub top_categories: usize,
}

impl Default for DashboardLimits {
    fn default() -> Self {
        Self {
            months: 6,
            recent: 5,
            top_categories: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub month: MonthKey,
    pub this_month: MonthlyTotals,
    pub last_month_expenses: f64,
    /// Percentage change of expenses against the previous month; zero when
    /// the previous month had no expenses.
    pub expense_change: f64,
    pub recent: Vec<Transaction>,
    pub monthly: Vec<MonthlyTotals>,
    pub top_expenses: Vec<CategoryTotal>,
    pub comparison: [ComparisonBucket; 2],
}

impl Dashboard {
    pub fn net(&self) -> f64 {
        self.this_month.balance()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuickStats {
    pub total: usize,
    pub this_month: usize,
    pub categories: usize,
}

pub struct DashboardService;

impl DashboardService {
    pub fn build(transactions: &[Transaction], today: NaiveDate, limits: DashboardLimits) -> Dashboard {
        let month = MonthKey::from_date(today);
        let this_month = MonthlyService::totals_for(transactions, month);
        let last_month_expenses = MonthlyService::totals_for(transactions, month.previous()).expenses;

        Dashboard {
            month,
            this_month,
            last_month_expenses,
            expense_change: Self::expense_change(this_month.expenses, last_month_expenses),
            recent: Self::recent(transactions, limits.recent),
            monthly: MonthlyService::recent(transactions, limits.months),
            top_expenses: CategoryService::top(
                transactions,
                TransactionKind::Expense,
                limits.top_categories,
            ),
            comparison: SummaryService::comparison(transactions),
        }
    }

    pub fn expense_change(this_month: f64, last_month: f64) -> f64 {
        if last_month > 0.0 {
            (this_month - last_month) / last_month * 100.0
        } else {
            0.0
        }
    }

    /// Latest `count` transactions by date, newest first. Same-day entries keep list order.
    pub fn recent(transactions: &[Transaction], count: usize) -> Vec<Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.into_iter().take(count).cloned().collect()
    }

    pub fn quick_stats(transactions: &[Transaction], today: NaiveDate) -> QuickStats {
        let month = MonthKey::from_date(today);
        QuickStats {
            total: transactions.len(),
            this_month: transactions
                .iter()
                .filter(|txn| month.contains(txn.date))
                .count(),
            categories: CategoryService::distinct_count(transactions),
        }
    }
}
