//! CSV export of the transaction list and the monthly report.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use chrono::NaiveDate;
use ftrack_config::DateStyle;
use ftrack_core::MonthlyTotals;
use ftrack_domain::Transaction;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::currency::format_date;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No data to export: {0}")]
    NoData(&'static str),
}

#[derive(Serialize)]
struct TransactionRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

#[derive(Serialize)]
struct MonthlyRow {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Income")]
    income: String,
    #[serde(rename = "Expenses")]
    expenses: String,
    #[serde(rename = "Balance")]
    balance: String,
}

/// `finance-tracker-YYYY-MM-DD.csv`
pub fn transactions_file_name(today: NaiveDate) -> String {
    format!("finance-tracker-{}.csv", today.format("%Y-%m-%d"))
}

/// `monthly-report-YYYY.csv`
pub fn monthly_report_file_name(year: i32) -> String {
    format!("monthly-report-{}.csv", year)
}

/// Writes `Date,Type,Category,Description,Amount` rows in list order.
pub fn write_transactions_csv<W: Write>(
    writer: W,
    transactions: &[Transaction],
    style: DateStyle,
) -> Result<usize, ExportError> {
    if transactions.is_empty() {
        return Err(ExportError::NoData("no transactions recorded"));
    }
    let mut csv_writer = csv::Writer::from_writer(writer);
    for transaction in transactions {
        csv_writer.serialize(TransactionRow {
            date: format_date(style, transaction.date),
            kind: transaction.kind.to_string(),
            category: &transaction.category,
            description: &transaction.description,
            amount: format!("{:.2}", transaction.amount),
        })?;
    }
    csv_writer.flush()?;
    Ok(transactions.len())
}

/// Writes `Month,Income,Expenses,Balance` rows, oldest month first.
pub fn write_monthly_csv<W: Write>(writer: W, months: &[MonthlyTotals]) -> Result<usize, ExportError> {
    if months.is_empty() {
        return Err(ExportError::NoData("no monthly totals for the selected period"));
    }
    let mut ordered: Vec<&MonthlyTotals> = months.iter().collect();
    ordered.sort_by_key(|totals| totals.month);

    let mut csv_writer = csv::Writer::from_writer(writer);
    for totals in ordered {
        csv_writer.serialize(MonthlyRow {
            month: totals.month.long_label(),
            income: format!("{:.2}", totals.income),
            expenses: format!("{:.2}", totals.expenses),
            balance: format!("{:.2}", totals.balance()),
        })?;
    }
    csv_writer.flush()?;
    Ok(months.len())
}

pub fn export_transactions(
    path: &Path,
    transactions: &[Transaction],
    style: DateStyle,
) -> Result<usize, ExportError> {
    let mut buffer = Vec::new();
    let rows = write_transactions_csv(&mut buffer, transactions, style)?;
    write_file(path, &buffer)?;
    info!(path = %path.display(), rows, "exported transactions");
    Ok(rows)
}

pub fn export_monthly_report(path: &Path, months: &[MonthlyTotals]) -> Result<usize, ExportError> {
    let mut buffer = Vec::new();
    let rows = write_monthly_csv(&mut buffer, months)?;
    write_file(path, &buffer)?;
    info!(path = %path.display(), rows, "exported monthly report");
    Ok(rows)
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ftrack_domain::{MonthKey, NewTransaction, TransactionKind};

    fn groceries() -> Transaction {
        NewTransaction::new(
            45.5,
            TransactionKind::Expense,
            "Food & Dining",
            "Groceries, weekly",
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        )
        .into_transaction("t1".into(), Utc::now())
    }

    #[test]
    fn transactions_csv_has_header_and_locale_dates() {
        let mut out = Vec::new();
        write_transactions_csv(&mut out, &[groceries()], DateStyle::UnitedStates).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Date,Type,Category,Description,Amount"));
        assert_eq!(
            lines.next(),
            Some("3/7/2024,Expense,Food & Dining,\"Groceries, weekly\",45.50")
        );
    }

    #[test]
    fn empty_export_is_rejected() {
        let err = write_transactions_csv(Vec::new(), &[], DateStyle::Iso).unwrap_err();
        assert!(matches!(err, ExportError::NoData(_)));
    }

    #[test]
    fn monthly_csv_is_chronological() {
        let months = vec![
            MonthlyTotals {
                month: MonthKey::new(2024, 2),
                income: 100.0,
                expenses: 150.25,
            },
            MonthlyTotals {
                month: MonthKey::new(2024, 1),
                income: 3000.0,
                expenses: 1000.0,
            },
        ];
        let mut out = Vec::new();
        write_monthly_csv(&mut out, &months).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Month,Income,Expenses,Balance",
                "January 2024,3000.00,1000.00,2000.00",
                "February 2024,100.00,150.25,-50.25",
            ]
        );
    }

    #[test]
    fn default_file_names() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(transactions_file_name(today), "finance-tracker-2024-09-01.csv");
        assert_eq!(monthly_report_file_name(2024), "monthly-report-2024.csv");
    }
}
