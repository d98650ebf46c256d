//! Boundary checks applied to shell input before anything reaches the record store.

use chrono::NaiveDate;
use ftrack_domain::{canonical_category, categories_for, TransactionKind};

use crate::cli::core::{invalid, CommandError};

/// Largest amount a single entry may carry; keeps every total finite once summed.
pub(crate) const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Positive amount rounded to cents, at most [`MAX_AMOUNT`]. Accepts `$` and `,` grouping.
pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '$' | ','))
        .collect();
    let value: f64 = cleaned
        .parse()
        .map_err(|_| invalid(format!("`{}` is not a valid amount", raw)))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("amount must be greater than zero"));
    }
    if value > MAX_AMOUNT {
        return Err(invalid("amount must not exceed 1,000,000,000,000"));
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded <= 0.0 {
        return Err(invalid("amount must be at least 0.01"));
    }
    Ok(rounded)
}

pub(crate) fn parse_kind(raw: &str) -> Result<TransactionKind, CommandError> {
    TransactionKind::parse(raw)
        .ok_or_else(|| invalid(format!("unknown type `{}` (use income or expense)", raw)))
}

/// Resolves `raw` against the fixed category list of `kind`, ignoring case.
pub(crate) fn parse_category(kind: TransactionKind, raw: &str) -> Result<&'static str, CommandError> {
    canonical_category(kind, raw).ok_or_else(|| {
        invalid(format!(
            "`{}` is not an {} category; choose one of: {}",
            raw.trim(),
            kind.as_str(),
            categories_for(kind).join(", ")
        ))
    })
}

/// `YYYY-MM-DD`, or `today`.
pub(crate) fn parse_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, CommandError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| invalid(format!("invalid date `{}` (use YYYY-MM-DD)", raw)))
}

pub(crate) fn parse_months(raw: &str) -> Result<u32, CommandError> {
    match raw.trim().parse::<u32>() {
        Ok(months) if months >= 1 => Ok(months),
        _ => Err(invalid("target months must be a whole number of at least 1")),
    }
}

pub(crate) fn parse_goal_name(raw: &str) -> Result<String, CommandError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(invalid("goal name cannot be empty"));
    }
    Ok(name.to_string())
}

pub(crate) fn parse_year(raw: &str) -> Result<i32, CommandError> {
    match raw.trim().parse::<i32>() {
        Ok(year) if (1900..=9999).contains(&year) => Ok(year),
        _ => Err(invalid(format!("invalid year `{}`", raw))),
    }
}

pub(crate) fn parse_count(raw: &str, label: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(invalid(format!("{} must be a positive whole number", label))),
    }
}
