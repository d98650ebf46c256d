//! Shared traits, identifiers, and calendar-month utilities for tracker records.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes the opaque identifier of a stored record.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Generates a fresh opaque record identifier.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar month bucket (year + month) used for every time-series grouping.
///
/// Ordering is chronological: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month index.
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }

    /// Abbreviated month name, e.g. `Jan`.
    pub fn short_month_name(&self) -> &'static str {
        &self.month_name()[..3]
    }

    /// Label in the form `Jan 2024`.
    pub fn short_label(&self) -> String {
        format!("{} {}", self.short_month_name(), self.year)
    }

    /// Label in the form `January 2024`.
    pub fn long_label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_keys_order_chronologically() {
        let mut keys = vec![
            MonthKey::new(2024, 3),
            MonthKey::new(2023, 12),
            MonthKey::new(2024, 1),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                MonthKey::new(2023, 12),
                MonthKey::new(2024, 1),
                MonthKey::new(2024, 3)
            ]
        );
    }

    #[test]
    fn previous_wraps_across_years() {
        assert_eq!(MonthKey::new(2024, 1).previous(), MonthKey::new(2023, 12));
        assert_eq!(MonthKey::new(2024, 7).previous(), MonthKey::new(2024, 6));
    }

    #[test]
    fn labels_use_month_names() {
        let key = MonthKey::from_date(NaiveDate::from_ymd_opt(2024, 9, 14).unwrap());
        assert_eq!(key.short_label(), "Sep 2024");
        assert_eq!(key.long_label(), "September 2024");
        assert_eq!(key.to_string(), "2024-09");
    }

    #[test]
    fn record_ids_are_unique() {
        assert_ne!(new_record_id(), new_record_id());
    }
}
