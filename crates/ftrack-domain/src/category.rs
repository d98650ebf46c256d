//! Fixed category lists and the colour palette used for category charts.
//!
//! Records store categories as free-form strings; these lists are the vocabulary the
//! input layer validates against.

use crate::transaction::TransactionKind;

pub const EXPENSE_CATEGORIES: [&str; 11] = [
    "Food & Dining",
    "Rent",
    "Bills & Utilities",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Travel",
    "Healthcare",
    "Education",
    "Personal Care",
    "Other",
];

pub const INCOME_CATEGORIES: [&str; 7] = [
    "Salary",
    "Business",
    "Freelance",
    "Investment",
    "Rental",
    "Gifts",
    "Other",
];

pub const DEFAULT_CATEGORY_COLOR: &str = "#6B7280";
pub const INCOME_COLOR: &str = "#10B981";
pub const EXPENSE_COLOR: &str = "#EF4444";

const CATEGORY_COLORS: [(&str, &str); 17] = [
    ("Food & Dining", "#EF4444"),
    ("Rent", "#8B5CF6"),
    ("Bills & Utilities", "#10B981"),
    ("Transportation", "#3B82F6"),
    ("Shopping", "#F59E0B"),
    ("Entertainment", "#F59E0B"),
    ("Travel", "#06B6D4"),
    ("Healthcare", "#EC4899"),
    ("Education", "#84CC16"),
    ("Personal Care", "#F97316"),
    ("Other", "#6B7280"),
    ("Salary", "#10B981"),
    ("Business", "#8B5CF6"),
    ("Freelance", "#3B82F6"),
    ("Investment", "#F59E0B"),
    ("Rental", "#06B6D4"),
    ("Gifts", "#EC4899"),
];

/// Returns the category list offered for the given transaction kind.
pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => &INCOME_CATEGORIES,
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Resolves `name` against the list for `kind`, ignoring case.
///
/// Returns the canonical spelling when the category is known.
pub fn canonical_category(kind: TransactionKind, name: &str) -> Option<&'static str> {
    let needle = name.trim();
    categories_for(kind)
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(needle))
}

/// Chart colour for a category, falling back to the neutral grey.
pub fn category_color(name: &str) -> &'static str {
    CATEGORY_COLORS
        .iter()
        .find(|(category, _)| *category == name)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}
