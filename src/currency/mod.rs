//! Display formatting for money, percentages and calendar dates.

use chrono::{Datelike, NaiveDate};
use ftrack_config::DateStyle;

pub fn symbol_for(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "AUD" => Some("A$"),
        _ => None,
    }
}

pub fn minor_units_for(code: &str) -> usize {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Fixed-precision number with `,` thousands grouping.
pub fn format_number(value: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, value.abs());
    let (int_part, fraction) = match body.find('.') {
        Some(pos) => body.split_at(pos),
        None => (body.as_str(), ""),
    };
    let grouped = group_digits(int_part);
    let negative = value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0');
    format!("{}{}{}", if negative { "-" } else { "" }, grouped, fraction)
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `$1,200.00`, `-$30.50`, or `1,200.00 CHF` for codes without a known symbol.
pub fn format_currency(amount: f64, code: &str) -> String {
    let body = format_number(amount.abs(), minor_units_for(code));
    let sign = if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match symbol_for(code) {
        Some(symbol) => format!("{}{}{}", sign, symbol, body),
        None => format!("{}{} {}", sign, body, code),
    }
}

/// Signed percentage with one decimal, e.g. `+12.5%`.
pub fn format_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

pub fn format_date(style: DateStyle, date: NaiveDate) -> String {
    match style {
        DateStyle::UnitedStates => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        DateStyle::DayFirst => date.format("%d/%m/%Y").to_string(),
        DateStyle::Iso => date.format("%Y-%m-%d").to_string(),
    }
}
