use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf};

use crate::ConfigError;

/// Stores user-configurable shell preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    /// Optional root for record files and their backups. Defaults to the application directory.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_dashboard_months")]
    pub dashboard_months: usize,
    #[serde(default = "Config::default_top_categories")]
    pub top_categories: usize,
    #[serde(default = "Config::default_recent_transactions")]
    pub recent_transactions: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            data_dir: None,
            dashboard_months: Self::default_dashboard_months(),
            top_categories: Self::default_top_categories(),
            recent_transactions: Self::default_recent_transactions(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_dashboard_months() -> usize {
        6
    }

    pub fn default_top_categories() -> usize {
        5
    }

    pub fn default_recent_transactions() -> usize {
        5
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn date_style(&self) -> DateStyle {
        DateStyle::for_locale(&self.locale)
    }

    /// Root for record storage: `data_dir` when configured, else `app_dir`.
    pub fn resolve_data_dir(&self, app_dir: &std::path::Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => app_dir.to_path_buf(),
        }
    }

    /// Default application directory: the platform data directory, or the home
    /// directory when none is reported.
    pub fn default_app_dir() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("finance-tracker")
    }

    /// Applies a `key=value` style update coming from the shell.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "locale" => self.locale = non_empty(key, value)?,
            "currency" => self.currency = non_empty(key, value)?.to_ascii_uppercase(),
            "data_dir" => {
                self.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "dashboard_months" => self.dashboard_months = positive(key, value)?,
            "top_categories" => self.top_categories = positive(key, value)?,
            "recent_transactions" => self.recent_transactions = positive(key, value)?,
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid(key, "expected true or false")),
                }
            }
            _ => return Err(invalid(key, "unknown setting")),
        }
        Ok(())
    }

    /// Setting names accepted by [`Config::set`], in display order.
    pub fn keys() -> &'static [&'static str] {
        &[
            "locale",
            "currency",
            "data_dir",
            "dashboard_months",
            "top_categories",
            "recent_transactions",
            "ui_color_enabled",
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "data_dir" => self
                .data_dir
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            "dashboard_months" => self.dashboard_months.to_string(),
            "top_categories" => self.top_categories.to_string(),
            "recent_transactions" => self.recent_transactions.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(invalid(key, "value cannot be empty"))
    } else {
        Ok(value.to_string())
    }
}

fn positive(key: &str, value: &str) -> Result<usize, ConfigError> {
    match value.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(invalid(key, "expected a positive whole number")),
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// How calendar dates are written in exports and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `M/D/YYYY`
    UnitedStates,
    /// `DD/MM/YYYY`
    DayFirst,
    /// `YYYY-MM-DD`
    Iso,
}

impl DateStyle {
    pub fn for_locale(locale: &str) -> Self {
        let normalized = locale.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "en-us" | "en" => DateStyle::UnitedStates,
            "en-gb" | "en-au" | "en-nz" | "en-ie" | "fr-fr" | "es-es" | "it-it" | "pt-br" => {
                DateStyle::DayFirst
            }
            _ => DateStyle::Iso,
        }
    }
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateStyle::UnitedStates => "M/D/YYYY",
            DateStyle::DayFirst => "DD/MM/YYYY",
            DateStyle::Iso => "YYYY-MM-DD",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_style_follows_locale() {
        assert_eq!(DateStyle::for_locale("en-US"), DateStyle::UnitedStates);
        assert_eq!(DateStyle::for_locale("en_GB"), DateStyle::DayFirst);
        assert_eq!(DateStyle::for_locale("sv-SE"), DateStyle::Iso);
    }

    #[test]
    fn set_validates_values() {
        let mut cfg = Config::default();
        cfg.set("dashboard_months", "12").unwrap();
        cfg.set("currency", "eur").unwrap();
        assert_eq!(cfg.dashboard_months, 12);
        assert_eq!(cfg.currency, "EUR");
        assert!(cfg.set("top_categories", "0").is_err());
        assert!(cfg.set("ui_color_enabled", "maybe").is_err());
        assert!(cfg.set("theme", "dark").is_err());
    }

    #[test]
    fn get_covers_every_key() {
        let cfg = Config::default();
        for key in Config::keys() {
            assert!(cfg.get(key).is_some(), "missing getter for {key}");
        }
        assert_eq!(cfg.get("recent_transactions").as_deref(), Some("5"));
    }
}
