//! Shared runtime state for shell interactions and command execution.

use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use ftrack_config::{Config, ConfigManager};
use ftrack_core::{IdMatch, RecordStore};
use ftrack_storage_json::{JsonFileStore, StoragePaths};
use tracing::info;

use crate::{
    cli::{
        commands,
        core::{CliError, CommandError},
        io as cli_io,
        output::{self, OutputPreferences},
        registry::{CommandEntry, CommandRegistry},
        system_clock::SystemClock,
    },
    currency::{format_currency, format_date},
    utils::paths,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: RecordStore,
    pub files: Arc<JsonFileStore>,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub app_dir: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_app_dir(mode, paths::app_dir())
    }

    /// Builds a shell whose config and records live under `app_dir`.
    pub fn with_app_dir(mode: CliMode, app_dir: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(&app_dir)?;
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled,
        });

        let files = Arc::new(open_files(&config, &app_dir)?);
        let store = RecordStore::new(Box::new(files.clone()), Box::new(SystemClock));

        let mut context = ShellContext {
            mode,
            registry,
            store,
            files,
            config_manager,
            config,
            app_dir,
            last_command: None,
            running: true,
        };
        context.load_records();
        Ok(context)
    }

    /// Reads every persisted collection into the store and reports discarded data.
    pub(crate) fn load_records(&mut self) {
        let report = self.store.load();
        info!(
            transactions = report.transactions,
            savings_goals = report.savings_goals,
            "shell session ready"
        );
        for warning in report.warnings {
            cli_io::print_warning(format!("Stored data was reset: {}", warning));
        }
    }

    /// Re-opens storage after the data directory setting changed.
    pub(crate) fn reopen_storage(&mut self) -> Result<(), CommandError> {
        let files = Arc::new(open_files(&self.config, &self.app_dir)?);
        self.store = RecordStore::new(Box::new(files.clone()), Box::new(SystemClock));
        self.files = files;
        self.load_records();
        Ok(())
    }

    pub(crate) fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        "finance> ".to_string()
    }

    pub(crate) fn print_banner(&self) {
        output::section("Finance Tracker");
        cli_io::print_info(format!(
            "{} transactions, {} savings goals. Type `help` to see available commands.",
            self.store.transactions().len(),
            self.store.savings_goals().len()
        ));
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.store.clock().today()
    }

    pub(crate) fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.config.currency)
    }

    pub(crate) fn date(&self, date: NaiveDate) -> String {
        format_date(self.config.date_style(), date)
    }

    /// Surfaces a failed save from the last mutation, if any.
    pub(crate) fn check_saved(&mut self) {
        if let Some(err) = self.store.take_save_error() {
            cli_io::print_warning(format!("Changes are kept for this session but were not saved: {}", err));
        }
    }

    /// Asks before a destructive action; script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action("Exit shell?", true)
    }

    pub(crate) fn resolve_transaction(&self, raw: &str) -> Result<String, CommandError> {
        resolve_id("transaction", raw, self.store.find_transaction_id(raw))
    }

    pub(crate) fn resolve_goal(&self, raw: &str) -> Result<String, CommandError> {
        resolve_id("savings goal", raw, self.store.find_savings_goal_id(raw))
    }
}

fn open_files(config: &Config, app_dir: &std::path::Path) -> Result<JsonFileStore, CommandError> {
    let root = config.resolve_data_dir(app_dir);
    Ok(JsonFileStore::new(StoragePaths::under(&root))?)
}

fn resolve_id(label: &str, raw: &str, found: IdMatch) -> Result<String, CommandError> {
    match found {
        IdMatch::Unique(id) => Ok(id),
        IdMatch::Ambiguous(count) => Err(CommandError::InvalidArguments(format!(
            "`{}` matches {} {}s; type more characters of the id",
            raw, count, label
        ))),
        IdMatch::Missing => Err(CommandError::NotFound(format!(
            "No {} with id `{}`.",
            label, raw
        ))),
    }
}

/// Leading characters of an id, as shown in listings.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
