use ftrack_core::{DARK_MODE_KEY, SAVINGS_GOALS_KEY, TRANSACTIONS_KEY};

use crate::cli::core::{invalid, usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};

const RESTORE_USAGE: &str = "restore <transactions|goals|dark-mode> <backup-id>";

/// Shell names for the persisted collections, paired with their storage keys.
const COLLECTIONS: [(&str, &str); 3] = [
    ("transactions", TRANSACTIONS_KEY),
    ("goals", SAVINGS_GOALS_KEY),
    ("dark-mode", DARK_MODE_KEY),
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dark-mode",
            "Show or change the dark mode preference",
            "dark-mode [on|off|toggle]",
            cmd_dark_mode,
        ),
        CommandEntry::new(
            "backups",
            "List saved backups",
            "backups [transactions|goals|dark-mode]",
            cmd_backups,
        ),
        CommandEntry::new(
            "restore",
            "Replace stored data with a backup",
            RESTORE_USAGE,
            cmd_restore,
        ),
    ]
}

fn cmd_dark_mode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let enabled = match args {
        [] => {
            io::print_info(format!("Dark mode is {}.", on_off(context.store.dark_mode())));
            return Ok(());
        }
        [value] => match value.to_ascii_lowercase().as_str() {
            "on" | "true" | "yes" => {
                context.store.set_dark_mode(true);
                true
            }
            "off" | "false" | "no" => {
                context.store.set_dark_mode(false);
                false
            }
            "toggle" => context.store.toggle_dark_mode(),
            other => return Err(invalid(format!("unknown dark mode value `{}`", other))),
        },
        _ => return Err(usage_error("dark-mode [on|off|toggle]")),
    };
    io::print_success(format!("Dark mode {}.", on_off(enabled)));
    context.check_saved();
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let selected: Vec<(&str, &str)> = match args {
        [] => COLLECTIONS.to_vec(),
        [name] => vec![collection(name)?],
        _ => return Err(usage_error("backups [transactions|goals|dark-mode]")),
    };

    output_section("Backups");
    let mut table = Table::new(vec![
        TableColumn::left("Data"),
        TableColumn::left("Backup ID"),
        TableColumn::left("Created (UTC)"),
        TableColumn::right("Size"),
    ]);
    for (label, key) in selected {
        for backup in context.files.list_backups(key)? {
            let created = backup
                .created_at
                .map(|stamp| stamp.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            table.add_row(vec![
                label.to_string(),
                backup.id,
                created,
                format!("{} B", backup.size_bytes),
            ]);
        }
    }
    if table.is_empty() {
        io::print_info("No backups yet. A backup is taken each time stored data is overwritten.");
    } else {
        table.print();
        io::print_hint(format!("Keeping the latest {} backups per collection.", context.files.retention()));
    }
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, backup_id] = args else {
        return Err(usage_error(RESTORE_USAGE));
    };
    let (label, key) = collection(name)?;
    if !context.confirm(&format!(
        "Replace current {} with backup {}? The current data is backed up first.",
        label, backup_id
    ))? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    context.files.restore_backup(key, backup_id)?;
    context.load_records();
    io::print_success(format!("Restored {} from {}.", label, backup_id));
    Ok(())
}

fn collection(name: &str) -> Result<(&'static str, &'static str), CommandError> {
    COLLECTIONS
        .iter()
        .copied()
        .find(|(label, _)| label.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| {
            invalid(format!(
                "unknown data set `{}` (use transactions, goals or dark-mode)",
                name
            ))
        })
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
