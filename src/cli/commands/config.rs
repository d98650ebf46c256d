use ftrack_config::Config;

use crate::cli::core::{invalid, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section, OutputPreferences};
use crate::cli::registry::CommandEntry;

const CONFIG_USAGE: &str = "config [show|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(invalid(format!(
                    "usage: config set <{}> <value>",
                    Config::keys().join("|")
                )));
            }
            let key = args[1].to_ascii_lowercase();
            let value = args[2..].join(" ");
            set_config_value(context, &key, value.trim())
        }
        _ => Err(invalid(format!("usage: {}", CONFIG_USAGE))),
    }
}

fn show_config(context: &mut ShellContext) -> CommandResult {
    output_section("Configuration");
    for key in Config::keys() {
        let value = context.config.get(key).unwrap_or_default();
        let shown = if value.is_empty() { "(default)".to_string() } else { value };
        io::print_info(format!("  {:<20}: {}", key, shown));
    }
    io::print_info(format!("  {:<20}: {}", "date_style", context.config.date_style()));
    io::print_hint(format!(
        "Stored at {}",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    let data_dir_changed = updated.data_dir != context.config.data_dir;
    context.config = updated;
    context.persist_config()?;

    match key {
        "ui_color_enabled" => output::set_preferences(OutputPreferences {
            color_enabled: context.config.ui_color_enabled,
        }),
        "data_dir" if data_dir_changed => context.reopen_storage()?,
        _ => {}
    }
    io::print_success(format!(
        "Set {} to {}.",
        key,
        context.config.get(key).unwrap_or_default()
    ));
    Ok(())
}
