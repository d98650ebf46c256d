use std::path::PathBuf;

use chrono::Datelike;
use ftrack_core::MonthlyService;

use crate::cli::core::{invalid, usage_error, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::validation::parse_year;
use crate::export::{
    export_monthly_report, export_transactions, monthly_report_file_name, transactions_file_name,
};

const EXPORT_USAGE: &str = "export transactions [path]\n\
     export monthly [year] [path]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "export",
        "Write transactions or a monthly report to CSV",
        EXPORT_USAGE,
        cmd_export,
    )]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((target, rest)) = args.split_first() else {
        return Err(usage_error(EXPORT_USAGE));
    };
    match target.to_ascii_lowercase().as_str() {
        "transactions" => export_all(context, rest),
        "monthly" => export_monthly(context, rest),
        other => Err(invalid(format!(
            "unknown export target `{}` (use transactions or monthly)",
            other
        ))),
    }
}

fn export_all(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [] => PathBuf::from(transactions_file_name(context.today())),
        [path] => PathBuf::from(*path),
        _ => return Err(usage_error("export transactions [path]")),
    };
    let rows = export_transactions(
        &path,
        context.store.transactions(),
        context.config.date_style(),
    )?;
    io::print_success(format!("Exported {} transactions to {}.", rows, path.display()));
    Ok(())
}

fn export_monthly(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    // A leading numeric argument narrows the report to that year; anything else is the path.
    let (year, rest) = match args.split_first() {
        Some((first, rest)) if first.chars().all(|ch| ch.is_ascii_digit()) => {
            (Some(parse_year(first)?), rest)
        }
        _ => (None, args),
    };
    let path = match rest {
        [] => PathBuf::from(monthly_report_file_name(
            year.unwrap_or_else(|| context.today().year()),
        )),
        [path] => PathBuf::from(*path),
        _ => return Err(usage_error("export monthly [year] [path]")),
    };

    let transactions = context.store.transactions();
    let months = match year {
        Some(year) => MonthlyService::for_year(transactions, year),
        None => MonthlyService::series(transactions),
    };
    let rows = export_monthly_report(&path, &months)?;
    match year {
        Some(year) => io::print_success(format!(
            "Exported {} months of {} to {}.",
            rows,
            year,
            path.display()
        )),
        None => io::print_success(format!("Exported {} months to {}.", rows, path.display())),
    }
    Ok(())
}
