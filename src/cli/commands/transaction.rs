use ftrack_core::{SortField, SortOrder, TransactionQuery};
use ftrack_domain::{canonical_category, NewTransaction, Transaction, TransactionKind, TransactionPatch};

use crate::cli::args::parse_args;
use crate::cli::core::{invalid, usage_error, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::short_id;
use crate::cli::table::{Table, TableColumn};
use crate::cli::validation::{parse_amount, parse_category, parse_count, parse_date, parse_kind};

const ADD_USAGE: &str = "add <income|expense> <amount> <category> [description] [--date YYYY-MM-DD]";
const EDIT_USAGE: &str = "edit <id> [--amount N] [--type income|expense] [--category NAME]\n\
     [--description TEXT] [--date YYYY-MM-DD]";
const LIST_USAGE: &str = "list [--search TEXT] [--type income|expense] [--category NAME]\n\
     [--sort date|amount|category] [--order asc|desc] [--limit N]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Change fields of a transaction", EDIT_USAGE, cmd_edit),
        CommandEntry::new("delete", "Remove a transaction", "delete <id>", cmd_delete),
        CommandEntry::new("list", "Search, filter and sort transactions", LIST_USAGE, cmd_list),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["date"])?;
    if parsed.positionals.len() < 3 {
        return Err(usage_error(ADD_USAGE));
    }
    let kind = parse_kind(parsed.positionals[0])?;
    let amount = parse_amount(parsed.positionals[1])?;
    let category = parse_category(kind, parsed.positionals[2])?;
    let description = parsed.positionals[3..].join(" ");
    let date = match parsed.flag("date") {
        Some(raw) => parse_date(raw, context.today())?,
        None => context.today(),
    };

    let id = context.store.add_transaction(NewTransaction::new(
        amount,
        kind,
        category,
        description.trim(),
        date,
    ));
    io::print_success(format!(
        "Added {} of {} in {} on {} [{}].",
        kind.as_str(),
        context.money(amount),
        category,
        context.date(date),
        short_id(&id)
    ));
    context.check_saved();
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(
        args,
        &["amount", "type", "category", "description", "date"],
    )?;
    let [raw_id] = parsed.positionals.as_slice() else {
        return Err(usage_error(EDIT_USAGE));
    };
    if !parsed.has_flags() {
        return Err(invalid("nothing to change; pass at least one option"));
    }
    let id = context.resolve_transaction(raw_id)?;
    let Some(current) = context.store.transaction(&id).cloned() else {
        return Err(invalid(format!("transaction `{}` disappeared", raw_id)));
    };

    let mut patch = TransactionPatch::default();
    if let Some(raw) = parsed.flag("amount") {
        patch.amount = Some(parse_amount(raw)?);
    }
    if let Some(raw) = parsed.flag("type") {
        patch.kind = Some(parse_kind(raw)?);
    }
    let kind = patch.kind.unwrap_or(current.kind);
    match parsed.flag("category") {
        Some(raw) => patch.category = Some(parse_category(kind, raw)?.to_string()),
        None if kind != current.kind => {
            // The kept category has to exist in the new kind's list.
            let category = parse_category(kind, &current.category)?;
            patch.category = Some(category.to_string());
        }
        None => {}
    }
    if let Some(raw) = parsed.flag("description") {
        patch.description = Some(raw.trim().to_string());
    }
    if let Some(raw) = parsed.flag("date") {
        patch.date = Some(parse_date(raw, context.today())?);
    }

    if context.store.update_transaction(&id, patch) {
        io::print_success(format!("Updated transaction {}.", short_id(&id)));
        context.check_saved();
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id] = args else {
        return Err(usage_error("delete <id>"));
    };
    let id = context.resolve_transaction(raw_id)?;
    let label = match context.store.transaction(&id) {
        Some(txn) => describe(context, txn),
        None => id.clone(),
    };
    if !context.confirm(&format!("Delete {}?", label))? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    if context.store.delete_transaction(&id) {
        io::print_success(format!("Deleted transaction {}.", short_id(&id)));
        context.check_saved();
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(
        args,
        &["search", "type", "category", "sort", "order", "limit"],
    )?;
    if !parsed.positionals.is_empty() {
        return Err(usage_error(LIST_USAGE));
    }

    let mut query = TransactionQuery::new();
    if let Some(term) = parsed.flag("search") {
        query = query.search(term);
    }
    let kind = parsed.flag("type").map(parse_kind).transpose()?;
    if let Some(kind) = kind {
        query = query.kind(kind);
    }
    if let Some(raw) = parsed.flag("category") {
        query = query.category(resolve_filter_category(kind, raw));
    }
    let field = match parsed.flag("sort") {
        Some(raw) => raw.parse::<SortField>().map_err(invalid)?,
        None => SortField::default(),
    };
    let order = match parsed.flag("order") {
        Some(raw) => raw.parse::<SortOrder>().map_err(invalid)?,
        None => SortOrder::default(),
    };
    query = query.sort(field, order);
    if let Some(raw) = parsed.flag("limit") {
        query = query.limit(parse_count(raw, "limit")?);
    }

    let all = context.store.transactions();
    let rows = query.apply(all);
    if rows.is_empty() {
        io::print_info(if all.is_empty() {
            "No transactions recorded yet."
        } else {
            "No transactions match the filters."
        });
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Type"),
        TableColumn::left("Category"),
        TableColumn::left("Description"),
        TableColumn::right("Amount"),
    ]);
    for txn in &rows {
        table.add_row(vec![
            short_id(&txn.id).to_string(),
            context.date(txn.date),
            txn.kind.to_string(),
            txn.category.clone(),
            txn.description.clone(),
            signed_money(context, txn),
        ]);
    }
    table.print();
    io::print_info(format!("Showing {} of {} transactions.", rows.len(), all.len()));
    Ok(())
}

fn resolve_filter_category(kind: Option<TransactionKind>, raw: &str) -> String {
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => vec![TransactionKind::Expense, TransactionKind::Income],
    };
    kinds
        .into_iter()
        .find_map(|kind| canonical_category(kind, raw))
        .map(str::to_string)
        .unwrap_or_else(|| raw.trim().to_string())
}

pub(crate) fn signed_money(context: &ShellContext, txn: &Transaction) -> String {
    let sign = if txn.is_income() { "+" } else { "-" };
    format!("{}{}", sign, context.money(txn.amount))
}

fn describe(context: &ShellContext, txn: &Transaction) -> String {
    let mut label = format!(
        "{} {} ({}) on {}",
        txn.kind.as_str(),
        context.money(txn.amount),
        txn.category,
        context.date(txn.date)
    );
    if !txn.description.is_empty() {
        label.push_str(&format!(": {}", txn.description));
    }
    label
}
