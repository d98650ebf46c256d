use ftrack_core::SavingsService;
use ftrack_domain::{NewSavingsGoal, SavingsGoalPatch};

use crate::cli::core::{invalid, usage_error, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::short_id;
use crate::cli::table::{Table, TableColumn};
use crate::cli::validation::{parse_amount, parse_goal_name, parse_months};

const GOAL_USAGE: &str = "goal add <name> <cost> <months>\n\
     goal list\n\
     goal contribute <id> <amount>\n\
     goal rename <id> <name>\n\
     goal delete <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "goal",
        "Plan and track savings goals",
        GOAL_USAGE,
        cmd_goal,
    )]
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return list_goals(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => add_goal(context, rest),
        "list" => list_goals(context),
        "contribute" => contribute(context, rest),
        "rename" => rename_goal(context, rest),
        "delete" => delete_goal(context, rest),
        other => Err(invalid(format!("unknown goal subcommand `{}`", other))),
    }
}

fn add_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, cost, months] = args else {
        return Err(usage_error("goal add <name> <cost> <months>"));
    };
    let name = parse_goal_name(name)?;
    let cost = parse_amount(cost)?;
    let months = parse_months(months)?;

    let goal = NewSavingsGoal::new(name, cost, months);
    let monthly = goal.monthly_saving_required;
    let label = goal.item_name.clone();
    let id = context.store.add_savings_goal(goal);
    io::print_success(format!(
        "Created goal \"{}\" [{}]: save {} per month for {} months.",
        label,
        short_id(&id),
        context.money(monthly),
        months
    ));
    context.check_saved();
    Ok(())
}

fn list_goals(context: &mut ShellContext) -> CommandResult {
    let goals = context.store.savings_goals();
    if goals.is_empty() {
        io::print_info("No savings goals yet. Create one with `goal add <name> <cost> <months>`.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Goal"),
        TableColumn::right("Saved"),
        TableColumn::right("Target"),
        TableColumn::right("Monthly"),
        TableColumn::right("Progress"),
        TableColumn::left("Status"),
    ]);
    for goal in goals {
        let progress = SavingsService::progress(goal);
        let status = if progress.is_completed {
            "completed".to_string()
        } else {
            format!("{} to go", context.money(progress.remaining))
        };
        table.add_row(vec![
            short_id(&goal.id).to_string(),
            goal.item_name.clone(),
            context.money(goal.progress),
            context.money(goal.cost),
            context.money(goal.monthly_saving_required),
            format!("{:.1}%", progress.percentage),
            status,
        ]);
    }
    table.print();

    let overview = SavingsService::overview(goals);
    output_section("Savings overview");
    io::print_info(format!(
        "  {} of {} goals completed; {} saved toward {}.",
        overview.completed,
        overview.goals,
        context.money(overview.total_saved),
        context.money(overview.total_target)
    ));
    Ok(())
}

fn contribute(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id, amount] = args else {
        return Err(usage_error("goal contribute <id> <amount>"));
    };
    let id = context.resolve_goal(raw_id)?;
    let amount = parse_amount(amount)?;
    let was_completed = context
        .store
        .savings_goal(&id)
        .map(|goal| goal.is_completed())
        .unwrap_or(false);

    if context.store.add_contribution(&id, amount).is_none() {
        return Err(invalid(format!("savings goal `{}` disappeared", raw_id)));
    }
    if let Some(goal) = context.store.savings_goal(&id) {
        let progress = SavingsService::progress(goal);
        io::print_success(format!(
            "Added {} to \"{}\": {} of {} ({:.1}%).",
            context.money(amount),
            goal.item_name,
            context.money(goal.progress),
            context.money(goal.cost),
            progress.percentage
        ));
        if progress.is_completed && !was_completed {
            io::print_success(format!("Goal \"{}\" reached!", goal.item_name));
        }
    }
    context.check_saved();
    Ok(())
}

fn rename_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((raw_id, rest)) = args.split_first() else {
        return Err(usage_error("goal rename <id> <name>"));
    };
    let id = context.resolve_goal(raw_id)?;
    let name = parse_goal_name(&rest.join(" "))?;
    let patch = SavingsGoalPatch {
        item_name: Some(name.clone()),
        ..SavingsGoalPatch::default()
    };
    if context.store.update_savings_goal(&id, patch) {
        io::print_success(format!("Renamed goal {} to \"{}\".", short_id(&id), name));
        context.check_saved();
    }
    Ok(())
}

fn delete_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id] = args else {
        return Err(usage_error("goal delete <id>"));
    };
    let id = context.resolve_goal(raw_id)?;
    let name = context
        .store
        .savings_goal(&id)
        .map(|goal| goal.item_name.clone())
        .unwrap_or_else(|| id.clone());
    if !context.confirm(&format!("Delete savings goal \"{}\" and its contributions?", name))? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    if context.store.delete_savings_goal(&id) {
        io::print_success(format!("Deleted savings goal \"{}\".", name));
        context.check_saved();
    }
    Ok(())
}
