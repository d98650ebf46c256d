use ftrack_core::{
    CategoryService, CategoryTotal, DashboardLimits, DashboardService, MonthlyTotals,
    ReportService, SummaryService,
};
use ftrack_domain::TransactionKind;

use crate::cli::commands::transaction::signed_money;
use crate::cli::core::{usage_error, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{section as output_section, signed_amount};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::cli::validation::{parse_kind, parse_year};
use crate::currency::format_percent;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show income, expense and balance totals",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "dashboard",
            "Show this month, trends, top categories and recent activity",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "report",
            "Show the yearly report",
            "report [year]",
            cmd_report,
        ),
        CommandEntry::new(
            "averages",
            "Show average monthly income and expenses",
            "averages",
            cmd_averages,
        ),
        CommandEntry::new(
            "categories",
            "Break totals down by category",
            "categories [income|expense]",
            cmd_categories,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("summary"));
    }
    let transactions = context.store.transactions();
    let summary = SummaryService::summarize(transactions);
    let stats = DashboardService::quick_stats(transactions, context.today());

    output_section("Summary");
    io::print_info(format!("  Total income   : {}", context.money(summary.total_income)));
    io::print_info(format!("  Total expenses : {}", context.money(summary.total_expenses)));
    io::print_info(format!(
        "  Balance        : {}",
        signed_amount(summary.balance, context.money(summary.balance))
    ));
    io::print_info(format!(
        "  Transactions   : {} ({} this month, {} categories)",
        stats.total, stats.this_month, stats.categories
    ));
    Ok(())
}

fn cmd_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("dashboard"));
    }
    let limits = DashboardLimits {
        months: context.config.dashboard_months,
        recent: context.config.recent_transactions,
        top_categories: context.config.top_categories,
    };
    let dashboard = DashboardService::build(context.store.transactions(), context.today(), limits);

    output_section(format!("Dashboard: {}", dashboard.month.long_label()));
    io::print_info(format!(
        "  Income this month   : {}",
        context.money(dashboard.this_month.income)
    ));
    io::print_info(format!(
        "  Expenses this month : {} ({} vs last month)",
        context.money(dashboard.this_month.expenses),
        format_percent(dashboard.expense_change)
    ));
    io::print_info(format!(
        "  Net this month      : {}",
        signed_amount(dashboard.net(), context.money(dashboard.net()))
    ));
    let [income, expenses] = &dashboard.comparison;
    io::print_info(format!(
        "  All time            : {} {} / {} {}",
        income.name,
        context.money(income.amount),
        expenses.name,
        context.money(expenses.amount)
    ));

    output_section("Monthly trend");
    print_months(context, &dashboard.monthly, true);

    output_section("Top expense categories");
    print_categories(context, &dashboard.top_expenses);

    output_section("Recent transactions");
    if dashboard.recent.is_empty() {
        io::print_info("No transactions recorded yet.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Date"),
            TableColumn::left("Category"),
            TableColumn::left("Description"),
            TableColumn::right("Amount"),
        ]);
        for txn in &dashboard.recent {
            table.add_row(vec![
                context.date(txn.date),
                txn.category.clone(),
                txn.description.clone(),
                signed_money(context, txn),
            ]);
        }
        table.print();
    }
    Ok(())
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let transactions = context.store.transactions();
    let years = ReportService::available_years(transactions);
    let year = match args {
        [] => match years.first() {
            Some(year) => *year,
            None => {
                io::print_info("No transactions recorded yet.");
                return Ok(());
            }
        },
        [raw] => parse_year(raw)?,
        _ => return Err(usage_error("report [year]")),
    };

    let report = ReportService::year_report(transactions, year, context.config.top_categories);
    output_section(format!("Report {}", report.year));
    if report.transaction_count == 0 {
        io::print_info(format!("No transactions in {}.", year));
        if !years.is_empty() {
            let listed: Vec<String> = years.iter().map(i32::to_string).collect();
            io::print_hint(format!("Years with data: {}", listed.join(", ")));
        }
        return Ok(());
    }

    io::print_info(format!("  Transactions   : {}", report.transaction_count));
    io::print_info(format!("  Total income   : {}", context.money(report.summary.total_income)));
    io::print_info(format!("  Total expenses : {}", context.money(report.summary.total_expenses)));
    io::print_info(format!(
        "  Net            : {}",
        signed_amount(report.summary.balance, context.money(report.summary.balance))
    ));

    output_section("Top expense categories");
    print_categories(context, &report.top_expenses);

    output_section("Monthly breakdown");
    print_months(context, &report.months, false);
    Ok(())
}

fn cmd_averages(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("averages"));
    }
    let stats = SummaryService::averages(context.store.transactions());
    output_section("Monthly averages");
    io::print_info(format!(
        "  Average income   : {}",
        context.money(stats.avg_monthly_income)
    ));
    io::print_info(format!(
        "  Average expenses : {}",
        context.money(stats.avg_monthly_expenses)
    ));
    io::print_info(format!("  Months counted   : {}", stats.months));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = match args {
        [] => TransactionKind::Expense,
        [raw] => parse_kind(raw)?,
        _ => return Err(usage_error("categories [income|expense]")),
    };
    let breakdown = CategoryService::breakdown(context.store.transactions(), kind);
    output_section(format!("{} by category", kind));
    print_categories(context, &breakdown);
    Ok(())
}

fn print_categories(context: &ShellContext, totals: &[CategoryTotal]) {
    if totals.is_empty() {
        io::print_info("No matching transactions.");
        return;
    }
    let sum: f64 = totals.iter().map(|total| total.value).sum();
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Total"),
        TableColumn::right("Share"),
    ]);
    for total in totals {
        let share = if sum > 0.0 { total.value / sum * 100.0 } else { 0.0 };
        table.add_row(vec![
            total.name.clone(),
            context.money(total.value),
            format!("{:.1}%", share),
        ]);
    }
    table.print();
}

fn print_months(context: &ShellContext, months: &[MonthlyTotals], short: bool) {
    if months.is_empty() {
        io::print_info("No monthly activity.");
        return;
    }
    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::right("Income"),
        TableColumn::right("Expenses"),
        TableColumn::right("Balance"),
    ]);
    for totals in months {
        let label = if short {
            totals.month.short_label()
        } else {
            totals.month.long_label()
        };
        table.add_row(vec![
            label,
            context.money(totals.income),
            context.money(totals.expenses),
            context.money(totals.balance()),
        ]);
    }
    table.print();
}
