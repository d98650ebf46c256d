mod common;

use std::fs;

use finance_tracker::cli::core::CommandError;
use ftrack_core::{SavingsService, SAVINGS_GOALS_KEY, TRANSACTIONS_KEY};
use ftrack_domain::TransactionKind;

use common::{app_dir, run, shell_at};

#[test]
fn records_survive_a_new_session() {
    let dir = app_dir();
    {
        let mut shell = shell_at(&dir);
        run(
            &mut shell,
            &[
                r#"add income 1200 Salary "January pay" --date 2024-01-05"#,
                r#"add expense 300 "food & dining" Groceries --date 2024-01-10"#,
                r#"goal add "New Laptop" 1200 6"#,
                "dark-mode on",
            ],
        );
    }

    let shell = shell_at(&dir);
    let transactions = shell.store.transactions();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].category, "Food & Dining");
    assert_eq!(transactions[0].kind, TransactionKind::Expense);
    assert_eq!(transactions[1].description, "January pay");
    assert_eq!(shell.store.summary().balance, 900.0);

    let goals = shell.store.savings_goals();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].item_name, "New Laptop");
    assert_eq!(goals[0].monthly_saving_required, 200.0);
    assert!(shell.store.dark_mode());
}

#[test]
fn contributions_complete_a_goal() {
    let dir = app_dir();
    let mut shell = shell_at(&dir);
    run(&mut shell, &["goal add Laptop 1200 6"]);
    let id = shell.store.savings_goals()[0].id.clone();
    let prefix = &id[..8];

    for _ in 0..3 {
        run(&mut shell, &[&format!("goal contribute {} 200", prefix)]);
    }
    let goal = shell.store.savings_goal(&id).unwrap();
    assert_eq!(goal.progress, 600.0);
    assert!(!SavingsService::progress(goal).is_completed);

    run(&mut shell, &[&format!("goal contribute {} 600", prefix)]);
    let goal = shell.store.savings_goal(&id).unwrap();
    assert_eq!(goal.progress, 1200.0);
    assert_eq!(goal.contributions.len(), 4);
    assert!(goal.is_completed());
    assert_eq!(goal.monthly_saving_required, 200.0);
}

#[test]
fn edit_and_delete_by_id_prefix() {
    let dir = app_dir();
    let mut shell = shell_at(&dir);
    run(&mut shell, &["add expense 45 Shopping Shoes --date 2024-03-02"]);
    let id = shell.store.transactions()[0].id.clone();

    run(
        &mut shell,
        &[&format!(
            "edit {} --amount 50.5 --description \"Running shoes\"",
            &id[..8]
        )],
    );
    let txn = shell.store.transaction(&id).unwrap();
    assert_eq!(txn.amount, 50.5);
    assert_eq!(txn.description, "Running shoes");
    assert_eq!(txn.category, "Shopping");

    run(&mut shell, &[&format!("delete {}", &id[..8])]);
    assert!(shell.store.transactions().is_empty());
}

#[test]
fn changing_type_requires_a_matching_category() {
    let dir = app_dir();
    let mut shell = shell_at(&dir);
    run(&mut shell, &["add expense 45 Shopping --date 2024-03-02"]);
    let id = shell.store.transactions()[0].id.clone();

    let err = shell
        .process_line(&format!("edit {} --type income", &id[..8]))
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidArguments(_)));

    run(
        &mut shell,
        &[&format!("edit {} --type income --category gifts", &id[..8])],
    );
    let txn = shell.store.transaction(&id).unwrap();
    assert_eq!(txn.kind, TransactionKind::Income);
    assert_eq!(txn.category, "Gifts");
}

#[test]
fn invalid_input_never_reaches_the_store() {
    let dir = app_dir();
    let mut shell = shell_at(&dir);
    for line in [
        "add expense 0 Rent",
        "add expense abc Rent",
        "add expense 10 Salary",
        "add transfer 10 Rent",
        "add expense 10 Rent --date 2024-13-01",
        "goal add Laptop 1200 0",
        r#"goal add "  " 1200 6"#,
        "add expense 1.7e308 Shopping Big",
        "goal add Yacht 1.7e308 6",
    ] {
        let err = shell.process_line(line).unwrap_err();
        assert!(
            matches!(err, CommandError::InvalidArguments(_)),
            "`{}` gave {:?}",
            line,
            err
        );
    }
    assert!(shell.store.transactions().is_empty());
    assert!(shell.store.savings_goals().is_empty());
}

#[test]
fn rejected_huge_amount_keeps_saved_records_loadable() {
    let dir = app_dir();
    {
        let mut shell = shell_at(&dir);
        run(&mut shell, &["add income 1200 Salary Pay --date 2024-01-05"]);
        let err = shell
            .process_line("add expense 1.7e308 Shopping Big --date 2024-01-06")
            .unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
        run(&mut shell, &["add expense 1e12 Shopping Big --date 2024-01-06"]);
    }

    let shell = shell_at(&dir);
    let transactions = shell.store.transactions();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].amount, 1e12);
    assert!(shell.store.summary().balance.is_finite());
}

#[test]
fn unknown_ids_are_reported() {
    let dir = app_dir();
    let mut shell = shell_at(&dir);
    let err = shell.process_line("delete deadbeef").unwrap_err();
    assert!(matches!(err, CommandError::NotFound(_)));
    let err = shell.process_line("goal contribute deadbeef 10").unwrap_err();
    assert!(matches!(err, CommandError::NotFound(_)));
}

#[test]
fn restore_brings_back_the_previous_list() {
    let dir = app_dir();
    let mut shell = shell_at(&dir);
    run(
        &mut shell,
        &[
            "add income 100 Gifts --date 2024-02-01",
            "add expense 20 Travel --date 2024-02-03",
        ],
    );
    assert_eq!(shell.store.transactions().len(), 2);

    let backups = shell.files.list_backups(TRANSACTIONS_KEY).unwrap();
    assert_eq!(backups.len(), 1);
    run(
        &mut shell,
        &[&format!("restore transactions {}", backups[0].id)],
    );

    assert_eq!(shell.store.transactions().len(), 1);
    assert_eq!(shell.store.transactions()[0].category, "Gifts");
    // The replaced list was backed up as well.
    assert_eq!(shell.files.list_backups(TRANSACTIONS_KEY).unwrap().len(), 2);
}

#[test]
fn corrupt_goal_file_loads_as_empty() {
    let dir = app_dir();
    {
        let mut shell = shell_at(&dir);
        run(
            &mut shell,
            &["goal add Bike 300 3", "add income 50 Freelance --date 2024-04-04"],
        );
        let path = shell.files.entry_path(SAVINGS_GOALS_KEY);
        fs::write(path, "{ not json").unwrap();
    }

    let shell = shell_at(&dir);
    assert!(shell.store.savings_goals().is_empty());
    assert_eq!(shell.store.transactions().len(), 1);
}

#[test]
fn config_changes_are_persisted() {
    let dir = app_dir();
    {
        let mut shell = shell_at(&dir);
        run(
            &mut shell,
            &["config set currency eur", "config set top_categories 3"],
        );
        assert_eq!(shell.config.currency, "EUR");
    }

    let shell = shell_at(&dir);
    assert_eq!(shell.config.currency, "EUR");
    assert_eq!(shell.config.top_categories, 3);

    let mut shell = shell;
    let err = shell.process_line("config set top_categories none").unwrap_err();
    assert!(matches!(err, CommandError::InvalidArguments(_)));
}

#[test]
fn moving_the_data_dir_starts_from_that_directory() {
    let dir = app_dir();
    let elsewhere = app_dir();
    let mut shell = shell_at(&dir);
    run(&mut shell, &["add income 10 Gifts --date 2024-01-01"]);

    run(
        &mut shell,
        &[&format!("config set data_dir \"{}\"", elsewhere.display())],
    );
    assert!(shell.store.transactions().is_empty());
    assert!(shell
        .files
        .entry_path(TRANSACTIONS_KEY)
        .starts_with(&elsewhere));
}
