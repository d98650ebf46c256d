use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use thiserror::Error;

use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::output::info as output_info;

/// When set, commands are read line by line from stdin instead of an interactive prompt.
pub const SCRIPT_MODE_ENV: &str = "FINANCE_TRACKER_CLI_SCRIPT";

/// Second words offered by tab completion, per command.
const KEYWORDS: &[(&str, &[&str])] = &[
    ("add", &["income", "expense"]),
    ("list", &["income", "expense"]),
    ("goal", &["add", "list", "contribute", "rename", "delete"]),
    ("export", &["transactions", "monthly"]),
    ("config", &["show", "set"]),
    ("dark-mode", &["on", "off", "toggle"]),
    ("backups", &["transactions", "goals", "dark-mode"]),
    ("restore", &["transactions", "goals", "dark-mode"]),
];

pub fn run_cli() -> Result<(), CliError> {
    let mode = match std::env::var_os(SCRIPT_MODE_ENV) {
        Some(_) => CliMode::Script,
        None => CliMode::Interactive,
    };
    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => interactive_session(&mut context),
        CliMode::Script => script_session(&mut context, io::stdin().lock()),
    }
}

/// Runs one line; `false` once the session should end.
fn handle_line(context: &mut ShellContext, line: &str) -> Result<bool, CliError> {
    match context.process_line(line) {
        Ok(LoopControl::Continue) => Ok(context.running),
        Ok(LoopControl::Exit) => Ok(false),
        Err(err) => {
            context.report_error(err)?;
            Ok(context.running)
        }
    }
}

fn interactive_session(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()
        .map_err(|err| CliError::Command(err.to_string()))?;
    editor.set_helper(Some(ShellCompleter::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    context.print_banner();

    while context.running {
        let line = match editor.readline(&context.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) if context.confirm_exit()? => break,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(CliError::Command(err.to_string())),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line);
        if !handle_line(context, line)? {
            break;
        }
    }
    Ok(())
}

fn script_session<R: BufRead>(context: &mut ShellContext, input: R) -> Result<(), CliError> {
    for line in input.lines() {
        if !handle_line(context, &line?)? {
            break;
        }
    }
    Ok(())
}

/// Completes command names, then the keyword that follows them.
struct ShellCompleter {
    commands: Vec<String>,
}

impl ShellCompleter {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, words: &[&str], partial: &str) -> Vec<String> {
        let partial = partial.to_ascii_lowercase();
        let pool: Vec<&str> = match words {
            [] => self.commands.iter().map(String::as_str).collect(),
            [command] => KEYWORDS
                .iter()
                .find(|(name, _)| command.eq_ignore_ascii_case(name))
                .map(|(_, keywords)| keywords.to_vec())
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        pool.into_iter()
            .filter(|word| word.starts_with(&partial))
            .map(str::to_string)
            .collect()
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let start = before.rfind(char::is_whitespace).map_or(0, |idx| idx + 1);
        let words: Vec<&str> = before[..start].split_whitespace().collect();
        let pairs = self
            .candidates(&words, &before[start..])
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Highlighter for ShellCompleter {}

impl Validator for ShellCompleter {}

impl Helper for ShellCompleter {}

#[derive(Debug, Error)]
#[error("{0}")]
pub(crate) struct ParseError(String);

/// Splits a line into words, honoring shell-style quoting.
pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    shell_words::split(input).map_err(|err| ParseError(err.to_string()))
}
