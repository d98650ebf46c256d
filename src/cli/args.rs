use std::collections::BTreeMap;

use crate::cli::core::{invalid, CommandError};

/// Positional arguments plus `--name value` options, in input order.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ParsedArgs<'a> {
    pub positionals: Vec<&'a str>,
    flags: BTreeMap<&'static str, &'a str>,
}

impl<'a> ParsedArgs<'a> {
    pub fn flag(&self, name: &str) -> Option<&'a str> {
        self.flags.get(name).copied()
    }

    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }
}

/// Splits `--name value` and `--name=value` options out of `args`.
///
/// Options outside `allowed` are rejected; a repeated option keeps the last value.
pub(crate) fn parse_args<'a>(
    args: &[&'a str],
    allowed: &[&'static str],
) -> Result<ParsedArgs<'a>, CommandError> {
    let mut parsed = ParsedArgs::default();
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        let Some(option) = arg.strip_prefix("--") else {
            parsed.positionals.push(arg);
            continue;
        };
        let (name, inline) = match option.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (option, None),
        };
        let key = allowed
            .iter()
            .copied()
            .find(|candidate| candidate.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                if allowed.is_empty() {
                    invalid(format!("unexpected option `--{}`", name))
                } else {
                    invalid(format!(
                        "unknown option `--{}` (expected one of: {})",
                        name,
                        allowed
                            .iter()
                            .map(|flag| format!("--{}", flag))
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))
                }
            })?;
        let value = match inline {
            Some(value) => value,
            None => iter
                .next()
                .ok_or_else(|| invalid(format!("option `--{}` needs a value", key)))?,
        };
        parsed.flags.insert(key, value);
    }
    Ok(parsed)
}
