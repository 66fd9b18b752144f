use crate::history::EditHistory;
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};

/// One line of a history script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Push(String),
    Edit(String),
    Undo,
    Redo,
    Peek,
    Status,
}

/// Parses a single script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let trimmed = line.trim();

    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, Some(rest.trim_start())),
        None => (trimmed, None),
    };

    let command = match (keyword.to_ascii_lowercase().as_str(), rest) {
        ("push", Some(text)) => Command::Push(text.to_string()),
        ("edit", Some(text)) => Command::Edit(text.to_string()),
        ("push" | "edit", None) => bail!("'{}' needs a value", keyword),
        ("pop" | "undo", None) => Command::Undo,
        ("unpop" | "redo", None) => Command::Redo,
        ("peek", None) => Command::Peek,
        ("status", None) => Command::Status,
        ("pop" | "undo" | "unpop" | "redo" | "peek" | "status", Some(_)) => {
            bail!("'{}' takes no arguments", keyword)
        }
        _ => bail!("unknown command '{}'", keyword),
    };

    Ok(Some(command))
}

/// Applies `command` and returns the line to report, if any.
pub fn apply(history: &mut EditHistory<String>, command: Command) -> Option<String> {
    match command {
        Command::Push(text) => {
            history.push(text);
            None
        }
        Command::Edit(text) => {
            history.edit(text);
            None
        }
        Command::Undo => Some(
            history
                .undo()
                .cloned()
                .unwrap_or_else(|| "(nothing to undo)".to_string()),
        ),
        Command::Redo => Some(
            history
                .redo()
                .cloned()
                .unwrap_or_else(|| "(nothing to redo)".to_string()),
        ),
        Command::Peek => Some(
            history
                .peek()
                .cloned()
                .unwrap_or_else(|| "(empty)".to_string()),
        ),
        Command::Status => Some(format!(
            "undo={} redo={} capacity={}",
            history.undo_amount(),
            history.redo_amount(),
            history.capacity()
        )),
    }
}

/// Runs every line of `input` against `history`, writing results to `output`.
/// Stops at the first malformed line.
pub fn run_script<R: BufRead, W: Write>(
    history: &mut EditHistory<String>,
    input: R,
    mut output: W,
) -> Result<()> {
    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read script line {}", line_number))?;

        let Some(command) =
            parse_line(&line).with_context(|| format!("Invalid command on line {}", line_number))?
        else {
            continue;
        };

        tracing::debug!(line = line_number, ?command, "applying script command");
        if let Some(report) = apply(history, command) {
            writeln!(output, "{}", report)?;
        }
    }
    Ok(())
}
