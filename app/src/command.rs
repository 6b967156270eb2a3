//! Line commands typed at the prompt.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a todo with this title right away.
    Add(String),
    /// Replace the pending input text.
    Draft(String),
    /// Create a todo from the pending input text.
    Submit,
    Toggle(usize),
    Done(usize),
    Undo(usize),
    Delete(usize),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs a row number")]
    MissingRow(&'static str),
    #[error("`{0}` is not a row number")]
    BadRow(String),
}

pub const HELP: &str = "\
commands:
  add <title>    create a todo
  draft <text>   set the pending input
  submit         create a todo from the pending input
  toggle <n>     mark row n complete/incomplete
  done <n>       mark row n complete
  undo <n>       mark row n incomplete
  delete <n>     delete row n
  reload         fetch the full list again
  help           show this text
  quit           exit";

/// Parse one input line. Returns `Ok(None)` for blank lines.
///
/// Text after `add` and `draft` is taken verbatim, so `add` alone creates a
/// todo with an empty title.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" | "a" => Command::Add(rest.to_string()),
        "draft" => Command::Draft(rest.to_string()),
        "submit" => Command::Submit,
        "toggle" | "t" => Command::Toggle(row("toggle", rest)?),
        "done" => Command::Done(row("done", rest)?),
        "undo" => Command::Undo(row("undo", rest)?),
        "delete" | "del" | "rm" => Command::Delete(row("delete", rest)?),
        "reload" | "r" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn row(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingRow(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadRow(arg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn add_keeps_title_verbatim() {
        assert_eq!(parse("add Buy  milk "), Ok(Some(Command::Add("Buy  milk".to_string()))));
        assert_eq!(parse("add"), Ok(Some(Command::Add(String::new()))));
    }

    #[test]
    fn row_commands_take_one_based_numbers() {
        assert_eq!(parse("toggle 2"), Ok(Some(Command::Toggle(2))));
        assert_eq!(parse("DEL 1"), Ok(Some(Command::Delete(1))));
        assert_eq!(parse("done 0"), Err(CommandError::BadRow("0".to_string())));
        assert_eq!(parse("undo x"), Err(CommandError::BadRow("x".to_string())));
        assert_eq!(parse("delete"), Err(CommandError::MissingRow("delete")));
    }

    #[test]
    fn unknown_word_is_reported() {
        assert_eq!(parse("frobnicate 3"), Err(CommandError::Unknown("frobnicate".to_string())));
    }
}
