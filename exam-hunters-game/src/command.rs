//! Text command surface: parsing, player-facing errors and help.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actions::{ActionKind, CATALOG};

/// A validated player command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Act {
        kind: ActionKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
    Status,
    Time,
    Help,
    Quit,
}

/// Rejected input. The `Display` text is shown to the player as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Please enter a command. Type 'help' for options.")]
    Empty,
    #[error("Unknown command: '{0}'. Type 'help' for available commands.")]
    Unknown(String),
    #[error("{}", missing_argument_hint(.kind))]
    MissingArgument { kind: ActionKind },
}

fn missing_argument_hint(kind: &ActionKind) -> &'static str {
    kind.definition()
        .example
        .unwrap_or("This command needs more detail.")
}

/// Parse one line of player input. Matching is case-insensitive.
///
/// # Errors
///
/// Returns [`CommandError`] for blank input, an unrecognised first word, or
/// a `study`/`call`/`meet` without its subject or friend.
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let lowered = input.trim().to_lowercase();
    let mut tokens = lowered.split_whitespace();
    let Some(name) = tokens.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = tokens.collect();

    match name {
        "status" => Ok(Command::Status),
        "time" => Ok(Command::Time),
        "help" => Ok(Command::Help),
        "quit" => Ok(Command::Quit),
        other => {
            let kind = other
                .parse::<ActionKind>()
                .map_err(|()| CommandError::Unknown(other.to_string()))?;
            let rule = kind.definition().argument;
            let target = rule.normalize(&args);
            if rule.is_required() && target.is_none() {
                return Err(CommandError::MissingArgument { kind });
            }
            Ok(Command::Act { kind, target })
        }
    }
}

/// Static command reference shown by `help`.
#[must_use]
pub fn help_text() -> String {
    let mut out = String::from("Available commands:\n");
    let queries = [
        ("status", "Check your current stats"),
        ("time", "Check current time"),
        ("help", "Show this list"),
        ("quit", "Exit the game"),
    ];
    let lines = CATALOG
        .iter()
        .map(|def| (def.usage, def.summary))
        .chain(queries);
    for (usage, summary) in lines {
        out.push_str(&format!("- {usage:<17} ({summary})\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions_case_insensitively() {
        assert_eq!(
            parse_command("  STUDY Organic   Chemistry "),
            Ok(Command::Act {
                kind: ActionKind::Study,
                target: Some("organic chemistry".to_string()),
            })
        );
        assert_eq!(
            parse_command("Call ALEX later"),
            Ok(Command::Act {
                kind: ActionKind::Call,
                target: Some("Alex".to_string()),
            })
        );
        assert_eq!(
            parse_command("rest now"),
            Ok(Command::Act {
                kind: ActionKind::Rest,
                target: None,
            })
        );
        assert_eq!(parse_command("Status"), Ok(Command::Status));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn missing_arguments_explain_usage() {
        let err = parse_command("study").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please specify a subject to study. Example: 'study math'"
        );
        let err = parse_command("meet   ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please specify who to meet. Example: 'meet alex'"
        );
        assert_eq!(
            parse_command("call").unwrap_err(),
            CommandError::MissingArgument {
                kind: ActionKind::Call
            }
        );
    }

    #[test]
    fn blank_and_unknown_input_are_rejected() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("Dance wildly").unwrap_err().to_string(),
            "Unknown command: 'dance'. Type 'help' for available commands."
        );
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_text();
        for kind in ActionKind::ALL {
            assert!(help.contains(kind.definition().usage), "missing {kind}");
        }
        for query in ["status", "time", "quit"] {
            assert!(help.contains(query));
        }
        assert!(help.contains("- meet [friend]     (Uses 2 actions"));
    }
}
