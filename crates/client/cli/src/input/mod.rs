//! Line-oriented command parsing.

use thiserror::Error;
use valley_core::{NodeId, PendingDecision, PlayerId};

/// One line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Roll,
    /// Move to a node by number (`0` is the hub).
    Move(NodeId),
    /// List the legal destinations.
    Moves,
    Preview,
    Select,
    Start,
    Chance,
    /// Delegate the task here to a seat (1-based on input).
    Transfer(PlayerId),
    /// List players the task here may be delegated to.
    Targets,
    Resolve(PendingDecision),
    End,
    Status,
    Weather,
    /// Tasks owned by the active player.
    Tasks,
    /// Sub-steps of the task on the active player's node.
    Steps,
    Players,
    Save,
    Load(u64),
    Saves,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("seats are numbered from 1")]
    ZeroSeat,
}

pub const HELP: &str = "\
commands:
  roll                 roll the dice
  moves                list reachable nodes
  move <n>             move to node n (0 = hub)
  preview              fee for the task here
  select               select the task here
  start                start working on the task here
  chance               open the chance square here
  targets              players the task here can be delegated to
  transfer <seat>      delegate the task here
  accept | decline     resolve the next delegated task
  end                  end the turn
  status | weather | tasks | steps | players
  save | saves | load <nonce>
  help | quit";

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let arg = words.next();

        let command = match head.to_ascii_lowercase().as_str() {
            "roll" | "r" => Command::Roll,
            "move" | "m" => Command::Move(NodeId(number(arg, "move", "a node number")?)),
            "moves" => Command::Moves,
            "preview" | "p" => Command::Preview,
            "select" | "s" => Command::Select,
            "start" => Command::Start,
            "chance" | "c" => Command::Chance,
            "transfer" | "t" => {
                let seat: u8 = number(arg, "transfer", "a seat number")?;
                let index = seat.checked_sub(1).ok_or(ParseError::ZeroSeat)?;
                Command::Transfer(PlayerId(index))
            }
            "targets" => Command::Targets,
            "accept" | "yes" => Command::Resolve(PendingDecision::Accept),
            "decline" | "no" => Command::Resolve(PendingDecision::Decline),
            "end" | "e" => Command::End,
            "status" => Command::Status,
            "weather" => Command::Weather,
            "tasks" => Command::Tasks,
            "steps" => Command::Steps,
            "players" => Command::Players,
            "save" => Command::Save,
            "load" => Command::Load(number(arg, "load", "a save nonce")?),
            "saves" => Command::Saves,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }
}

fn number<T: std::str::FromStr>(
    arg: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<T, ParseError> {
    let arg = arg.ok_or(ParseError::MissingArgument { command, expected })?;
    arg.parse()
        .map_err(|_| ParseError::InvalidNumber(arg.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(Command::parse("move 4"), Ok(Some(Command::Move(NodeId(4)))));
        assert_eq!(Command::parse("  M 0 "), Ok(Some(Command::Move(NodeId::HUB))));
        assert_eq!(
            Command::parse("transfer 2"),
            Ok(Some(Command::Transfer(PlayerId(1))))
        );
        assert_eq!(
            Command::parse("decline"),
            Ok(Some(Command::Resolve(PendingDecision::Decline)))
        );
        assert_eq!(Command::parse("load 12"), Ok(Some(Command::Load(12))));
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            Command::parse("move"),
            Err(ParseError::MissingArgument {
                command: "move",
                expected: "a node number"
            })
        );
        assert_eq!(
            Command::parse("move north"),
            Err(ParseError::InvalidNumber("north".into()))
        );
        assert_eq!(Command::parse("transfer 0"), Err(ParseError::ZeroSeat));
        assert_eq!(Command::parse("fly"), Err(ParseError::Unknown("fly".into())));
    }
}
