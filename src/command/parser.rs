//! Line protocol parser.
//!
//! One command per line, whitespace-separated tokens, verbs
//! case-insensitive. Arity is exact.

use crate::error::CommandError;
use crate::models::Tick;

/// A parsed protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET_DEADLINE <tick>`
    SetDeadline(Tick),
    /// `SUBMIT <id> <estimated_cost> <arrival_time>`
    Submit {
        id: String,
        estimated_cost: u64,
        arrival_time: Tick,
    },
    /// `PROCESS`
    Process,
    /// `STATUS`
    Status,
    /// `TICK <delta>`
    Tick(u64),
    /// `STATS`
    Stats,
    /// `EXIT`
    Exit,
}

/// Parses one input line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut tokens = line.split_whitespace();
    let verb = tokens.next().unwrap_or("").to_ascii_uppercase();
    let args: Vec<&str> = tokens.collect();

    match verb.as_str() {
        "SET_DEADLINE" => {
            expect_args(&verb, &args, 1)?;
            Ok(Command::SetDeadline(number(&verb, "deadline", args[0])?))
        }
        "SUBMIT" => {
            expect_args(&verb, &args, 3)?;
            Ok(Command::Submit {
                id: args[0].to_string(),
                estimated_cost: number(&verb, "estimated cost", args[1])?,
                arrival_time: number(&verb, "arrival time", args[2])?,
            })
        }
        "PROCESS" => expect_args(&verb, &args, 0).map(|_| Command::Process),
        "STATUS" => expect_args(&verb, &args, 0).map(|_| Command::Status),
        "STATS" => expect_args(&verb, &args, 0).map(|_| Command::Stats),
        "TICK" => {
            expect_args(&verb, &args, 1)?;
            Ok(Command::Tick(number(&verb, "delta", args[0])?))
        }
        // Only a bare EXIT ends the session; anything after it is not a command.
        "EXIT" if args.is_empty() => Ok(Command::Exit),
        _ => Err(CommandError::Unknown(verb)),
    }
}

fn expect_args(verb: &str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CommandError::malformed(
            verb,
            format!("expected {expected} arguments, got {}", args.len()),
        ))
    }
}

fn number<T: std::str::FromStr>(verb: &str, field: &str, raw: &str) -> Result<T, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::malformed(verb, format!("{field} '{raw}' is not a valid number")))
}
