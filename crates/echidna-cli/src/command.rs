//! Session command parsing.
//!
//! Anything that is not a recognized command word is treated as a move in
//! standard algebraic notation and resolved against the current position.

use echidna_board::Color;

/// Engine depth limits exposed to the user.
pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 6;

/// A parsed line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `new` -- reset to the starting position.
    NewGame,
    /// `depth <n>` -- set the engine's search depth.
    Depth(u8),
    /// `play white|black` -- choose the human side.
    Play(Color),
    /// `moves` -- list the legal moves in SAN.
    ShowMoves,
    /// `help` -- print the command summary.
    Help,
    /// `quit` -- end the session.
    Quit,
    /// Anything else: a SAN move for the session to resolve.
    Move(String),
}

/// A line that looked like a command but had bad arguments.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    /// `depth` without a value, or with a non-numeric one.
    #[error("usage: depth <{MIN_DEPTH}-{MAX_DEPTH}>")]
    InvalidDepth,

    /// `depth` with a value outside the supported range.
    #[error("depth {depth} is out of range ({MIN_DEPTH}-{MAX_DEPTH})")]
    DepthOutOfRange {
        /// The rejected depth.
        depth: u8,
    },

    /// `play` without `white` or `black`.
    #[error("usage: play white|black")]
    InvalidColor,
}

/// Parse a single line of session input into a [`Command`].
///
/// An empty line parses as [`Command::Help`]; a lone word that is not a
/// command is assumed to be a move.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&first) = tokens.first() else {
        return Ok(Command::Help);
    };

    match first {
        "new" => Ok(Command::NewGame),
        "moves" => Ok(Command::ShowMoves),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "depth" => parse_depth(tokens.get(1)),
        "play" => parse_color(tokens.get(1)),
        _ => Ok(Command::Move(first.to_string())),
    }
}

fn parse_depth(token: Option<&&str>) -> Result<Command, CommandError> {
    let depth: u8 = token
        .and_then(|value| value.parse().ok())
        .ok_or(CommandError::InvalidDepth)?;
    if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        return Err(CommandError::DepthOutOfRange { depth });
    }
    Ok(Command::Depth(depth))
}

fn parse_color(token: Option<&&str>) -> Result<Command, CommandError> {
    match token {
        Some(&"white") => Ok(Command::Play(Color::White)),
        Some(&"black") => Ok(Command::Play(Color::Black)),
        _ => Err(CommandError::InvalidColor),
    }
}
