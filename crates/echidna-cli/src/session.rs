//! Interactive game session: human vs engine over a line-based terminal.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use echidna_board::{Board, Color};
use echidna_engine::{MATE_BOUND, MATE_SCORE, Searcher};

use crate::command::{Command, parse_command};
use crate::error::CliError;

const HELP: &str = "\
Enter moves in standard algebraic notation (e4, Nf3, O-O, e8=Q).
Commands:
  new            start a new game
  depth <n>      set engine search depth (1-6)
  play <color>   play as white or black
  moves          list the legal moves
  help           show this message
  quit           leave";

/// One human-vs-engine game over a pair of line-based streams.
///
/// Generic over the streams so tests can drive a whole game through
/// in-memory buffers.
pub struct Session<R, W> {
    input: R,
    out: W,
    board: Board,
    searcher: Searcher,
    human: Color,
    depth: u8,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// A fresh session: starting position, human plays White, depth 2.
    pub fn new(input: R, out: W) -> Session<R, W> {
        Session {
            input,
            out,
            board: Board::starting_position(),
            searcher: Searcher::new(),
            human: Color::White,
            depth: 2,
        }
    }

    /// Run the session until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "echidna chess (type help for commands)")?;
        loop {
            self.show_position()?;

            if let Some(outcome) = self.outcome() {
                writeln!(self.out, "{outcome}")?;
            } else if self.board.side_to_move() != self.human {
                self.engine_move()?;
                continue;
            }

            write!(self.out, "> ")?;
            self.out.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            match parse_command(&line) {
                Ok(Command::Quit) => {
                    writeln!(self.out, "bye")?;
                    break;
                }
                Ok(Command::Help) => writeln!(self.out, "{HELP}")?,
                Ok(Command::NewGame) => {
                    self.board = Board::starting_position();
                    self.searcher.clear_table();
                    info!("new game");
                    writeln!(self.out, "New game.")?;
                }
                Ok(Command::Depth(depth)) => {
                    self.depth = depth;
                    writeln!(self.out, "Engine depth set to {depth}.")?;
                }
                Ok(Command::Play(color)) => {
                    self.human = color;
                    writeln!(self.out, "You play {color}.")?;
                }
                Ok(Command::ShowMoves) => {
                    writeln!(self.out, "Legal moves: {}", self.legal_moves_san())?;
                }
                Ok(Command::Move(san)) => self.human_move(&san)?,
                Err(err) => writeln!(self.out, "{err}")?,
            }
        }
        Ok(())
    }

    fn show_position(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "\n{}", self.board.pretty(self.human))?;
        if self.outcome().is_none() {
            if self.board.in_check() {
                writeln!(self.out, "{} is in check.", self.board.side_to_move())?;
            }
            if self.board.side_to_move() == self.human {
                writeln!(self.out, "Legal moves: {}", self.legal_moves_san())?;
            }
        }
        Ok(())
    }

    fn legal_moves_san(&self) -> String {
        let sans: Vec<String> = self
            .board
            .legal_moves()
            .into_iter()
            .map(|mv| self.board.san(mv))
            .collect();
        sans.join(", ")
    }

    /// Game-over announcement, if the game is over.
    fn outcome(&self) -> Option<String> {
        if self.board.is_checkmate() {
            Some(format!("Checkmate! {} wins.", self.board.side_to_move().opponent()))
        } else if self.board.is_stalemate() {
            Some("Stalemate.".to_string())
        } else if self.board.is_draw() {
            Some("Draw.".to_string())
        } else {
            None
        }
    }

    fn human_move(&mut self, san: &str) -> Result<(), CliError> {
        if self.outcome().is_some() {
            writeln!(self.out, "The game is over; type new to start another.")?;
            return Ok(());
        }
        match self.board.parse_san(san) {
            Ok(mv) => {
                debug!(%mv, "human move");
                self.board = self.board.apply_move(mv);
            }
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(())
    }

    fn engine_move(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "Engine is thinking...")?;
        let result = self.searcher.best_move(&self.board, self.depth)?;
        let san = self.board.san(result.best_move);
        info!(
            best = %san,
            score = result.score,
            nodes = result.nodes,
            "engine move"
        );
        writeln!(self.out, "Engine plays {san} ({}).", describe_score(result.score))?;
        self.board = self.board.apply_move(result.best_move);
        Ok(())
    }
}

/// Human-readable score: pawns for ordinary scores, moves for mates.
fn describe_score(score: i32) -> String {
    if score > MATE_BOUND {
        let plies = MATE_SCORE - score;
        format!("mate in {}", (plies + 1) / 2)
    } else if score < -MATE_BOUND {
        let plies = MATE_SCORE + score;
        format!("mated in {}", (plies + 1) / 2)
    } else {
        format!("{:+.2}", f64::from(score) / 100.0)
    }
}
