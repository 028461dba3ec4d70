//! Text front end.
//!
//! Reads one command per line and prints the board after every change.
//!
//! ## Commands
//!
//! - `D4`, `play D4` - Place a stone at a vertex
//! - `3 4`, `play 3 4` - Place a stone at zero-based `(col, row)`
//! - `pass`, `p` - Pass
//! - `show` - Print the board again
//! - `help` - List commands
//! - `quit`, `q` - Leave the game
//!
//! ## Example
//!
//! ```ignore
//! use tengen::config::GameConfig;
//! use tengen::console::Console;
//! use tengen::game::Game;
//!
//! let game = Game::new(&GameConfig::default())?;
//! let stdin = std::io::stdin();
//! Console::new(game, stdin.lock(), std::io::stdout()).run()?;
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::board::{parse_vertex, vertex_name};
use crate::game::{Game, Intent, Outcome, Step};
use crate::rules::Score;

const HELP: &str = "commands: <vertex> | play <vertex> | play <col> <row> | pass (p) | show \
                    | help (?) | quit (q, exit)";

/// A parsed console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Show,
    Help,
}

/// Parse one input line for a board of `size`.
pub fn parse_command(line: &str, size: usize) -> Result<Command, String> {
    let parts: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    let args: Vec<&str> = parts.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["pass"] | ["p"] => Ok(Command::Intent(Intent::Pass)),
        ["quit"] | ["q"] | ["exit"] => Ok(Command::Intent(Intent::Quit)),
        ["show"] => Ok(Command::Show),
        ["help"] | ["?"] => Ok(Command::Help),
        ["play"] => Err("missing vertex".to_string()),
        ["play", vertex] | [vertex] => parse_vertex(vertex, size)
            .map(|pt| Command::Intent(Intent::Place(pt)))
            .ok_or_else(|| format!("invalid vertex: {vertex}")),
        ["play", col, row] | [col, row] => match (col.parse::<usize>(), row.parse::<usize>()) {
            // Off-board numbers go through so the rules report them
            (Ok(c), Ok(r)) => Ok(Command::Intent(Intent::Place((c, r)))),
            _ => Err(format!("invalid coordinates: {col} {row}")),
        },
        _ => Err(format!("unknown command: {line}")),
    }
}

pub struct Console<R, W> {
    game: Game,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(game: Game, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    /// Run until the game ends, the player quits or input runs out.
    ///
    /// Returns the final score when the game reached its end.
    pub fn run(&mut self) -> Result<Option<Score>> {
        self.draw()?;

        let mut line = String::new();
        while !self.game.is_over() {
            line.clear();
            let read = self.input.read_line(&mut line).context("failed to read input")?;
            if read == 0 {
                break;
            }

            // Skip empty lines and comments
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match parse_command(trimmed, self.game.board().size()) {
                Ok(Command::Intent(intent)) => {
                    let step = self.game.handle(intent);
                    if step.outcome == Outcome::Quit {
                        break;
                    }
                    self.report(&step)?;
                }
                Ok(Command::Show) => self.draw()?,
                Ok(Command::Help) => writeln!(self.output, "{HELP}")?,
                Err(msg) => writeln!(self.output, "? {msg}")?,
            }
            self.output.flush()?;
        }

        let result = self.game.result();
        if let Some(score) = result {
            self.final_report(&score)?;
        }
        self.output.flush().context("failed to flush output")?;
        Ok(result)
    }

    fn report(&mut self, step: &Step) -> Result<()> {
        let rejected = matches!(step.outcome, Outcome::Rejected(_));
        describe(&mut self.output, &step.outcome)?;
        if let Some(reply) = &step.reply {
            describe(&mut self.output, reply)?;
        }
        if !rejected {
            self.draw()?;
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let snap = self.game.snapshot();
        write!(self.output, "\n{}", snap.board)?;
        writeln!(
            self.output,
            "Black's Prisoners: {}     White's Prisoners: {}",
            snap.prisoners.black, snap.prisoners.white
        )?;
        if !snap.is_over() {
            writeln!(
                self.output,
                "{} to move. Enter a vertex to place a stone, `pass` to pass.",
                snap.to_move
            )?;
        }
        Ok(())
    }

    fn final_report(&mut self, score: &Score) -> Result<()> {
        writeln!(self.output, "Game Over!")?;
        writeln!(self.output, "Black's Score: {}", score.black)?;
        writeln!(self.output, "White's Score: {}", score.white)?;
        match score.winner() {
            Some(color) => writeln!(self.output, "{color} wins!")?,
            None => writeln!(self.output, "It's a tie!")?,
        }
        Ok(())
    }
}

fn describe(out: &mut impl Write, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Placed {
            color,
            point,
            captured,
        } => {
            write!(out, "{color} plays {}", vertex_name(*point))?;
            if *captured > 0 {
                write!(out, ", capturing {captured}")?;
            }
            writeln!(out)?;
        }
        Outcome::Rejected(err) => writeln!(out, "? {err}")?,
        Outcome::Passed(color) => writeln!(out, "{color} passes")?,
        Outcome::Finished => writeln!(out, "? the game is over")?,
        Outcome::Quit => {}
    }
    Ok(())
}
