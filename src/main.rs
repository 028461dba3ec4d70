//! Tengen: Go against a Monte Carlo opponent in the terminal.
//!
//! ## Usage
//!
//! - `tengen` - Play Black against the engine
//! - `tengen play --hot-seat` - Two players at one keyboard
//! - `tengen demo` - Random Black moves against the engine

use std::io;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tengen::board::Color;
use tengen::config::{GameConfig, Opponent};
use tengen::console::Console;
use tengen::constants::{DEFAULT_BOARD_SIZE, DEFAULT_ITERATIONS};
use tengen::game::{Game, Intent, Outcome};
use tengen::rules::legal_moves;

/// Tengen: a small Go engine with a Monte Carlo opponent
#[derive(Parser)]
#[command(name = "tengen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game on the console
    Play(PlayArgs),
    /// Play seeded random Black moves against the engine
    Demo {
        #[command(flatten)]
        game: GameArgs,
        /// Maximum number of Black moves
        #[arg(long, default_value_t = 200)]
        moves: usize,
    },
}

#[derive(Args, Default)]
struct PlayArgs {
    #[command(flatten)]
    game: GameArgs,
    /// Let a second player enter White's moves
    #[arg(long)]
    hot_seat: bool,
}

#[derive(Args)]
struct GameArgs {
    /// Board size (NxN)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    /// Search iterations per engine move
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
    /// Seed for the engine's playouts
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for GameArgs {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

impl GameArgs {
    fn config(&self, opponent: Opponent) -> GameConfig {
        GameConfig {
            board_size: self.size,
            iterations: self.iterations,
            seed: self.seed,
            opponent,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => run_console(&args),
        None => run_console(&PlayArgs::default()),
        Some(Commands::Demo { game, moves }) => run_demo(&game, moves),
    }
}

fn run_console(args: &PlayArgs) -> Result<()> {
    let opponent = if args.hot_seat {
        Opponent::Human
    } else {
        Opponent::Engine
    };
    let game = Game::new(&args.game.config(opponent))?;

    let stdin = io::stdin();
    let mut console = Console::new(game, stdin.lock(), io::stdout());
    console.run()?;
    Ok(())
}

fn run_demo(args: &GameArgs, moves: usize) -> Result<()> {
    let config = args.config(Opponent::Engine);
    let mut game = Game::new(&config)?;
    let mut rng = match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(1)),
        None => fastrand::Rng::new(),
    };

    println!("Tengen demo: random Black vs engine on {0}x{0}\n", config.board_size);

    for _ in 0..moves {
        if game.is_over() {
            break;
        }
        debug_assert_eq!(game.to_move(), Color::Black);

        let candidates = legal_moves(game.board());
        let step = match rng.choice(candidates.iter()) {
            Some(&pt) => {
                let step = game.handle(Intent::Place(pt));
                if matches!(step.outcome, Outcome::Rejected(_)) {
                    // Suicide point; let Black pass instead
                    game.handle(Intent::Pass)
                } else {
                    step
                }
            }
            None => game.handle(Intent::Pass),
        };
        println!("{:?} / {:?}", step.outcome, step.reply);
    }

    println!("\n{}", game.board());
    let prisoners = game.prisoners();
    println!("Black's Prisoners: {}     White's Prisoners: {}", prisoners.black, prisoners.white);
    match game.result() {
        Some(score) => {
            println!("Black's Score: {}\nWhite's Score: {}", score.black, score.white);
            match score.winner() {
                Some(color) => println!("{color} wins!"),
                None => println!("It's a tie!"),
            }
        }
        None => println!("Stopped after {moves} moves"),
    }
    Ok(())
}
