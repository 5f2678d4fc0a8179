mod interactive;

use clap::{Parser, Subcommand};
use interactive::{glyph, InteractiveGame};
use kingfall_agents::{Agent, NegamaxAgent, MAX_SIMULATED_TURNS};
use kingfall_core::{
    encode_board, perft, perft_divide, Color, GameError, GameState, Mode, Move, Outcome,
    Position,
};
use std::error::Error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kingfall", version, about = "A king-capture chess variant and its self-play engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play in the terminal
    Play {
        /// 0 / bot-v-bot, 1 / human-v-bot (you are White), 2 / human-v-human
        #[arg(long, default_value = "human-v-bot")]
        mode: Mode,
        /// Seed for the engine's tie-breaks
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let the engine play both sides and print the moves
    Selfplay {
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many half-moves
        #[arg(long, default_value_t = 400)]
        max_turns: u32,
    },
    /// Print the engine's choice after the given moves (e.g. e2e4 e7e5)
    Choose {
        moves: Vec<String>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Count move-tree leaves from the starting position
    Perft { depth: u8 },
    /// Print the board and its display string after the given moves
    Board { moves: Vec<String> },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Play { mode, seed } => {
            let mut game = InteractiveGame::new(mode, agent(seed));
            game.run()?;
        }
        Command::Selfplay { seed, max_turns } => selfplay(agent(seed), max_turns),
        Command::Choose { moves, seed } => {
            let state = replay(&moves)?;
            display_board(&state);

            let start = std::time::Instant::now();
            let result = agent(seed).search(&state);
            let elapsed = start.elapsed();

            match result.best_move {
                Some(best_move) => {
                    println!("Best move: {}", best_move);
                    println!("Score: {}", result.score);
                    println!("Tied candidates: {}", result.ties);
                    println!("Horizon: {} plies", MAX_SIMULATED_TURNS);
                    println!("Nodes: {}", result.nodes);
                    println!("Time: {:.2}s", elapsed.as_secs_f64());
                }
                None => println!("No legal moves available"),
            }
        }
        Command::Perft { depth } => {
            let state = GameState::new(Mode::BotVBot);
            println!("Running perft({})...", depth);

            if depth <= 3 {
                // Show move breakdown for shallow depths
                let mut total = 0;
                for (mv, count) in perft_divide(&state, depth) {
                    println!("{}: {}", mv, count);
                    total += count;
                }
                println!("\nTotal: {}", total);
            } else {
                let start = std::time::Instant::now();
                let nodes = perft(&state, depth);
                let elapsed = start.elapsed();

                println!("Nodes: {}", nodes);
                println!("Time: {:.2}s", elapsed.as_secs_f64());
                println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64());
            }
        }
        Command::Board { moves } => {
            let state = replay(&moves)?;
            display_board(&state);
            println!("{}", encode_board(state.board()));
        }
    }

    Ok(())
}

fn agent(seed: Option<u64>) -> NegamaxAgent {
    match seed {
        Some(seed) => NegamaxAgent::seeded(seed),
        None => NegamaxAgent::from_entropy(),
    }
}

/// Plays validated moves from the starting position.
/// The board is left as it stood after a game-ending move; any moves listed
/// after it are an error.
fn replay<S: AsRef<str>>(moves: &[S]) -> Result<GameState, GameError> {
    let mut state = GameState::new(Mode::HumanVHuman);
    let mut ended_by = None;

    for text in moves {
        if let Some(last) = ended_by {
            return Err(GameError::GameOver(last));
        }

        let mv: Move = text.as_ref().parse()?;
        state.validate_move(mv)?;
        if state.is_game_over(mv) {
            ended_by = Some(mv);
        }
        state.play_turn(mv);
    }

    if let Some(last) = ended_by {
        println!("{} ends the game", last);
    }

    Ok(state)
}

fn selfplay(mut agent: NegamaxAgent, max_turns: u32) {
    let mut state = GameState::new(Mode::BotVBot);
    println!("{} plays both sides", agent.name());

    while state.turn() <= max_turns {
        let result = agent.search(&state);
        let Some(mv) = result.best_move else {
            println!("{} has no moves. Draw.", state.side_to_move().name());
            break;
        };

        let outcome = state.outcome(mv);
        let mover = state.side_to_move();
        state.play_turn(mv);
        println!("{:>3}. {} {} ({})", state.turn() - 1, mover.name(), mv, result.score);

        match outcome {
            Some(Outcome::Win(color)) => {
                display_board(&state);
                println!("{} captures the king and wins.", color.name());
                return;
            }
            Some(Outcome::Draw) => {
                display_board(&state);
                println!("Fifty half-moves without a capture. Draw.");
                return;
            }
            None => {}
        }
    }

    display_board(&state);
}

fn display_board(state: &GameState) {
    println!("\n  a b c d e f g h");
    println!("  ---------------");

    for rank in 0..8 {
        print!("{} ", 8 - rank);

        for file in 0..8 {
            let piece = state.piece_at(Position::new(file, rank));

            if piece.is_alive() {
                print!("{} ", glyph(piece.kind(), piece.color()));
            } else {
                print!(". ");
            }
        }

        println!("| {}", 8 - rank);
    }

    println!("  ---------------");
    println!("  a b c d e f g h\n");

    println!("{} to move", state.side_to_move().name());
    println!("Turn {}", state.turn());
    println!("Moves without capture: {}", state.no_progress());
    println!(
        "Captured material: White {}, Black {}",
        state.player(Color::White).score(),
        state.player(Color::Black).score()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use kingfall_core::{Piece, PieceKind};

    const SCHOLARS_KING_HUNT: [&str; 5] = ["e2e4", "f7f6", "d1h5", "a7a6", "h5e8"];

    #[test]
    fn test_replay_applies_moves() {
        let state = replay(&["e2e4", "e7e5"]).unwrap();
        assert_eq!(state.turn(), 3);
        assert!(state.piece_at("e4".parse().unwrap()).is_alive());
        assert!(state.piece_at("e5".parse().unwrap()).is_alive());
    }

    #[test]
    fn test_replay_stops_at_king_capture() {
        let state = replay(&SCHOLARS_KING_HUNT).unwrap();
        let e8 = "e8".parse().unwrap();

        assert_eq!(state.turn(), 6);
        assert_eq!(state.piece_at(e8), Piece::new(Color::White, PieceKind::Queen));
        assert!(state
            .player(Color::Black)
            .positions()
            .iter()
            .all(|&p| state.piece_at(p).kind() != PieceKind::King));
    }

    #[test]
    fn test_replay_rejects_moves_after_game_over() {
        let mut moves = SCHOLARS_KING_HUNT.to_vec();
        moves.extend(["a6a5", "e8d8"]);

        let capture = Move::new("h5".parse().unwrap(), "e8".parse().unwrap());
        assert_eq!(replay(&moves).unwrap_err(), GameError::GameOver(capture));
    }

    #[test]
    fn test_replay_rejects_illegal_move() {
        assert!(matches!(
            replay(&["e2e5"]),
            Err(GameError::IllegalDestination(_))
        ));
    }
}
