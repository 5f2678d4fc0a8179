pub mod negamax;
pub mod search;

use kingfall_core::{GameState, Move};

/// Core trait for automated players
pub trait Agent {
    /// Get the move to play in the current position, if any exists
    fn best_move(&mut self, state: &GameState) -> Option<Move>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use negamax::NegamaxAgent;
pub use search::*;
