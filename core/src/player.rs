//! Per-color index of live piece positions.
//!
//! The cache lets "all moves for the side to move" skip a full board scan.
//! Only [`GameState`](crate::GameState) mutates it, in lockstep with the board.

use crate::types::*;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Player {
    color: Color,
    /// Material value of the enemy pieces this player has captured.
    score: i32,
    positions: Vec<Position>,
}

impl Player {
    /// Creates a player owning its 16 home squares, rank outer, file inner.
    pub fn new(color: Color) -> Self {
        let ranks = match color {
            Color::Black => [0, 1],
            Color::White => [6, 7],
        };
        let positions = ranks
            .iter()
            .flat_map(|&rank| (0..BOARD_SIZE).map(move |file| Position::new(file, rank)))
            .collect();

        Self {
            color,
            score: 0,
            positions,
        }
    }

    /// Creates a player with no pieces.
    pub fn empty(color: Color) -> Self {
        Self {
            color,
            score: 0,
            positions: Vec::with_capacity(16),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Positions of this player's live pieces.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn owns(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    pub(crate) fn add(&mut self, position: Position) {
        if !self.owns(position) {
            self.positions.push(position);
        }
    }

    /// Drops a captured piece's position.
    pub(crate) fn kill_piece(&mut self, position: Position) {
        if let Some(i) = self.positions.iter().position(|&p| p == position) {
            self.positions.remove(i);
        }
    }

    /// Replaces the moved piece's origin with its destination, in place.
    pub(crate) fn update_position(&mut self, mv: Move) {
        if let Some(slot) = self.positions.iter_mut().find(|p| **p == mv.from) {
            *slot = mv.to;
        }
    }

    pub(crate) fn add_score(&mut self, value: i32) {
        self.score += value;
    }
}
