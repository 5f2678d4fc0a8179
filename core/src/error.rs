//! Error types for the rules engine.
//!
//! The turn executor itself never fails; these errors come from the checks a
//! caller runs before handing it a move, and from parsing text input.

use crate::types::{Color, Move, Position};
use thiserror::Error;

/// Errors produced while validating input for the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Mode selector outside {0, 1, 2} or an unknown mode name.
    #[error("unknown game mode: {0}")]
    UnknownMode(String),

    /// Square text that is not a file letter followed by a rank digit.
    #[error("invalid square: {0:?} (expected a1-h8)")]
    InvalidSquare(String),

    /// Move text that is not two squares.
    #[error("invalid move: {0:?} (expected e.g. e2e4)")]
    InvalidMoveText(String),

    /// Origin square holds no live piece.
    #[error("no piece at {0}")]
    NoPieceAt(Position),

    /// Origin square holds a piece of the side not to move.
    #[error("piece at {position} belongs to {owner:?}, {to_move:?} is to move")]
    NotYourPiece {
        position: Position,
        owner: Color,
        to_move: Color,
    },

    /// Destination is not generated for the piece at the origin.
    #[error("illegal destination for {0}")]
    IllegalDestination(Move),

    /// Moves were supplied after one that ended the game.
    #[error("the game ended with {0}, no further moves can be played")]
    GameOver(Move),

    /// Board string is not 128 digit characters.
    #[error("board string must be 128 characters, got {0}")]
    BoardLength(usize),

    /// Board string holds a character outside the encoding.
    #[error("bad board code {code:?} at square {index}")]
    BoardCode { index: usize, code: char },
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, GameError>;
