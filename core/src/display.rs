//! Boundary between the rules engine and whatever draws it.
//!
//! The board reaches a renderer only as a 128-character string, and input
//! comes back as a raw coordinate that is scaled down to a board square.

use crate::board::Board;
use crate::error::{GameError, Result};
use crate::types::{Color, Piece, PieceKind, Position, BOARD_SIZE};

/// Length of an encoded board: two characters per square.
pub const ENCODED_LEN: usize = 128;

/// Occupancy digit for an empty square.
const EMPTY_CODE: u8 = 2;

/// Encodes the board rank by rank, file inner.
///
/// Each square is two digits: the color code of a live piece (`0` Black,
/// `1` White) or `2` for an empty square, then the kind code.
pub fn encode_board(board: &Board) -> String {
    let mut encoded = String::with_capacity(ENCODED_LEN);

    for position in Position::all() {
        let piece = board.piece_at(position);
        let occupancy = if piece.is_alive() {
            piece.color() as u8
        } else {
            EMPTY_CODE
        };
        encoded.push((b'0' + occupancy) as char);
        encoded.push((b'0' + piece.kind().code()) as char);
    }

    encoded
}

/// Decodes a string produced by [`encode_board`].
/// Empty squares come back as dead pieces of the encoded kind.
pub fn decode_board(encoded: &str) -> Result<Board> {
    let bytes = encoded.as_bytes();
    if bytes.len() != ENCODED_LEN {
        return Err(GameError::BoardLength(encoded.chars().count()));
    }

    let mut board = Board::empty();
    for (index, (position, pair)) in Position::all().zip(bytes.chunks_exact(2)).enumerate() {
        let kind = pair[1]
            .checked_sub(b'0')
            .and_then(PieceKind::from_code)
            .ok_or(GameError::BoardCode {
                index,
                code: pair[1] as char,
            })?;

        let piece = match pair[0] {
            b'0' => Piece::new(Color::Black, kind),
            b'1' => Piece::new(Color::White, kind),
            b'2' => Piece::dead(Color::Black, kind),
            other => {
                return Err(GameError::BoardCode {
                    index,
                    code: other as char,
                })
            }
        };
        board.set_piece(position, piece);
    }

    Ok(board)
}

/// Pixel size of the drawing surface, used to map clicks to squares.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayGeometry {
    pub width: u32,
    pub height: u32,
}

impl DisplayGeometry {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if the coordinate falls on the drawing surface.
    pub const fn contains(self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Scales a coordinate down to a board square by integer division
    /// against the size of one square. Coordinates off the surface map off
    /// the board; filtering them is the caller's job.
    pub fn position_at(self, x: u32, y: u32) -> Position {
        let cell_width = (self.width / BOARD_SIZE as u32).max(1);
        let cell_height = (self.height / BOARD_SIZE as u32).max(1);
        let file = (x / cell_width).min(i8::MAX as u32) as i8;
        let rank = (y / cell_height).min(i8::MAX as u32) as i8;
        Position::new(file, rank)
    }
}

impl Default for DisplayGeometry {
    /// An 800x800 canvas.
    fn default() -> Self {
        Self::new(800, 800)
    }
}
