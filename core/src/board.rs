//! Array-based board representation.
//! Rank-major 8x8 grid; ranks 0-1 hold Black's pieces at the start and ranks
//! 6-7 hold White's.

use crate::types::*;

/// Back-rank layout shared by both colors, file 0 to file 7.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    /// Indexed `[rank][file]`.
    squares: [[Piece; 8]; 8],
}

impl Board {
    /// Creates a board with every square empty.
    pub const fn empty() -> Self {
        Self {
            squares: [[Piece::empty(); 8]; 8],
        }
    }

    /// Creates the starting position.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();

        for color in Color::ALL {
            for (file, &kind) in BACK_RANK.iter().enumerate() {
                board.set_piece(
                    Position::new(file as i8, color.back_rank()),
                    Piece::new(color, kind),
                );
                board.set_piece(
                    Position::new(file as i8, color.pawn_rank()),
                    Piece::new(color, PieceKind::Pawn),
                );
            }
        }

        board
    }

    /// Gets the piece at the given position.
    /// Panics if the position is off the board.
    pub fn piece_at(&self, position: Position) -> Piece {
        debug_assert!(position.is_on_board(), "off-board query {:?}", position);
        self.squares[position.rank() as usize][position.file() as usize]
    }

    /// Overwrites the given square.
    pub(crate) fn set_piece(&mut self, position: Position, piece: Piece) {
        debug_assert!(position.is_on_board(), "off-board write {:?}", position);
        self.squares[position.rank() as usize][position.file() as usize] = piece;
    }

    /// Marks the piece on the given square dead, keeping its color and kind.
    pub(crate) fn kill(&mut self, position: Position) {
        debug_assert!(position.is_on_board(), "off-board write {:?}", position);
        self.squares[position.rank() as usize][position.file() as usize].kill();
    }

    /// Promotes the piece on the given square to a queen.
    pub(crate) fn promote(&mut self, position: Position) {
        debug_assert!(position.is_on_board(), "off-board write {:?}", position);
        self.squares[position.rank() as usize][position.file() as usize].promote();
    }

    /// Returns true if no live piece stands on the given square.
    pub fn is_empty(&self, position: Position) -> bool {
        !self.piece_at(position).is_alive()
    }

    /// Returns true if the given square contains a live piece of the given color.
    pub fn is_color(&self, position: Position, color: Color) -> bool {
        self.piece_at(position).is_owned_by(color)
    }

    /// Returns true if the given square contains a live enemy of `color`.
    pub fn is_enemy(&self, position: Position, color: Color) -> bool {
        self.piece_at(position).is_enemy_of(color)
    }

    /// Returns every square holding a live piece of the given color,
    /// rank outer, file inner.
    pub fn positions_of(&self, color: Color) -> Vec<Position> {
        Position::all().filter(|&p| self.is_color(p, color)).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}
