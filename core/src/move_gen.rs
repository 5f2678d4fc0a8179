use crate::board::Board;
use crate::game_state::GameState;
use crate::types::{Color, Move, Piece, PieceKind, Position};

/// Most destinations any single piece can have (a centralised queen).
const MAX_DESTINATIONS: usize = 27;

/// Destinations of a single piece, with a fixed capacity to avoid allocations.
#[derive(Clone, Copy, Debug)]
pub struct Destinations {
    positions: [Position; MAX_DESTINATIONS],
    count: usize,
}

impl Destinations {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self {
            positions: [Position::new(0, 0); MAX_DESTINATIONS],
            count: 0,
        }
    }

    /// Adds a destination to the list.
    fn push(&mut self, position: Position) {
        debug_assert!(self.count < MAX_DESTINATIONS, "Destination list overflow");
        self.positions[self.count] = position;
        self.count += 1;
    }

    /// Returns the number of destinations.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the destinations in generation order.
    pub fn as_slice(&self) -> &[Position] {
        &self.positions[..self.count]
    }

    /// Returns an iterator over the destinations.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.as_slice().contains(&position)
    }
}

impl Default for Destinations {
    fn default() -> Self {
        Self::new()
    }
}

const KNIGHT_DIRS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-2, 1),
    (-2, -1),
    (-1, 2),
    (-1, -2),
];
const STRAIGHT_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL_DIRS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ALL_DIRS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];
/// Forward step first, then the two capture diagonals.
const BLACK_PAWN_DIRS: [(i8, i8); 3] = [(0, 1), (1, 1), (-1, 1)];
const WHITE_PAWN_DIRS: [(i8, i8); 3] = [(0, -1), (1, -1), (-1, -1)];

/// Returns the (file, rank) deltas a piece moves along.
pub fn directions(piece: Piece) -> &'static [(i8, i8)] {
    match piece.kind() {
        PieceKind::Knight => &KNIGHT_DIRS,
        PieceKind::Rook => &STRAIGHT_DIRS,
        PieceKind::Bishop => &DIAGONAL_DIRS,
        PieceKind::King | PieceKind::Queen => &ALL_DIRS,
        PieceKind::Pawn => match piece.color() {
            Color::Black => &BLACK_PAWN_DIRS,
            Color::White => &WHITE_PAWN_DIRS,
        },
    }
}

/// Generates the destinations the piece at `origin` may reach.
///
/// Pseudo-legal: there is no notion of check. "Enemy" always means the
/// opposite color of the moving piece, never the side to move, so the same
/// generator serves lookahead from either perspective. An empty origin
/// yields no destinations.
pub fn legal_destinations(board: &Board, origin: Position) -> Destinations {
    let mut destinations = Destinations::new();
    let piece = board.piece_at(origin);
    if !piece.is_alive() {
        return destinations;
    }

    for &(df, dr) in directions(piece) {
        if piece.kind() == PieceKind::Pawn {
            follow_pawn_direction(board, origin, piece.color(), df, dr, &mut destinations);
        } else {
            follow_direction(
                board,
                origin,
                piece.color(),
                df,
                dr,
                piece.kind().is_slider(),
                &mut destinations,
            );
        }
    }

    destinations
}

/// Walks one direction, once for stepping pieces and until blocked for sliders.
fn follow_direction(
    board: &Board,
    origin: Position,
    color: Color,
    df: i8,
    dr: i8,
    slide: bool,
    destinations: &mut Destinations,
) {
    let mut current = origin;

    while let Some(next) = current.step(df, dr) {
        if !board.is_empty(next) {
            if board.is_enemy(next, color) {
                destinations.push(next);
            }
            break; // Can't move past any piece
        }

        destinations.push(next);
        if !slide {
            break;
        }
        current = next;
    }
}

fn follow_pawn_direction(
    board: &Board,
    origin: Position,
    color: Color,
    df: i8,
    dr: i8,
    destinations: &mut Destinations,
) {
    let Some(target) = origin.step(df, dr) else {
        return;
    };

    if df == 0 {
        // Straight pushes never capture
        if board.is_empty(target) {
            destinations.push(target);

            if origin.rank() == color.pawn_rank() {
                if let Some(double) = target.step(0, dr) {
                    if board.is_empty(double) {
                        destinations.push(double);
                    }
                }
            }
        }
    } else if board.is_enemy(target, color) {
        destinations.push(target);
    }
}

/// Generates every move for the side to move, walking its position cache.
pub fn generate_moves(state: &GameState) -> Vec<Move> {
    let mut moves = Vec::new();

    for &origin in state.player(state.side_to_move()).positions() {
        for to in legal_destinations(state.board(), origin).iter() {
            moves.push(Move::new(origin, to));
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mode;

    fn pos(file: i8, rank: i8) -> Position {
        Position::new(file, rank)
    }

    fn board_with(pieces: &[(Position, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(position, piece) in pieces {
            board.set_piece(position, piece);
        }
        board
    }

    #[test]
    fn test_starting_position_moves() {
        let state = GameState::new(Mode::BotVBot);
        let moves = generate_moves(&state);

        // 16 pawn moves and 4 knight moves
        assert_eq!(moves.len(), 20);
        assert!(moves.iter().all(|m| state.board().is_color(m.from, Color::White)));
    }

    #[test]
    fn test_white_double_push_from_home() {
        let board = Board::starting_position();
        let destinations = legal_destinations(&board, pos(4, 6));

        assert_eq!(destinations.as_slice(), &[pos(4, 5), pos(4, 4)]);
    }

    #[test]
    fn test_pawn_never_moves_diagonally_to_empty_square() {
        let board = Board::starting_position();
        let destinations = legal_destinations(&board, pos(4, 6));

        assert!(!destinations.contains(pos(5, 5)));
        assert!(!destinations.contains(pos(3, 5)));
    }

    #[test]
    fn test_double_push_gated_by_home_rank() {
        let board = board_with(&[(pos(2, 5), Piece::new(Color::White, PieceKind::Pawn))]);
        let destinations = legal_destinations(&board, pos(2, 5));
        assert_eq!(destinations.as_slice(), &[pos(2, 4)]);

        let board = board_with(&[(pos(2, 2), Piece::new(Color::Black, PieceKind::Pawn))]);
        let destinations = legal_destinations(&board, pos(2, 2));
        assert_eq!(destinations.as_slice(), &[pos(2, 3)]);
    }

    #[test]
    fn test_double_push_needs_both_squares_empty() {
        let pawn = Piece::new(Color::Black, PieceKind::Pawn);
        let blocker = Piece::new(Color::White, PieceKind::Knight);

        let board = board_with(&[(pos(3, 1), pawn), (pos(3, 3), blocker)]);
        assert_eq!(legal_destinations(&board, pos(3, 1)).as_slice(), &[pos(3, 2)]);

        let board = board_with(&[(pos(3, 1), pawn), (pos(3, 2), blocker)]);
        assert!(legal_destinations(&board, pos(3, 1)).is_empty());
    }

    #[test]
    fn test_pawn_captures_only_diagonally() {
        let board = board_with(&[
            (pos(3, 4), Piece::new(Color::White, PieceKind::Pawn)),
            (pos(3, 3), Piece::new(Color::Black, PieceKind::Rook)),
            (pos(4, 3), Piece::new(Color::Black, PieceKind::Bishop)),
            (pos(2, 3), Piece::new(Color::White, PieceKind::Knight)),
        ]);
        let destinations = legal_destinations(&board, pos(3, 4));

        assert_eq!(destinations.as_slice(), &[pos(4, 3)]);
    }

    #[test]
    fn test_rook_stops_at_capture() {
        let board = board_with(&[
            (pos(0, 0), Piece::new(Color::Black, PieceKind::Rook)),
            (pos(0, 3), Piece::new(Color::White, PieceKind::Pawn)),
            (pos(1, 0), Piece::new(Color::Black, PieceKind::Knight)),
        ]);
        let destinations = legal_destinations(&board, pos(0, 0));

        let along_file: Vec<_> = destinations.iter().filter(|p| p.file() == 0).collect();
        assert_eq!(along_file, vec![pos(0, 1), pos(0, 2), pos(0, 3)]);
        // The own knight blocks the rank entirely
        assert_eq!(destinations.len(), 3);
    }

    #[test]
    fn test_slider_stops_before_own_piece() {
        let board = board_with(&[
            (pos(2, 2), Piece::new(Color::White, PieceKind::Bishop)),
            (pos(5, 5), Piece::new(Color::White, PieceKind::Pawn)),
        ]);
        let destinations = legal_destinations(&board, pos(2, 2));

        assert!(destinations.contains(pos(4, 4)));
        assert!(!destinations.contains(pos(5, 5)));
        assert!(!destinations.contains(pos(6, 6)));
        // (3,3) (4,4) + (1,3) (0,4) + (3,1) (4,0) + (1,1) (0,0)
        assert_eq!(destinations.len(), 8);
    }

    #[test]
    fn test_queen_in_open_center() {
        let board = board_with(&[(pos(3, 3), Piece::new(Color::Black, PieceKind::Queen))]);
        assert_eq!(legal_destinations(&board, pos(3, 3)).len(), 27);
    }

    #[test]
    fn test_king_and_knight_step_once() {
        let board = board_with(&[
            (pos(4, 4), Piece::new(Color::White, PieceKind::King)),
            (pos(0, 0), Piece::new(Color::White, PieceKind::Knight)),
        ]);

        assert_eq!(legal_destinations(&board, pos(4, 4)).len(), 8);
        assert_eq!(
            legal_destinations(&board, pos(0, 0)).as_slice(),
            &[pos(2, 1), pos(1, 2)]
        );
    }

    #[test]
    fn test_empty_origin_has_no_destinations() {
        let board = Board::starting_position();
        assert!(legal_destinations(&board, pos(4, 4)).is_empty());
    }

    #[test]
    fn test_enemy_is_relative_to_mover() {
        // A Black pawn may capture a White piece regardless of whose turn it is
        let board = board_with(&[
            (pos(4, 2), Piece::new(Color::Black, PieceKind::Pawn)),
            (pos(5, 3), Piece::new(Color::White, PieceKind::Queen)),
        ]);
        let destinations = legal_destinations(&board, pos(4, 2));

        assert_eq!(destinations.as_slice(), &[pos(4, 3), pos(5, 3)]);
    }

    #[test]
    fn test_destinations_stay_on_board() {
        let kinds = [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ];

        for color in Color::ALL {
            for kind in kinds {
                for origin in Position::all() {
                    let mut board = Board::starting_position();
                    board.set_piece(origin, Piece::new(color, kind));
                    for to in legal_destinations(&board, origin).iter() {
                        assert!(to.is_on_board(), "{:?} {:?} {} -> {:?}", color, kind, origin, to);
                        assert!(!board.is_color(to, color));
                    }
                }
            }
        }
    }
}
