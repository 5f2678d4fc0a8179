//! Complete game state: board, per-color position caches and counters.
//! This module owns the turn executor and the terminal check.

use crate::board::Board;
use crate::error::{GameError, Result};
use crate::move_gen::{legal_destinations, Destinations};
use crate::player::Player;
use crate::types::*;
use tracing::debug;

/// Consecutive captureless half-moves that end the game in a draw.
pub const NO_PROGRESS_LIMIT: u32 = 50;

/// How a terminal move ends the game.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The given color captured the enemy king.
    Win(Color),
    /// Fifty half-moves in a row without a capture.
    Draw,
}

/// Side effects of an applied half-move.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TurnReport {
    pub captured: Option<Piece>,
    pub promoted: bool,
}

/// State of a match.
///
/// The board is the source of truth and the two [`Player`] caches mirror it.
/// Both are private and only change together, through [`GameState::place`],
/// [`GameState::clear`] and [`GameState::play_turn`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState {
    /// 1-based ply counter; `turn % 2` is the color to move.
    turn: u32,
    mode: Mode,
    /// Consecutive half-moves without a capture.
    no_progress: u32,
    /// 0 for the real game, +1 for each nested simulation copy.
    simulation_depth: u8,
    players: [Player; 2],
    board: Board,
}

impl GameState {
    /// Creates a new match in the starting position, White to move.
    pub fn new(mode: Mode) -> Self {
        Self {
            turn: 1,
            mode,
            no_progress: 0,
            simulation_depth: 0,
            players: [Player::new(Color::Black), Player::new(Color::White)],
            board: Board::starting_position(),
        }
    }

    /// Creates a match with an empty board, White to move.
    /// Pieces are added with [`GameState::place`].
    pub fn empty(mode: Mode) -> Self {
        Self {
            turn: 1,
            mode,
            no_progress: 0,
            simulation_depth: 0,
            players: [Player::empty(Color::Black), Player::empty(Color::White)],
            board: Board::empty(),
        }
    }

    /// Rebuilds a state from a board; the caches are derived from it.
    pub fn from_board(board: Board, mode: Mode) -> Self {
        let mut state = Self::empty(mode);
        for color in Color::ALL {
            for position in board.positions_of(color) {
                state.players[color.index()].add(position);
            }
        }
        state.board = board;
        state
    }

    /// Returns this state with `color` to move, adjusting the ply counter.
    pub fn with_side_to_move(mut self, color: Color) -> Self {
        if self.side_to_move() != color {
            self.turn += 1;
        }
        self
    }

    /// Puts a piece on a square, replacing whatever stood there.
    pub fn place(&mut self, position: Position, piece: Piece) {
        self.clear(position);
        self.board.set_piece(position, piece);
        if piece.is_alive() {
            self.players[piece.color().index()].add(position);
        }
    }

    /// Empties a square.
    pub fn clear(&mut self, position: Position) {
        let piece = self.board.piece_at(position);
        if piece.is_alive() {
            self.players[piece.color().index()].kill_piece(position);
            self.board.kill(position);
        }
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn no_progress(&self) -> u32 {
        self.no_progress
    }

    pub fn simulation_depth(&self) -> u8 {
        self.simulation_depth
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    pub fn piece_at(&self, position: Position) -> Piece {
        self.board.piece_at(position)
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        Color::from_turn(self.turn)
    }

    /// Returns true if the engine picks the move for the side to move.
    pub fn is_bot_turn(&self) -> bool {
        self.mode.is_bot(self.side_to_move())
    }

    /// Creates a lookahead copy: a full clone in bot-vs-bot mode, one
    /// simulation level deeper.
    pub fn simulation(&self) -> Self {
        let mut copy = self.clone();
        copy.mode = Mode::BotVBot;
        copy.simulation_depth += 1;
        copy
    }

    /// Destinations of the piece at `origin`, whoever owns it.
    pub fn legal_destinations(&self, origin: Position) -> Destinations {
        legal_destinations(&self.board, origin)
    }

    /// Checks that the origin holds a piece of the side to move and that the
    /// destination is generated for it.
    pub fn validate_move(&self, mv: Move) -> Result<()> {
        if !mv.from.is_on_board() || !mv.to.is_on_board() {
            return Err(GameError::IllegalDestination(mv));
        }

        let piece = self.board.piece_at(mv.from);
        if !piece.is_alive() {
            return Err(GameError::NoPieceAt(mv.from));
        }

        let to_move = self.side_to_move();
        if piece.color() != to_move {
            return Err(GameError::NotYourPiece {
                position: mv.from,
                owner: piece.color(),
                to_move,
            });
        }

        if !self.legal_destinations(mv.from).contains(mv.to) {
            return Err(GameError::IllegalDestination(mv));
        }

        Ok(())
    }

    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.validate_move(mv).is_ok()
    }

    /// Returns true if playing `mv` would end the game: it captures a live
    /// king, or it is a captureless move while the counter already stands at
    /// 49 (so this would be the 50th in a row).
    pub fn is_game_over(&self, mv: Move) -> bool {
        self.outcome(mv).is_some()
    }

    /// Classifies the candidate move before it is played.
    pub fn outcome(&self, mv: Move) -> Option<Outcome> {
        let target = self.board.piece_at(mv.to);

        if target.is_alive() {
            if target.kind() == PieceKind::King {
                return Some(Outcome::Win(self.side_to_move()));
            }
            None
        } else if self.no_progress == NO_PROGRESS_LIMIT - 1 {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    /// Applies an already validated move.
    ///
    /// Updates the victim's cache and the no-progress counter, moves the
    /// mover's cache entry, moves the piece, promotes a pawn that reached
    /// rank 0 or 7 to a queen and advances the ply counter.
    pub fn play_turn(&mut self, mv: Move) -> TurnReport {
        let mover = self.side_to_move();
        let target = self.board.piece_at(mv.to);
        let mut report = TurnReport::default();

        if target.is_alive() {
            self.players[target.color().index()].kill_piece(mv.to);
            self.players[mover.index()].add_score(target.value());
            self.no_progress = 0;
            report.captured = Some(target);
        } else {
            self.no_progress += 1;
        }

        self.players[mover.index()].update_position(mv);

        let piece = self.board.piece_at(mv.from);
        self.board.set_piece(mv.to, piece);
        self.board.kill(mv.from);

        if piece.kind() == PieceKind::Pawn && mv.to.is_promotion_rank() {
            self.board.promote(mv.to);
            report.promoted = true;
        }

        self.turn += 1;

        if self.simulation_depth == 0 {
            debug!(
                turn = self.turn - 1,
                color = mover.name(),
                mv = %mv,
                captured = ?report.captured.map(|p| p.kind()),
                promoted = report.promoted,
                no_progress = self.no_progress,
                "turn applied"
            );
        }

        report
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
