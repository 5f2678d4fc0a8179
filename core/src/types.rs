use crate::error::GameError;
use std::fmt;
use std::str::FromStr;

/// Width and height of the board.
pub const BOARD_SIZE: i8 = 8;

/// Represents one of the two players.
/// The discriminant is the color code used by the display string and as the
/// index into the player array.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Black = 0,
    White = 1,
}

impl Color {
    /// Both colors in player-array order.
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// Returns the opposite color.
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the color to move on the given ply (`turn % 2`).
    pub const fn from_turn(turn: u32) -> Self {
        if turn % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Returns the color code (0 = Black, 1 = White).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the rank delta of a forward pawn step.
    /// Black starts on ranks 0-1 and moves toward rank 7.
    pub const fn forward(self) -> i8 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    /// Returns the rank pawns of this color start on.
    pub const fn pawn_rank(self) -> i8 {
        match self {
            Color::Black => 1,
            Color::White => 6,
        }
    }

    /// Returns the rank the other pieces of this color start on.
    pub const fn back_rank(self) -> i8 {
        match self {
            Color::Black => 0,
            Color::White => 7,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
        }
    }
}

/// The six kinds of pieces.
/// The discriminant is the kind code used by the display string.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PieceKind {
    Bishop = 0,
    King = 1,
    Knight = 2,
    Pawn = 3,
    Queen = 4,
    Rook = 5,
}

impl PieceKind {
    /// Returns the material value used for capture scoring.
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 10,
            PieceKind::Knight => 32,
            PieceKind::Bishop => 33,
            PieceKind::Rook => 52,
            PieceKind::Queen => 96,
            PieceKind::King => 1000,
        }
    }

    /// Returns the kind code (0-5).
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`PieceKind::code`].
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PieceKind::Bishop),
            1 => Some(PieceKind::King),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Pawn),
            4 => Some(PieceKind::Queen),
            5 => Some(PieceKind::Rook),
            _ => None,
        }
    }

    /// Returns true if this kind walks its directions repeatedly
    /// (bishop, rook, queen).
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

/// A (file, rank) pair.
///
/// As a raw value it is unconstrained; only positions that pass
/// [`Position::is_on_board`] may be used to index a board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    file: i8,
    rank: i8,
}

impl Position {
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    pub const fn file(self) -> i8 {
        self.file
    }

    pub const fn rank(self) -> i8 {
        self.rank
    }

    /// Returns true if both coordinates lie in [0, 7].
    pub const fn is_on_board(self) -> bool {
        self.file >= 0 && self.file < BOARD_SIZE && self.rank >= 0 && self.rank < BOARD_SIZE
    }

    /// Returns this position shifted by the given deltas, on board or not.
    pub const fn offset(self, df: i8, dr: i8) -> Self {
        Self {
            file: self.file + df,
            rank: self.rank + dr,
        }
    }

    /// Returns the shifted position if it is still on the board.
    pub const fn step(self, df: i8, dr: i8) -> Option<Self> {
        let next = self.offset(df, dr);
        if next.is_on_board() {
            Some(next)
        } else {
            None
        }
    }

    /// Returns true on either back rank, where pawns promote.
    pub const fn is_promotion_rank(self) -> bool {
        self.rank == 0 || self.rank == BOARD_SIZE - 1
    }

    /// Returns the rank-major square index (0-63).
    /// The position must be on the board.
    pub fn index(self) -> usize {
        debug_assert!(self.is_on_board(), "off-board position {:?}", self);
        self.rank as usize * BOARD_SIZE as usize + self.file as usize
    }

    /// Iterates over all 64 squares, rank outer, file inner.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Position::new(file, rank)))
    }
}

/// Squares print as a file letter and a rank digit, with White's back rank
/// (rank 7) shown as `1` and Black's back rank (rank 0) as `8`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(
                f,
                "{}{}",
                (b'a' + self.file as u8) as char,
                (b'0' + (BOARD_SIZE - self.rank) as u8) as char
            )
        } else {
            write!(f, "({}, {})", self.file, self.rank)
        }
    }
}

impl FromStr for Position {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(GameError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let digit = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&digit) {
            return Err(GameError::InvalidSquare(s.to_string()));
        }
        Ok(Position::new(
            (file - b'a') as i8,
            BOARD_SIZE - (digit - b'0') as i8,
        ))
    }
}

/// The content of a single square.
///
/// A dead piece keeps its last color and kind; only `alive` decides whether
/// the square is occupied.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    alive: bool,
    color: Color,
    kind: PieceKind,
    value: i32,
}

impl Piece {
    /// Creates a live piece.
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            alive: true,
            color,
            kind,
            value: kind.value(),
        }
    }

    /// An empty square.
    pub const fn empty() -> Self {
        Self::dead(Color::Black, PieceKind::Bishop)
    }

    /// A dead piece with the given stale color and kind.
    pub const fn dead(color: Color, kind: PieceKind) -> Self {
        Self {
            alive: false,
            color,
            kind,
            value: kind.value(),
        }
    }

    pub const fn is_alive(self) -> bool {
        self.alive
    }

    pub const fn color(self) -> Color {
        self.color
    }

    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    pub const fn value(self) -> i32 {
        self.value
    }

    /// Returns true if this is a live piece of the opposite color.
    pub const fn is_enemy_of(self, color: Color) -> bool {
        self.alive && self.color as u8 != color as u8
    }

    /// Returns true if this is a live piece of the given color.
    pub const fn is_owned_by(self, color: Color) -> bool {
        self.alive && self.color as u8 == color as u8
    }

    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }

    pub(crate) fn promote(&mut self) {
        self.kind = PieceKind::Queen;
        self.value = PieceKind::Queen.value();
    }
}

impl Default for Piece {
    fn default() -> Self {
        Self::empty()
    }
}

/// A move from one square to another.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = GameError;

    /// Parses coordinate notation such as `e2e4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return Err(GameError::InvalidMoveText(s.to_string()));
        }
        Ok(Move::new(s[..2].parse()?, s[2..].parse()?))
    }
}

/// Who supplies the moves for each side.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    #[default]
    BotVBot = 0,
    /// The human plays White.
    HumanVBot = 1,
    HumanVHuman = 2,
}

impl Mode {
    /// Returns true if the engine chooses the move for `color`.
    pub const fn is_bot(self, color: Color) -> bool {
        match self {
            Mode::BotVBot => true,
            Mode::HumanVBot => matches!(color, Color::Black),
            Mode::HumanVHuman => false,
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::BotVBot),
            1 => Ok(Mode::HumanVBot),
            2 => Ok(Mode::HumanVHuman),
            other => Err(GameError::UnknownMode(other.to_string())),
        }
    }
}

impl FromStr for Mode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "bot-v-bot" | "botvbot" => Ok(Mode::BotVBot),
            "1" | "human-v-bot" | "humanvbot" => Ok(Mode::HumanVBot),
            "2" | "human-v-human" | "humanvhuman" => Ok(Mode::HumanVHuman),
            _ => Err(GameError::UnknownMode(s.to_string())),
        }
    }
}
