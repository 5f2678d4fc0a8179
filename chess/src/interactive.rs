use kingfall_agents::NegamaxAgent;
use kingfall_core::{
    encode_board, ClickResult, Color, DisplayGeometry, GameState, Mode, Move, Outcome,
    PieceKind, Position, Selection,
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    style::{Color as TermColor, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use std::io::{self, Write};
use std::time::Duration;
use tracing::info;

/// Terminal cell of the top-left board square.
const BOARD_LEFT: u16 = 3;
const BOARD_TOP: u16 = 5;

/// The board occupies two columns and one row per square.
const BOARD_GEOMETRY: DisplayGeometry = DisplayGeometry::new(16, 8);

pub struct InteractiveGame {
    state: GameState,
    agent: NegamaxAgent,
    cursor: Position,
    selection: Selection,
    last_move: Option<Move>,
    outcome: Option<Outcome>,
    message: String,
}

impl InteractiveGame {
    pub fn new(mode: Mode, agent: NegamaxAgent) -> Self {
        Self {
            state: GameState::new(mode),
            agent,
            cursor: Position::new(4, 6), // e2
            selection: Selection::new(),
            last_move: None,
            outcome: None,
            message: String::from("hjkl/arrows move, Enter or click selects, n new game, q quits"),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(EnableMouseCapture)?;
        stdout.execute(Clear(ClearType::All))?;

        let result = self.game_loop();

        // Cleanup
        stdout.execute(DisableMouseCapture)?;
        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        result
    }

    fn game_loop(&mut self) -> io::Result<()> {
        loop {
            self.draw_board()?;

            if self.outcome.is_some() {
                event::read()?; // Wait for any key
                break;
            }

            if self.state.is_bot_turn() {
                // Let q interrupt a bot-vs-bot game between moves
                if event::poll(Duration::from_millis(0))? {
                    if let Event::Key(KeyEvent {
                        code: KeyCode::Char('q') | KeyCode::Esc,
                        ..
                    }) = event::read()?
                    {
                        break;
                    }
                }
                self.engine_move()?;
                continue;
            }

            // Handle input
            match event::read()? {
                Event::Key(KeyEvent { code, .. }) => match code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1, 0),
                    KeyCode::Char('j') | KeyCode::Down => self.move_cursor(0, 1),
                    KeyCode::Char('k') | KeyCode::Up => self.move_cursor(0, -1),
                    KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1, 0),
                    KeyCode::Enter | KeyCode::Char(' ') => self.handle_click(self.cursor),
                    KeyCode::Char('n') => self.new_game(),
                    _ => {}
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if let Some(position) = board_position(column, row) {
                        self.cursor = position;
                        self.handle_click(position);
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn move_cursor(&mut self, df: i8, dr: i8) {
        if let Some(next) = self.cursor.step(df, dr) {
            self.cursor = next;
        }
    }

    fn handle_click(&mut self, position: Position) {
        match self.selection.click(&self.state, position) {
            ClickResult::Selected(origin) => {
                let piece = self.state.piece_at(origin);
                self.message = format!("Selected {} at {}", piece.kind().name(), origin);
            }
            ClickResult::Complete(mv) => self.apply(mv),
            ClickResult::Rejected(to) => {
                self.message = format!("Can't move there ({})", to);
            }
            ClickResult::Ignored => {}
        }
    }

    fn engine_move(&mut self) -> io::Result<()> {
        self.message = format!("{} thinking...", self.state.side_to_move().name());
        self.draw_board()?;

        let result = self.agent.search(&self.state);

        match result.best_move {
            Some(mv) => {
                self.apply(mv);
                self.message = format!("Engine played {} (score {})", mv, result.score);
            }
            None => {
                self.outcome = Some(Outcome::Draw);
                self.message = format!("{} has no moves. Draw.", self.state.side_to_move().name());
            }
        }

        Ok(())
    }

    fn apply(&mut self, mv: Move) {
        let outcome = self.state.outcome(mv);
        self.state.play_turn(mv);
        self.selection.clear();
        self.last_move = Some(mv);
        self.message = format!("Moved: {}", mv);

        if let Some(outcome) = outcome {
            info!(?outcome, turn = self.state.turn(), "game over");
            self.outcome = Some(outcome);
            self.message = match outcome {
                Outcome::Win(color) => format!("{} wins! Press any key.", color.name()),
                Outcome::Draw => String::from("Fifty moves without a capture. Draw! Press any key."),
            };
        }
    }

    fn new_game(&mut self) {
        self.state = GameState::new(self.state.mode());
        self.selection.clear();
        self.last_move = None;
        self.outcome = None;
        self.cursor = Position::new(4, 6);
        self.message = String::from("New game started!");
    }

    fn draw_board(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(MoveTo(0, 0))?;

        // Title
        println!("Kingfall - capture the king to win\r");
        println!("Commands: Enter/click=select/move, n=new, q=quit\r");
        println!("\r");

        println!("   a b c d e f g h  \r");
        println!(" ┌─────────────────┐\r");

        let encoded = encode_board(self.state.board());
        let hints = self.selection.hints(&self.state);
        let squares = encoded.as_bytes().chunks_exact(2);

        for (position, code) in Position::all().zip(squares) {
            if position.file() == 0 {
                print!("{}│ ", 8 - position.rank());
            }

            let is_cursor = self.cursor == position;
            let is_selected = self.selection.origin() == Some(position);
            let is_hint = hints.contains(position);
            let is_last = self
                .last_move
                .map_or(false, |mv| mv.from == position || mv.to == position);

            // Set background color
            let background = if is_cursor {
                TermColor::Yellow
            } else if is_selected {
                TermColor::Green
            } else if is_hint {
                TermColor::Blue
            } else if is_last {
                TermColor::DarkCyan
            } else if (position.file() + position.rank()) % 2 == 1 {
                TermColor::DarkGrey
            } else {
                TermColor::Black
            };
            stdout.execute(SetBackgroundColor(background))?;

            // Draw piece or empty square
            match symbol(code[0], code[1]) {
                Some((symbol, color)) => {
                    let foreground = match color {
                        Color::White => TermColor::White,
                        Color::Black => TermColor::Magenta,
                    };
                    stdout.execute(SetForegroundColor(foreground))?;
                    print!("{} ", symbol);
                }
                None => print!("  "),
            }
            stdout.execute(ResetColor)?;

            if position.file() == 7 {
                println!("│{}\r", 8 - position.rank());
            }
        }

        println!(" └─────────────────┘\r");
        println!("   a b c d e f g h  \r");
        println!("\r");

        // Game info
        println!(
            "{} to move | Turn {} | Moves without capture: {} | Captured: White {} Black {}    \r",
            self.state.side_to_move().name(),
            self.state.turn(),
            self.state.no_progress(),
            self.state.player(Color::White).score(),
            self.state.player(Color::Black).score(),
        );

        // Status message
        println!("\r");
        stdout.execute(Clear(ClearType::CurrentLine))?;
        println!("{}\r", self.message);

        stdout.flush()?;
        Ok(())
    }
}

/// Maps a terminal cell to the board square drawn there.
fn board_position(column: u16, row: u16) -> Option<Position> {
    let x = u32::from(column.checked_sub(BOARD_LEFT)?);
    let y = u32::from(row.checked_sub(BOARD_TOP)?);
    if BOARD_GEOMETRY.contains(x, y) {
        Some(BOARD_GEOMETRY.position_at(x, y))
    } else {
        None
    }
}

/// Decodes one square of the display string into a glyph.
fn symbol(occupancy: u8, kind: u8) -> Option<(char, Color)> {
    let color = match occupancy {
        b'0' => Color::Black,
        b'1' => Color::White,
        _ => return None,
    };
    let kind = PieceKind::from_code(kind.checked_sub(b'0')?)?;
    Some((glyph(kind, color), color))
}

/// Unicode chess symbol for a piece.
pub fn glyph(kind: PieceKind, color: Color) -> char {
    match (kind, color) {
        (PieceKind::King, Color::White) => '♔',
        (PieceKind::Queen, Color::White) => '♕',
        (PieceKind::Rook, Color::White) => '♖',
        (PieceKind::Bishop, Color::White) => '♗',
        (PieceKind::Knight, Color::White) => '♘',
        (PieceKind::Pawn, Color::White) => '♙',
        (PieceKind::King, Color::Black) => '♚',
        (PieceKind::Queen, Color::Black) => '♛',
        (PieceKind::Rook, Color::Black) => '♜',
        (PieceKind::Bishop, Color::Black) => '♝',
        (PieceKind::Knight, Color::Black) => '♞',
        (PieceKind::Pawn, Color::Black) => '♟',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_position_from_terminal_cell() {
        assert_eq!(board_position(BOARD_LEFT, BOARD_TOP), Some(Position::new(0, 0)));
        assert_eq!(board_position(BOARD_LEFT + 9, BOARD_TOP + 6), Some(Position::new(4, 6)));
        assert_eq!(board_position(BOARD_LEFT + 16, BOARD_TOP), None);
        assert_eq!(board_position(0, 0), None);
    }

    #[test]
    fn test_symbol_decoding() {
        assert_eq!(symbol(b'1', b'1'), Some(('♔', Color::White)));
        assert_eq!(symbol(b'0', b'3'), Some(('♟', Color::Black)));
        assert_eq!(symbol(b'2', b'5'), None);
        assert_eq!(symbol(b'1', b'4'), Some((glyph(PieceKind::Queen, Color::White), Color::White)));
    }
}
