//! Two-click move entry for human players.
//!
//! The first click picks one of the mover's pieces, the second picks a
//! destination. "Nothing selected" is `None` rather than an off-board
//! sentinel square.

use crate::game_state::GameState;
use crate::move_gen::Destinations;
use crate::types::{Move, Position};

/// What a click did to the selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClickResult {
    /// A piece of the side to move is now selected.
    Selected(Position),
    /// A legal destination completed the move; the selection is cleared.
    Complete(Move),
    /// The destination is not legal for the selected piece, which stays
    /// selected.
    Rejected(Position),
    /// Nothing selected and the click was not on one of the mover's pieces.
    Ignored,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Selection {
    origin: Option<Position>,
}

impl Selection {
    pub const fn new() -> Self {
        Self { origin: None }
    }

    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    pub fn clear(&mut self) {
        self.origin = None;
    }

    /// Feeds one click on a board square.
    /// Clicking another own piece re-selects; the caller filters off-board
    /// clicks.
    pub fn click(&mut self, state: &GameState, position: Position) -> ClickResult {
        if state.board().is_color(position, state.side_to_move()) {
            self.origin = Some(position);
            return ClickResult::Selected(position);
        }

        match self.origin {
            Some(origin) => {
                let mv = Move::new(origin, position);
                if state.is_legal_move(mv) {
                    self.origin = None;
                    ClickResult::Complete(mv)
                } else {
                    ClickResult::Rejected(position)
                }
            }
            None => ClickResult::Ignored,
        }
    }

    /// Destinations to highlight for the selected piece.
    pub fn hints(&self, state: &GameState) -> Destinations {
        match self.origin {
            Some(origin) => state.legal_destinations(origin),
            None => Destinations::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mode;

    #[test]
    fn test_two_click_move() {
        let state = GameState::new(Mode::HumanVHuman);
        let mut selection = Selection::new();
        let e2 = "e2".parse().unwrap();
        let e4 = "e4".parse().unwrap();

        assert_eq!(selection.click(&state, e2), ClickResult::Selected(e2));
        assert_eq!(selection.hints(&state).len(), 2);
        assert_eq!(selection.click(&state, e4), ClickResult::Complete(Move::new(e2, e4)));
        assert_eq!(selection.origin(), None);
    }

    #[test]
    fn test_rejected_destination_keeps_origin() {
        let state = GameState::new(Mode::HumanVHuman);
        let mut selection = Selection::new();
        let e2 = "e2".parse().unwrap();
        let f3 = "f3".parse().unwrap();

        selection.click(&state, e2);
        assert_eq!(selection.click(&state, f3), ClickResult::Rejected(f3));
        assert_eq!(selection.origin(), Some(e2));
    }

    #[test]
    fn test_enemy_piece_without_selection_is_ignored() {
        let state = GameState::new(Mode::HumanVHuman);
        let mut selection = Selection::new();

        assert_eq!(selection.click(&state, "e7".parse().unwrap()), ClickResult::Ignored);
        assert!(selection.hints(&state).is_empty());
    }

    #[test]
    fn test_reselect_own_piece() {
        let state = GameState::new(Mode::HumanVHuman);
        let mut selection = Selection::new();
        let g1 = "g1".parse().unwrap();

        selection.click(&state, "e2".parse().unwrap());
        assert_eq!(selection.click(&state, g1), ClickResult::Selected(g1));
        assert_eq!(selection.origin(), Some(g1));
    }
}
