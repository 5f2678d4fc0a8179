use crate::game_state::{GameState, Outcome};
use crate::move_gen::generate_moves;
use crate::types::{Move, PieceKind};

/// Perft (performance test) results at each depth.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct PerftResults {
    pub nodes: u64,
    pub captures: u64,
    pub promotions: u64,
    pub king_captures: u64,
    pub draws: u64,
}

impl PerftResults {
    /// Combines results from child nodes.
    pub fn add(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.promotions += other.promotions;
        self.king_captures += other.king_captures;
        self.draws += other.draws;
    }
}

/// Counts leaf nodes of the move tree to the given depth.
/// Moves that end the game are leaves and are not expanded.
pub fn perft(state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(state);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        if state.is_game_over(mv) {
            nodes += 1;
            continue;
        }
        let mut new_state = state.clone();
        new_state.play_turn(mv);
        nodes += perft(&new_state, depth - 1);
    }

    nodes
}

/// Performs perft with a per-root-move breakdown.
pub fn perft_divide(state: &GameState, depth: u8) -> Vec<(Move, u64)> {
    let mut results = Vec::new();

    for mv in generate_moves(state) {
        let nodes = if depth <= 1 || state.is_game_over(mv) {
            1
        } else {
            let mut new_state = state.clone();
            new_state.play_turn(mv);
            perft(&new_state, depth - 1)
        };
        results.push((mv, nodes));
    }

    results
}

/// Performs perft and classifies the moves made at the last ply.
pub fn perft_detailed(state: &GameState, depth: u8) -> PerftResults {
    let mut results = PerftResults::default();

    if depth == 0 {
        results.nodes = 1;
        return results;
    }

    for mv in generate_moves(state) {
        let outcome = state.outcome(mv);

        if depth == 1 || outcome.is_some() {
            results.nodes += 1;

            if state.board().piece_at(mv.to).is_alive() {
                results.captures += 1;
            }
            let piece = state.piece_at(mv.from);
            if piece.kind() == PieceKind::Pawn && mv.to.is_promotion_rank() {
                results.promotions += 1;
            }
            match outcome {
                Some(Outcome::Win(_)) => results.king_captures += 1,
                Some(Outcome::Draw) => results.draws += 1,
                None => {}
            }
        } else {
            let mut new_state = state.clone();
            new_state.play_turn(mv);
            results.add(&perft_detailed(&new_state, depth - 1));
        }
    }

    results
}
