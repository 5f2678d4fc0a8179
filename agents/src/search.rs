use kingfall_core::{GameState, Move};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Simulation depth at which lookahead stops and moves are scored by their
/// immediate capture value alone.
pub const MAX_SIMULATED_TURNS: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the side to move has no moves at all.
    pub best_move: Option<Move>,
    pub score: i32,
    /// Positions expanded, the root included.
    pub nodes: u64,
    /// Candidates that shared the best score.
    pub ties: usize,
}

struct SearchInfo {
    nodes: u64,
}

/// Chooses a move for the side to move.
///
/// Every move of every piece in the mover's position cache is scored as the
/// value of the piece it captures, minus the opponent's best reply score
/// found by the same procedure on a simulation copy. Lookahead stops at
/// moves that end the game and once the state is [`MAX_SIMULATED_TURNS`]
/// simulations deep. There is no pruning. Ties for the best score are broken
/// uniformly at random with `rng`.
pub fn bot_choice<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> SearchResult {
    let mut info = SearchInfo { nodes: 0 };
    let (best_move, score, ties) = choose(state, rng, &mut info);

    if state.simulation_depth() == 0 {
        debug!(
            turn = state.turn(),
            best_move = ?best_move.map(|mv| mv.to_string()),
            score,
            ties,
            nodes = info.nodes,
            "bot choice"
        );
    }

    SearchResult {
        best_move,
        score,
        nodes: info.nodes,
        ties,
    }
}

/// Scores every move of the side to move, in generation order.
pub fn score_moves<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Vec<(Move, i32)> {
    let mut info = SearchInfo { nodes: 0 };
    score_candidates(state, rng, &mut info)
}

fn score_candidates<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
    info: &mut SearchInfo,
) -> Vec<(Move, i32)> {
    let mover = state.side_to_move();
    let mut scored = Vec::new();

    for &origin in state.player(mover).positions() {
        for to in state.legal_destinations(origin).iter() {
            let mv = Move::new(origin, to);
            let target = state.piece_at(to);
            let mut score = if target.is_alive() { target.value() } else { 0 };

            if state.simulation_depth() < MAX_SIMULATED_TURNS && !state.is_game_over(mv) {
                let mut simulation = state.simulation();
                simulation.play_turn(mv);

                // Negamax: the opponent's best outcome is our loss
                let (_, reply, _) = choose(&simulation, rng, info);
                score -= reply;
            }

            scored.push((mv, score));
        }
    }

    scored
}

fn choose<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
    info: &mut SearchInfo,
) -> (Option<Move>, i32, usize) {
    info.nodes += 1;

    let mut best_moves = Vec::new();
    let mut max_score = i32::MIN;

    for (mv, score) in score_candidates(state, rng, info) {
        if score > max_score {
            best_moves.clear();
            best_moves.push(mv);
            max_score = score;
        } else if score == max_score {
            best_moves.push(mv);
        }
    }

    match best_moves.choose(rng) {
        Some(&mv) => (Some(mv), max_score, best_moves.len()),
        // A side without moves neither gains nor loses anything
        None => (None, 0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kingfall_core::{generate_moves, Color, Mode, Piece, PieceKind, Position};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pos(file: i8, rank: i8) -> Position {
        Position::new(file, rank)
    }

    /// Two kings and a White pawn one push from promotion. Promoting lets the
    /// new queen and the White king cover every square the Black king can
    /// reach, so the king falls two plies later.
    fn promotion_endgame() -> GameState {
        let mut state = GameState::empty(Mode::BotVBot);
        state.place(pos(6, 2), Piece::new(Color::White, PieceKind::King));
        state.place(pos(0, 1), Piece::new(Color::White, PieceKind::Pawn));
        state.place(pos(7, 0), Piece::new(Color::Black, PieceKind::King));
        state
    }

    #[test]
    fn test_choice_is_legal_from_start() {
        let state = GameState::new(Mode::BotVBot);
        let mut rng = StdRng::seed_from_u64(7);
        let result = bot_choice(&state, &mut rng);

        let mv = result.best_move.expect("start position has moves");
        assert!(generate_moves(&state).contains(&mv));
        assert!(state.is_legal_move(mv));
        assert!(result.ties >= 1);
        assert!(result.nodes > 20);
    }

    #[test]
    fn test_promotion_wins_the_king() {
        let state = promotion_endgame();
        let promote = Move::new(pos(0, 1), pos(0, 0));

        for seed in 0..4 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = bot_choice(&state, &mut rng);

            assert_eq!(result.best_move, Some(promote));
            assert_eq!(result.score, 1000);
            assert_eq!(result.ties, 1);
        }

        let mut rng = StdRng::seed_from_u64(0);
        let scored = score_moves(&state, &mut rng);
        assert!(scored
            .iter()
            .all(|&(mv, score)| mv == promote || score < 1000));
    }

    #[test]
    fn test_horizon_scores_captures_only() {
        let mut state = GameState::empty(Mode::BotVBot);
        state.place(pos(3, 3), Piece::new(Color::White, PieceKind::Queen));
        state.place(pos(3, 0), Piece::new(Color::Black, PieceKind::Rook));
        state.place(pos(6, 6), Piece::new(Color::Black, PieceKind::Pawn));
        let state = state.simulation().simulation().simulation();
        assert_eq!(state.simulation_depth(), MAX_SIMULATED_TURNS);

        let mut rng = StdRng::seed_from_u64(1);
        let result = bot_choice(&state, &mut rng);

        assert_eq!(result.best_move, Some(Move::new(pos(3, 3), pos(3, 0))));
        assert_eq!(result.score, 52);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_king_capture_ends_lookahead() {
        let mut state = GameState::empty(Mode::BotVBot);
        state.place(pos(0, 7), Piece::new(Color::White, PieceKind::Rook));
        state.place(pos(0, 0), Piece::new(Color::Black, PieceKind::King));
        state.place(pos(7, 0), Piece::new(Color::Black, PieceKind::Queen));

        let mut rng = StdRng::seed_from_u64(3);
        let scored = score_moves(&state, &mut rng);
        let take_king = Move::new(pos(0, 7), pos(0, 0));

        assert!(scored.contains(&(take_king, 1000)));
        let result = bot_choice(&state, &mut rng);
        assert_eq!(result.best_move, Some(take_king));
    }

    #[test]
    fn test_same_seed_same_choice() {
        let mut state = GameState::empty(Mode::BotVBot);
        state.place(pos(4, 7), Piece::new(Color::White, PieceKind::King));
        state.place(pos(1, 7), Piece::new(Color::White, PieceKind::Knight));
        state.place(pos(4, 0), Piece::new(Color::Black, PieceKind::King));
        state.place(pos(2, 1), Piece::new(Color::Black, PieceKind::Pawn));

        let first = bot_choice(&state, &mut StdRng::seed_from_u64(42));
        let second = bot_choice(&state, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_moves_returns_none() {
        let mut state = GameState::empty(Mode::BotVBot);
        state.place(pos(4, 0), Piece::new(Color::Black, PieceKind::King));

        let result = bot_choice(&state, &mut StdRng::seed_from_u64(0));
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
        assert_eq!(result.ties, 0);
    }

    #[test]
    fn test_search_leaves_state_untouched() {
        let state = promotion_endgame();
        let before = state.clone();
        bot_choice(&state, &mut StdRng::seed_from_u64(9));
        assert_eq!(state, before);
    }
}
