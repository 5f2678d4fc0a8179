use crate::{
    search::{bot_choice, SearchResult},
    Agent,
};
use kingfall_core::{GameState, Move};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The automated player: [`bot_choice`] driven by its own random source.
pub struct NegamaxAgent {
    name: String,
    rng: StdRng,
}

impl NegamaxAgent {
    /// Creates an agent whose tie-breaks are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        NegamaxAgent {
            name: format!("Negamax(seed={})", seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        NegamaxAgent {
            name: "Negamax".to_string(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Runs the search and returns the full result, score included.
    pub fn search(&mut self, state: &GameState) -> SearchResult {
        bot_choice(state, &mut self.rng)
    }
}

impl Default for NegamaxAgent {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Agent for NegamaxAgent {
    fn best_move(&mut self, state: &GameState) -> Option<Move> {
        self.search(state).best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kingfall_core::Mode;

    #[test]
    fn test_seeded_agents_agree() {
        let mut state = GameState::new(Mode::BotVBot);
        let mut first = NegamaxAgent::seeded(11);
        let mut second = NegamaxAgent::seeded(11);

        for _ in 0..2 {
            let a = first.best_move(&state);
            let b = second.best_move(&state);
            assert_eq!(a, b);

            let mv = a.expect("opening has moves");
            assert!(state.is_legal_move(mv));
            state.play_turn(mv);
        }
        assert_eq!(first.name(), "Negamax(seed=11)");
    }
}
