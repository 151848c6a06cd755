use crate::engine::config::SearchConfig;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::Move;
use crate::error::{NoLegalMoves, ParseDifficultyError};
use crate::logic::game::GameState;
use crate::logic::opening::get_opening_move;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
    Unbeatable,
}

impl DifficultyTier {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Unbeatable];

    /// Chance of playing the searched move instead of a random one.
    #[must_use]
    pub const fn search_probability(self) -> f64 {
        match self {
            Self::Easy => 0.0,
            Self::Medium => 0.7,
            Self::Hard => 0.9,
            Self::Unbeatable => 1.0,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Unbeatable => "unbeatable",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DifficultyTier {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tier| tier.name() == lower)
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// Chooses moves for a difficulty tier by mixing the search engine with
/// uniformly random legal moves.
pub struct DifficultyPolicy<R = StdRng> {
    engine: AlphaBetaEngine,
    rng: R,
}

impl DifficultyPolicy<StdRng> {
    #[must_use]
    pub fn new(config: Arc<SearchConfig>) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl Default for DifficultyPolicy<StdRng> {
    fn default() -> Self {
        Self::new(Arc::new(SearchConfig::default()))
    }
}

impl<R: Rng> DifficultyPolicy<R> {
    pub const fn with_rng(config: Arc<SearchConfig>, rng: R) -> Self {
        Self {
            engine: AlphaBetaEngine::new(config),
            rng,
        }
    }

    pub fn update_config(&mut self, config: Arc<SearchConfig>) {
        self.engine.update_config(config);
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        self.engine.config()
    }

    /// Move for the side to move in `state`.
    pub fn select_move(
        &mut self,
        state: &GameState,
        tier: DifficultyTier,
    ) -> Result<Move, NoLegalMoves> {
        if state.is_over() {
            return Err(NoLegalMoves);
        }
        let moves = state.available_moves();
        if moves.is_empty() {
            return Err(NoLegalMoves);
        }

        if self.rng.gen_bool(tier.search_probability()) {
            log::trace!("{tier}: searching");
            self.searched_move(state)
        } else {
            log::trace!("{tier}: random move");
            moves.choose(&mut self.rng).copied().ok_or(NoLegalMoves)
        }
    }

    fn searched_move(&mut self, state: &GameState) -> Result<Move, NoLegalMoves> {
        if self.engine.config().opening_heuristic {
            if let Some(mv) = get_opening_move(state, &mut self.rng) {
                log::debug!("{:?} opens with {mv}", state.to_move());
                return Ok(mv);
            }
        }

        let mut scratch = state.clone();
        let limit = self.engine.config().search_limit();
        self.engine.best_move(&mut scratch, state.to_move(), limit)
    }
}
