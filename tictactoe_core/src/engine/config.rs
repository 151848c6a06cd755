use crate::engine::SearchLimit;
use serde::{Deserialize, Serialize};

pub const CLASSIC_WIN_SCORE: i32 = 10;
pub const ENHANCED_WIN_SCORE: i32 = 100;
pub const ENHANCED_DEPTH_CUTOFF: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base score of a won position; the ply count is subtracted so faster
    /// wins and slower losses are preferred. Must exceed the deepest ply.
    pub win_score: i32,
    /// Plies below the root move after which the static evaluator replaces
    /// further search. `None` searches to the end of the game.
    pub depth_cutoff: Option<u8>,
    /// Play a random corner or centre on an empty board.
    pub opening_heuristic: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::enhanced()
    }
}

impl SearchConfig {
    /// Exhaustive search with small win scores and no opening book.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            win_score: CLASSIC_WIN_SCORE,
            depth_cutoff: None,
            opening_heuristic: false,
        }
    }

    /// Depth-bounded search with heuristic fallback and opening moves.
    #[must_use]
    pub const fn enhanced() -> Self {
        Self {
            win_score: ENHANCED_WIN_SCORE,
            depth_cutoff: Some(ENHANCED_DEPTH_CUTOFF),
            opening_heuristic: true,
        }
    }

    #[must_use]
    pub const fn search_limit(&self) -> SearchLimit {
        match self.depth_cutoff {
            Some(depth) => SearchLimit::Depth(depth),
            None => SearchLimit::Exhaustive,
        }
    }

    /// Reads a configuration, keeping defaults for every field left out.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }
}
