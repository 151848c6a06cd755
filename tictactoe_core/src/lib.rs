//! Tic-tac-toe rules and a minimax search engine with alpha-beta pruning.
//!
//! [`logic`] holds the board, the game state and the win/draw rules;
//! [`engine`] holds the search, its evaluator and the difficulty policy that
//! blends optimal and random play.

pub mod engine;
pub mod error;
pub mod logic;

pub use engine::config::SearchConfig;
pub use engine::difficulty::{DifficultyPolicy, DifficultyTier};
pub use engine::search::AlphaBetaEngine;
pub use engine::{Move, SearchLimit, SearchStats, Searcher};
pub use error::{IllegalMove, NoHistory, NoLegalMoves, ParseBoardError, ParseDifficultyError};
pub use logic::board::{Board, Cell, Player};
pub use logic::game::{GameState, GameStatus, MoveRecord};
