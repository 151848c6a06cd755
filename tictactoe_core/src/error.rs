//! Error types shared by the rules and the engine.

use crate::engine::Move;
use thiserror::Error;

/// Why a move was rejected by [`GameState::apply_move`](crate::logic::game::GameState::apply_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("position {0} is outside the board")]
    OutOfBounds(Move),

    #[error("position {0} is already occupied")]
    Occupied(Move),

    #[error("game already over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no moves to undo")]
pub struct NoHistory;

/// Search was requested on a position where nobody can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no legal moves available")]
pub struct NoLegalMoves;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("board notation has {got} cells, expected {expected}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid character '{character}' at cell {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("position cannot be reached in a legal game")]
    ImpossibleOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, medium, hard or unbeatable)")]
pub struct ParseDifficultyError(pub String);
