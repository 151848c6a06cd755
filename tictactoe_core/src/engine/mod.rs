use crate::error::NoLegalMoves;
use crate::logic::board::{Board, Player, BOARD_SIZE};
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod difficulty;
pub mod eval;
pub mod search;


/// A single board position. Coordinates are not validated on construction so
/// that out-of-range requests can be reported as illegal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn in_bounds(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Row-major cell index, `None` when off the board.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.row as usize * BOARD_SIZE + self.col as usize)
        } else {
            None
        }
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(u8, u8)> for Move {
    fn from((row, col): (u8, u8)) -> Self {
        Self::new(row, col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchLimit {
    /// Search every line to a terminal position.
    Exhaustive,
    /// Fall back to the static evaluator once this many plies below the root
    /// move have been searched without reaching a terminal position.
    Depth(u8),
}

/// How the engine arrived at its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Decision {
    ImmediateWin,
    ForcedBlock,
    #[default]
    Minimax,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Deepest ply reached below the root move.
    pub depth: u8,
    pub nodes: u32,
    /// Score of the chosen move from the searching side's point of view.
    /// Zero when the move was found by the forced-move scan.
    pub score: i32,
    pub decision: Decision,
}

pub trait Evaluator {
    fn evaluate(&self, board: &Board, perspective: Player) -> i32;
}

pub trait Searcher {
    /// Picks a move for `perspective`. The state is used as scratch space and
    /// is returned in exactly the condition it was passed in.
    fn search(
        &mut self,
        state: &mut GameState,
        perspective: Player,
        limit: SearchLimit,
    ) -> Result<(Move, SearchStats), NoLegalMoves>;
}
