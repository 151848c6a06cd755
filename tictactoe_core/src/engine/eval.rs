use crate::engine::Evaluator;
use crate::logic::board::{Board, Cell, Player, WINNING_LINES};

pub const SCORE_TWO_OPEN: i32 = 10;
pub const SCORE_ONE_OPEN: i32 = 1;

/// Static score from open lines: a line still winnable by one side counts
/// for that side, more so the closer it is to completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEvaluator;

impl LineEvaluator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn score_line(cells: [Cell; 3], perspective: Player) -> i32 {
        let mut own = 0;
        let mut theirs = 0;
        let mut empty = 0;
        for cell in cells {
            match cell {
                Cell::Empty => empty += 1,
                Cell::Mark(p) if p == perspective => own += 1,
                Cell::Mark(_) => theirs += 1,
            }
        }

        match (own, theirs, empty) {
            (2, 0, 1) => SCORE_TWO_OPEN,
            (0, 2, 1) => -SCORE_TWO_OPEN,
            (1, 0, 2) => SCORE_ONE_OPEN,
            (0, 1, 2) => -SCORE_ONE_OPEN,
            _ => 0,
        }
    }
}

impl Evaluator for LineEvaluator {
    fn evaluate(&self, board: &Board, perspective: Player) -> i32 {
        WINNING_LINES
            .iter()
            .map(|line| Self::score_line(board.line_cells(line), perspective))
            .sum()
    }
}
