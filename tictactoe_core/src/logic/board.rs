use crate::engine::Move;
use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Every line of three, as row-major cell indices: rows, columns, diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Mark(Player),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '_',
            Self::Mark(player) => player.symbol(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub const fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Cell at `mv`, `None` when the position is off the board.
    #[must_use]
    pub fn get(&self, mv: Move) -> Option<Cell> {
        mv.index().and_then(|idx| self.cells.get(idx).copied())
    }

    pub(crate) fn set(&mut self, mv: Move, cell: Cell) {
        if let Some(slot) = mv.index().and_then(|idx| self.cells.get_mut(idx)) {
            *slot = cell;
        }
    }

    pub fn clear(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    /// Empty positions in row-major order. This order is the engine's
    /// tie-break order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| Move::from_index(idx))
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    #[must_use]
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Mark(player))
            .count()
    }

    /// The three cells of a line, in line order.
    #[must_use]
    pub fn line_cells(&self, line: &[usize; 3]) -> [Cell; 3] {
        line.map(|idx| self.cells.get(idx).copied().unwrap_or_default())
    }

    /// Rows separated by `/`, e.g. `XX_/OO_/___`.
    #[must_use]
    pub fn to_notation(&self) -> String {
        let mut out = String::with_capacity(CELL_COUNT + BOARD_SIZE - 1);
        for (idx, cell) in self.cells.iter().enumerate() {
            if idx > 0 && idx % BOARD_SIZE == 0 {
                out.push('/');
            }
            out.push(cell.symbol());
        }
        out
    }
}
