use crate::engine::Move;
use crate::error::IllegalMove;
use crate::logic::board::{Board, Cell, Player, BOARD_SIZE, WINNING_LINES};
use crate::logic::game::GameStatus;

/// Checks whether a move may be played, reporting why not.
pub fn validate_move(board: &Board, status: GameStatus, mv: Move) -> Result<(), IllegalMove> {
    if status != GameStatus::InProgress {
        return Err(IllegalMove::GameOver);
    }
    match board.get(mv) {
        None => Err(IllegalMove::OutOfBounds(mv)),
        Some(Cell::Mark(_)) => Err(IllegalMove::Occupied(mv)),
        Some(Cell::Empty) => Ok(()),
    }
}

/// Status after `last_move` was played. Only lines through `last_move` are
/// inspected since a new win must pass through the cell just marked.
#[must_use]
pub fn evaluate(board: &Board, last_move: Move) -> GameStatus {
    if let Some(Cell::Mark(player)) = board.get(last_move) {
        if completes_line(board, last_move, player) {
            return GameStatus::Won(player);
        }
    }
    if board.is_full() {
        GameStatus::Drawn
    } else {
        GameStatus::InProgress
    }
}

/// Would `player` have three in a row through `mv` if `mv` carried their
/// mark? The cell at `mv` itself is not inspected.
#[must_use]
pub fn completes_line(board: &Board, mv: Move, player: Player) -> bool {
    if !mv.in_bounds() {
        return false;
    }
    let (row, col) = (usize::from(mv.row), usize::from(mv.col));
    let owned = |r: usize, c: usize| {
        (r == row && c == col)
            || board.get(Move::from_index(r * BOARD_SIZE + c)) == Some(Cell::Mark(player))
    };

    if (0..BOARD_SIZE).all(|c| owned(row, c)) {
        return true;
    }
    if (0..BOARD_SIZE).all(|r| owned(r, col)) {
        return true;
    }
    if row == col && (0..BOARD_SIZE).all(|i| owned(i, i)) {
        return true;
    }
    row + col == BOARD_SIZE - 1 && (0..BOARD_SIZE).all(|i| owned(i, BOARD_SIZE - 1 - i))
}

/// Whole-board scan for a completed line. Used when a position did not come
/// from a sequence of moves.
#[must_use]
pub fn winner(board: &Board) -> Option<Player> {
    WINNING_LINES.iter().find_map(|line| match board.line_cells(line) {
        [Cell::Mark(a), Cell::Mark(b), Cell::Mark(c)] if a == b && b == c => Some(a),
        _ => None,
    })
}
