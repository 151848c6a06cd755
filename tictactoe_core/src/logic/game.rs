use crate::engine::Move;
use crate::error::{IllegalMove, NoHistory, ParseBoardError};
use crate::logic::board::{Board, Cell, Player, CELL_COUNT, WINNING_LINES};
use crate::logic::rules::{evaluate, validate_move, winner};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Drawn,
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    pub position: Move,
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    to_move: Player,
    status: GameStatus,
    history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            status: GameStatus::InProgress,
            history: Vec::with_capacity(CELL_COUNT),
        }
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.to_move = Player::X;
        self.status = GameStatus::InProgress;
        self.history.clear();
    }

    /// Replays `moves` from the empty board.
    pub fn from_moves(moves: &[Move]) -> Result<Self, IllegalMove> {
        let mut state = Self::new();
        for &mv in moves {
            state.apply_move(mv)?;
        }
        Ok(state)
    }

    /// Parses the compact notation produced by [`GameState::to_notation`].
    /// `X`/`O` are marks, `_` or `.` empty, `/` and whitespace are ignored.
    ///
    /// The position carries no real move order, so a plausible history is
    /// synthesised: marks alternate in row-major order, and for a won board
    /// the cell shared by every completed line is played last.
    pub fn from_notation(notation: &str) -> Result<Self, ParseBoardError> {
        let mut cells = [Cell::Empty; CELL_COUNT];
        let mut count = 0;
        for ch in notation.chars().filter(|c| *c != '/' && !c.is_whitespace()) {
            let cell = match ch {
                'X' | 'x' => Cell::Mark(Player::X),
                'O' | 'o' => Cell::Mark(Player::O),
                '_' | '.' => Cell::Empty,
                character => {
                    return Err(ParseBoardError::InvalidCharacter {
                        character,
                        position: count,
                    })
                }
            };
            if let Some(slot) = cells.get_mut(count) {
                *slot = cell;
            }
            count += 1;
        }
        if count != CELL_COUNT {
            return Err(ParseBoardError::InvalidLength {
                expected: CELL_COUNT,
                got: count,
            });
        }

        let board = Board::from_cells(cells);
        let x_count = board.count(Player::X);
        let o_count = board.count(Player::O);
        if x_count != o_count && x_count != o_count + 1 {
            return Err(ParseBoardError::InvalidPieceCounts { x_count, o_count });
        }

        let last_mover = if x_count > o_count { Player::X } else { Player::O };
        let mut x_marks: Vec<Move> = marks_of(&board, Player::X);
        let mut o_marks: Vec<Move> = marks_of(&board, Player::O);

        let status = match winner(&board) {
            Some(player) => {
                if player != last_mover || winner_for(&board, player.opponent()) {
                    return Err(ParseBoardError::ImpossibleOutcome);
                }
                let marks = match player {
                    Player::X => &mut x_marks,
                    Player::O => &mut o_marks,
                };
                move_winning_cell_last(&board, player, marks)?;
                GameStatus::Won(player)
            }
            None if board.is_full() => GameStatus::Drawn,
            None => GameStatus::InProgress,
        };

        let mut history = Vec::with_capacity(CELL_COUNT);
        let mut o_iter = o_marks.into_iter();
        for x in x_marks {
            history.push(MoveRecord {
                position: x,
                player: Player::X,
            });
            if let Some(o) = o_iter.next() {
                history.push(MoveRecord {
                    position: o,
                    player: Player::O,
                });
            }
        }

        // A finished game keeps the last mover, as apply_move does.
        let to_move = match status {
            GameStatus::Won(player) => player,
            GameStatus::Drawn => last_mover,
            GameStatus::InProgress => last_mover.opponent(),
        };

        Ok(Self {
            board,
            to_move,
            status,
            history,
        })
    }

    #[must_use]
    pub fn to_notation(&self) -> String {
        self.board.to_notation()
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn cell(&self, mv: Move) -> Option<Cell> {
        self.board.get(mv)
    }

    #[must_use]
    pub const fn to_move(&self) -> Player {
        self.to_move
    }

    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.position)
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn available_moves(&self) -> Vec<Move> {
        self.board.empty_positions().collect()
    }

    #[must_use]
    pub fn is_legal(&self, mv: Move) -> bool {
        validate_move(&self.board, self.status, mv).is_ok()
    }

    pub fn apply_move(&mut self, mv: Move) -> Result<(), IllegalMove> {
        validate_move(&self.board, self.status, mv)?;
        self.play(mv);
        Ok(())
    }

    pub fn undo_move(&mut self) -> Result<(), NoHistory> {
        let record = self.history.last().copied().ok_or(NoHistory)?;
        self.take_back(record);
        Ok(())
    }

    /// Marks `mv` for the side to move without validation. `mv` must be one
    /// of `available_moves()` of an unfinished position.
    pub(crate) fn play(&mut self, mv: Move) -> MoveRecord {
        let record = MoveRecord {
            position: mv,
            player: self.to_move,
        };
        self.board.set(mv, Cell::Mark(self.to_move));
        self.history.push(record);
        self.status = evaluate(&self.board, mv);
        if self.status == GameStatus::InProgress {
            self.to_move = self.to_move.opponent();
        }
        record
    }

    /// Reverts `record`, which must be the last move played.
    pub(crate) fn take_back(&mut self, record: MoveRecord) {
        self.history.pop();
        self.board.set(record.position, Cell::Empty);
        self.to_move = record.player;
        // Only positions reached by play are unwound, so the position before
        // any terminal move was in progress.
        self.status = GameStatus::InProgress;
    }

    /// Hands the move to `player` without touching the board. Used by the
    /// engine to search from either side; callers restore the original side.
    pub(crate) fn set_to_move(&mut self, player: Player) {
        self.to_move = player;
    }

    /// "X wins!", "Draw" or "X's turn".
    #[must_use]
    pub fn summary(&self) -> String {
        match self.status {
            GameStatus::Won(player) => format!("{} wins!", player.symbol()),
            GameStatus::Drawn => "Draw".to_string(),
            GameStatus::InProgress => format!("{}'s turn", self.to_move.symbol()),
        }
    }

    /// 1 for a win, -1 for a loss, 0 for a draw or an unfinished game.
    #[must_use]
    pub fn outcome_for(&self, player: Player) -> i32 {
        match self.status {
            GameStatus::Won(winner) if winner == player => 1,
            GameStatus::Won(_) => -1,
            GameStatus::Drawn | GameStatus::InProgress => 0,
        }
    }
}

fn marks_of(board: &Board, player: Player) -> Vec<Move> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Cell::Mark(player))
        .map(|(idx, _)| Move::from_index(idx))
        .collect()
}

fn line_complete(board: &Board, line: &[usize; 3], player: Player) -> bool {
    board
        .line_cells(line)
        .iter()
        .all(|&c| c == Cell::Mark(player))
}

fn winner_for(board: &Board, player: Player) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line_complete(board, line, player))
}

/// Reorders `marks` so the cell lying on every line `player` completed is
/// played last. Lines without a common cell cannot come from one move.
fn move_winning_cell_last(
    board: &Board,
    player: Player,
    marks: &mut Vec<Move>,
) -> Result<(), ParseBoardError> {
    let complete: Vec<&[usize; 3]> = WINNING_LINES
        .iter()
        .filter(|line| line_complete(board, line, player))
        .collect();
    let shared = complete
        .first()
        .and_then(|first| {
            first
                .iter()
                .copied()
                .find(|idx| complete.iter().all(|line| line.contains(idx)))
        })
        .map(Move::from_index)
        .ok_or(ParseBoardError::ImpossibleOutcome)?;

    if let Some(pos) = marks.iter().position(|&m| m == shared) {
        let mv = marks.remove(pos);
        marks.push(mv);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = GameState::new();
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.history().is_empty());
        assert_eq!(game.available_moves().len(), 9);
        assert_eq!(game.summary(), "X's turn");
    }

    #[test]
    fn test_apply_and_undo() {
        let mut game = GameState::new();
        let initial = game.clone();

        game.apply_move(Move::new(1, 1)).unwrap();
        assert_eq!(game.to_move(), Player::O);
        assert_eq!(game.cell(Move::new(1, 1)), Some(Cell::Mark(Player::X)));
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.last_move(), Some(Move::new(1, 1)));

        game.undo_move().unwrap();
        assert_eq!(game, initial);
    }

    #[test]
    fn test_undo_empty_history() {
        let mut game = GameState::new();
        assert_eq!(game.undo_move(), Err(NoHistory));
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn test_illegal_move_leaves_state_unchanged() {
        let mut game = GameState::from_moves(&[Move::new(0, 0)]).unwrap();
        let before = game.clone();

        assert_eq!(
            game.apply_move(Move::new(0, 0)),
            Err(IllegalMove::Occupied(Move::new(0, 0)))
        );
        assert_eq!(
            game.apply_move(Move::new(0, 3)),
            Err(IllegalMove::OutOfBounds(Move::new(0, 3)))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_win_keeps_mover_and_blocks_further_moves() {
        // X: (0,0) (0,1) (0,2); O: (1,0) (1,1)
        let mut game = GameState::from_moves(&[
            Move::new(0, 0),
            Move::new(1, 0),
            Move::new(0, 1),
            Move::new(1, 1),
            Move::new(0, 2),
        ])
        .unwrap();

        assert_eq!(game.status(), GameStatus::Won(Player::X));
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(game.summary(), "X wins!");
        assert_eq!(game.outcome_for(Player::X), 1);
        assert_eq!(game.outcome_for(Player::O), -1);
        assert!(!game.is_legal(Move::new(2, 2)));
        assert_eq!(game.apply_move(Move::new(2, 2)), Err(IllegalMove::GameOver));

        game.undo_move().unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.to_move(), Player::X);
    }

    #[test]
    fn test_draw_detection() {
        // X O X / X O O / O X X
        let game = GameState::from_moves(&[
            Move::new(0, 0),
            Move::new(0, 1),
            Move::new(0, 2),
            Move::new(1, 1),
            Move::new(1, 0),
            Move::new(1, 2),
            Move::new(2, 1),
            Move::new(2, 0),
            Move::new(2, 2),
        ])
        .unwrap();

        assert_eq!(game.status(), GameStatus::Drawn);
        assert!(game.available_moves().is_empty());
        assert_eq!(game.summary(), "Draw");
        assert_eq!(game.outcome_for(Player::O), 0);
    }

    #[test]
    fn test_reset() {
        let mut game = GameState::from_moves(&[Move::new(2, 2), Move::new(0, 0)]).unwrap();
        game.reset();
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn test_from_notation_in_progress() {
        let game = GameState::from_notation("XX_/OO_/___").unwrap();
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.history().len(), 4);
        assert_eq!(game.to_notation(), "XX_/OO_/___");

        let game = GameState::from_notation("x.. .o. ..x").unwrap();
        assert_eq!(game.to_move(), Player::O);
    }

    #[test]
    fn test_from_notation_won_unwinds_cleanly() {
        let mut game = GameState::from_notation("XXX/OO_/___").unwrap();
        assert_eq!(game.status(), GameStatus::Won(Player::X));
        assert_eq!(game.to_move(), Player::X);

        let last = game.last_move().unwrap();
        assert_eq!(game.history().last().unwrap().player, Player::X);
        assert_eq!(last.row, 0);

        game.undo_move().unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.is_legal(last));
        game.apply_move(last).unwrap();
        assert_eq!(game.status(), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_from_notation_double_line_unwinds_cleanly() {
        // X X X
        // O O X
        // O O X
        // The last X had to land on (0, 2), the only cell on both lines.
        let mut game = GameState::from_notation("XXX/OOX/OOX").unwrap();
        assert_eq!(game.status(), GameStatus::Won(Player::X));
        assert_eq!(game.last_move(), Some(Move::new(0, 2)));

        game.undo_move().unwrap();
        assert_eq!(winner(game.board()), None);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.to_move(), Player::X);

        game.apply_move(Move::new(0, 2)).unwrap();
        assert_eq!(game.status(), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_from_notation_draw_matches_replay() {
        let replay = GameState::from_moves(&[
            Move::new(0, 0),
            Move::new(0, 1),
            Move::new(0, 2),
            Move::new(1, 1),
            Move::new(1, 0),
            Move::new(1, 2),
            Move::new(2, 1),
            Move::new(2, 0),
            Move::new(2, 2),
        ])
        .unwrap();
        let parsed = GameState::from_notation("XOX/XOO/OXX").unwrap();

        assert_eq!(parsed.status(), GameStatus::Drawn);
        assert_eq!(parsed.to_move(), Player::X);
        assert_eq!(parsed, replay);
    }

    #[test]
    fn test_play_and_take_back_restore_state() {
        let mut game = GameState::from_notation("X__/_O_/___").unwrap();
        let before = game.clone();
        for mv in before.available_moves() {
            let record = game.play(mv);
            assert_eq!(record.player, Player::X);
            assert_eq!(game.last_move(), Some(mv));
            game.take_back(record);
            assert_eq!(game, before);
        }
    }

    #[test]
    fn test_from_notation_errors() {
        assert_eq!(
            GameState::from_notation("XX_/OO_"),
            Err(ParseBoardError::InvalidLength {
                expected: 9,
                got: 6
            })
        );
        assert_eq!(
            GameState::from_notation("XZ_/OO_/___"),
            Err(ParseBoardError::InvalidCharacter {
                character: 'Z',
                position: 1
            })
        );
        assert_eq!(
            GameState::from_notation("XXX/O__/___"),
            Err(ParseBoardError::InvalidPieceCounts {
                x_count: 3,
                o_count: 1
            })
        );
        // O completed a line but X has moved more often.
        assert_eq!(
            GameState::from_notation("OOO/XX_/XX_"),
            Err(ParseBoardError::ImpossibleOutcome)
        );
        assert_eq!(
            GameState::from_notation("XXX/OOO/___"),
            Err(ParseBoardError::ImpossibleOutcome)
        );
    }
}
