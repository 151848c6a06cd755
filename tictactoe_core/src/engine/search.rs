use crate::engine::config::SearchConfig;
use crate::engine::eval::LineEvaluator;
use crate::engine::{Decision, Evaluator, Move, SearchLimit, SearchStats, Searcher};
use crate::error::NoLegalMoves;
use crate::logic::board::{Board, Player};
use crate::logic::game::{GameState, GameStatus};
use crate::logic::rules::completes_line;
use std::sync::Arc;

const INFINITY: i32 = 1_000_000;

/// Score of a finished game from `perspective`'s side, `None` while the game
/// is still running. `depth` is the number of plies below the root move, so
/// quicker wins and slower losses score better.
#[must_use]
pub fn terminal_score(
    status: GameStatus,
    perspective: Player,
    depth: u8,
    win_score: i32,
) -> Option<i32> {
    let depth = i32::from(depth);
    match status {
        GameStatus::InProgress => None,
        GameStatus::Drawn => Some(0),
        GameStatus::Won(winner) if winner == perspective => Some(win_score - depth),
        GameStatus::Won(_) => Some(depth - win_score),
    }
}

/// The first move that wins on the spot, otherwise the first move that takes
/// away an opponent's win, both in row-major order.
fn find_forced_move(
    board: &Board,
    moves: &[Move],
    perspective: Player,
) -> Option<(Move, Decision)> {
    if let Some(&mv) = moves.iter().find(|&&mv| completes_line(board, mv, perspective)) {
        return Some((mv, Decision::ImmediateWin));
    }
    moves
        .iter()
        .find(|&&mv| completes_line(board, mv, perspective.opponent()))
        .map(|&mv| (mv, Decision::ForcedBlock))
}

/// Plays `mv`, runs `f` on the resulting position and takes the move back.
/// `mv` must come from `available_moves()` of an unfinished `state`.
fn with_move<T>(state: &mut GameState, mv: Move, f: impl FnOnce(&mut GameState) -> T) -> T {
    let record = state.play(mv);
    let out = f(state);
    state.take_back(record);
    out
}

pub struct AlphaBetaEngine {
    config: Arc<SearchConfig>,
    evaluator: LineEvaluator,
    nodes_searched: u32,
    max_ply: u8,
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::new(Arc::new(SearchConfig::default()))
    }
}

impl AlphaBetaEngine {
    #[must_use]
    pub const fn new(config: Arc<SearchConfig>) -> Self {
        Self {
            config,
            evaluator: LineEvaluator::new(),
            nodes_searched: 0,
            max_ply: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<SearchConfig>) {
        self.config = config;
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for `perspective`, see [`Searcher::search`].
    pub fn best_move(
        &mut self,
        state: &mut GameState,
        perspective: Player,
        limit: SearchLimit,
    ) -> Result<Move, NoLegalMoves> {
        self.search(state, perspective, limit).map(|(mv, _)| mv)
    }

    fn alpha_beta(
        &mut self,
        state: &mut GameState,
        mut alpha: i32,
        mut beta: i32,
        depth: u8,
        perspective: Player,
        limit: SearchLimit,
    ) -> i32 {
        self.nodes_searched += 1;
        self.max_ply = self.max_ply.max(depth);

        if let Some(score) =
            terminal_score(state.status(), perspective, depth, self.config.win_score)
        {
            return score;
        }

        if let SearchLimit::Depth(cutoff) = limit {
            if depth > cutoff {
                return self.evaluator.evaluate(state.board(), perspective);
            }
        }

        let maximizing = state.to_move() == perspective;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for mv in state.available_moves() {
            let score = with_move(state, mv, |child| {
                self.alpha_beta(child, alpha, beta, depth + 1, perspective, limit)
            });

            if maximizing {
                best_score = best_score.max(score);
                alpha = alpha.max(score);
            } else {
                best_score = best_score.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        best_score
    }
}

impl Searcher for AlphaBetaEngine {
    /// Runs the forced-move scan, then a full alpha-beta search. The root move
    /// is always played by `perspective`, even when the state says the other
    /// side is to move.
    fn search(
        &mut self,
        state: &mut GameState,
        perspective: Player,
        limit: SearchLimit,
    ) -> Result<(Move, SearchStats), NoLegalMoves> {
        if state.is_over() {
            return Err(NoLegalMoves);
        }
        let moves = state.available_moves();
        if moves.is_empty() {
            return Err(NoLegalMoves);
        }

        self.nodes_searched = 0;
        self.max_ply = 0;

        if let Some((mv, decision)) = find_forced_move(state.board(), &moves, perspective) {
            log::debug!("{perspective:?} plays {mv}: {decision:?}");
            return Ok((
                mv,
                SearchStats {
                    decision,
                    ..SearchStats::default()
                },
            ));
        }

        let original_turn = state.to_move();
        state.set_to_move(perspective);

        let mut alpha = -INFINITY;
        let mut best: Option<(Move, i32)> = None;

        for &mv in &moves {
            let score = with_move(state, mv, |child| {
                self.alpha_beta(child, alpha, INFINITY, 0, perspective, limit)
            });

            // Strict comparison keeps the earliest move on ties.
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        state.set_to_move(original_turn);

        let (mv, score) = best.ok_or(NoLegalMoves)?;
        let stats = SearchStats {
            depth: self.max_ply,
            nodes: self.nodes_searched,
            score,
            decision: Decision::Minimax,
        };
        log::debug!(
            "{perspective:?} plays {mv}: score {score}, {} nodes, depth {}",
            stats.nodes,
            stats.depth
        );
        Ok((mv, stats))
    }
}
