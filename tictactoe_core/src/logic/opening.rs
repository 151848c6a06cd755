use crate::engine::Move;
use crate::logic::game::GameState;
use rand::seq::SliceRandom;
use rand::Rng;

/// Corners and centre, the strongest first moves.
pub const OPENING_MOVES: [Move; 5] = [
    Move::new(0, 0),
    Move::new(0, 2),
    Move::new(2, 0),
    Move::new(2, 2),
    Move::new(1, 1),
];

/// A random corner or centre when no move has been played yet.
pub fn get_opening_move<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<Move> {
    if !state.history().is_empty() {
        return None;
    }

    let candidates: Vec<Move> = OPENING_MOVES
        .iter()
        .copied()
        .filter(|&mv| state.is_legal(mv))
        .collect();
    candidates.choose(rng).copied()
}
