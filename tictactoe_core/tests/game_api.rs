use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tictactoe_core::{
    Cell, DifficultyPolicy, DifficultyTier, GameState, GameStatus, IllegalMove, Move, MoveRecord,
    NoHistory, Player, SearchConfig,
};

#[test]
fn test_caller_drives_a_game() {
    let mut policy = DifficultyPolicy::with_rng(
        Arc::new(SearchConfig::default()),
        StdRng::seed_from_u64(9),
    );
    let mut game = GameState::new();

    // Human plays X in the centre, the engine answers as O.
    game.apply_move(Move::new(1, 1)).unwrap();
    let reply = policy.select_move(&game, DifficultyTier::Unbeatable).unwrap();
    assert!([Move::new(0, 0), Move::new(0, 2), Move::new(2, 0), Move::new(2, 2)]
        .contains(&reply));
    game.apply_move(reply).unwrap();

    assert_eq!(game.to_move(), Player::X);
    assert_eq!(game.cell(reply), Some(Cell::Mark(Player::O)));
    assert_eq!(
        game.history(),
        &[
            MoveRecord {
                position: Move::new(1, 1),
                player: Player::X
            },
            MoveRecord {
                position: reply,
                player: Player::O
            },
        ]
    );

    // Take back both moves.
    game.undo_move().unwrap();
    game.undo_move().unwrap();
    assert_eq!(game.undo_move(), Err(NoHistory));
    assert_eq!(game, GameState::new());
}

#[test]
fn test_illegal_moves_are_reported() {
    let mut game = GameState::new();
    game.apply_move(Move::new(0, 0)).unwrap();

    let err = game.apply_move(Move::new(0, 0)).unwrap_err();
    assert_eq!(err, IllegalMove::Occupied(Move::new(0, 0)));
    assert_eq!(err.to_string(), "position (0, 0) is already occupied");

    let err = game.apply_move(Move::new(9, 1)).unwrap_err();
    assert_eq!(err.to_string(), "position (9, 1) is outside the board");
    assert_eq!(game.history().len(), 1);
}

#[test]
fn test_transcript_serialises() {
    let game = GameState::from_moves(&[
        Move::new(0, 0),
        Move::new(1, 1),
        Move::new(0, 1),
        Move::new(0, 2),
        Move::new(2, 0),
    ])
    .unwrap();

    let transcript = serde_json::to_string(game.history()).unwrap();
    let records: Vec<MoveRecord> = serde_json::from_str(&transcript).unwrap();
    let replayed: Vec<Move> = records.iter().map(|r| r.position).collect();
    assert_eq!(GameState::from_moves(&replayed).unwrap(), game);

    let snapshot = serde_json::to_string(&game).unwrap();
    let restored: GameState = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(restored, game);
    assert_eq!(restored.status(), GameStatus::InProgress);
    assert_eq!(restored.summary(), "O's turn");
}
