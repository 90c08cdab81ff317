use chemate::board::Board;
use chemate::selfplay::{generate_games, play_game, read_jsonl, write_jsonl, GameResult, SelfPlayParams};
use pretty_assertions::assert_eq;

fn random_params() -> SelfPlayParams {
    SelfPlayParams { games: 2, max_plies: 16, depth: 1, threads: 1, use_engine: false, jitter: false, seed: 42, fen: None }
}

#[test]
fn selfplay_generates_games_deterministically() {
    let params = random_params();
    let g1 = generate_games(&params).unwrap();
    let g2 = generate_games(&params).unwrap();
    assert_eq!(g1.len(), 2);
    assert_eq!(g1, g2);
    assert!(g1.iter().all(|g| g.moves.len() <= 16));
    // each game has its own seed
    assert_ne!(g1[0].moves, g1[1].moves);
}

#[test]
fn single_game_replays_from_its_index() {
    let params = random_params();
    let games = generate_games(&params).unwrap();
    assert_eq!(play_game(&params, 1).unwrap(), games[1]);
}

#[test]
fn ply_cap_leaves_game_unfinished() {
    let mut params = random_params();
    params.max_plies = 3;
    let game = play_game(&params, 0).unwrap();
    assert_eq!(game.moves.len(), 3);
    assert_eq!(game.result, GameResult::Unfinished);
    let board = Board::from_fen(&game.final_fen).unwrap();
    assert_eq!(board.side_to_move(), chemate::Color::Black);
    assert_eq!(board.move_number(), 2);
}

#[test]
fn engine_delivers_mate() {
    let params = SelfPlayParams {
        games: 1,
        max_plies: 10,
        depth: 2,
        threads: 1,
        use_engine: true,
        jitter: false,
        seed: 1,
        fen: Some("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".to_string()),
    };
    let game = play_game(&params, 0).unwrap();
    assert_eq!(game.moves, vec!["Ra1-a8+"]);
    assert_eq!(game.result, GameResult::WhiteWins);
}

#[test]
fn finished_positions_report_their_result() {
    let mut params = random_params();
    params.fen = Some("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".to_string());
    let game = play_game(&params, 0).unwrap();
    assert!(game.moves.is_empty());
    assert_eq!(game.result, GameResult::Draw);

    params.fen = Some("7k/8/p7/8/3b4/8/6PP/2r3K1 w - - 0 1".to_string());
    assert_eq!(play_game(&params, 0).unwrap().result, GameResult::BlackWins);

    params.fen = Some("not a fen".to_string());
    assert!(play_game(&params, 0).is_err());
}

#[test]
fn jsonl_round_trip() {
    let games = generate_games(&random_params()).unwrap();
    let path = std::env::temp_dir().join(format!("chemate_selfplay_{}.jsonl", std::process::id()));
    write_jsonl(&games, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), games.len());
    let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert!(first["moves"].is_array());
    assert!(first["final_fen"].is_string());

    assert_eq!(read_jsonl(&path).unwrap(), games);
    std::fs::remove_file(&path).unwrap();
}
