use chemate::board::{Board, Color, Piece, PieceKind, Square};
use pretty_assertions::assert_eq;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn notation(board: &Board, at: &str) -> Vec<String> {
    board.figure_moves(sq(at)).iter().map(|m| m.to_string()).collect()
}

#[test]
fn pawn_double_step_only_from_start() {
    let mut board = Board::empty();
    board.put(Piece::white(PieceKind::Pawn, "d2").unwrap());
    assert_eq!(notation(&board, "d2"), vec!["d2-d3", "d2-d4"]);

    let m = board.figure_moves(sq("d2"))[0];
    board.make_move(m);
    assert_eq!(notation(&board, "d3"), vec!["d3-d4"]);

    board.put(Piece::black(PieceKind::Pawn, "b7").unwrap());
    assert_eq!(notation(&board, "b7"), vec!["b7-b6", "b7-b5"]);
    let m = board.figure_moves(sq("b7"))[1];
    board.make_move(m);
    assert_eq!(notation(&board, "b5"), vec!["b5-b4"]);
}

#[test]
fn pawn_off_its_start_rank_never_double_steps() {
    // unmoved according to its counter, but placed on the third rank
    let mut board = Board::empty();
    board.put(Piece::white(PieceKind::Pawn, "c3").unwrap());
    assert_eq!(notation(&board, "c3"), vec!["c3-c4"]);
}

#[test]
fn pawns_blocked_and_fighting() {
    let mut board = Board::empty();
    board.put(Piece::white(PieceKind::Pawn, "a8").unwrap());
    assert!(board.figure_moves(sq("a8")).is_empty());
    board.put(Piece::white(PieceKind::Pawn, "a7").unwrap());
    assert!(board.figure_moves(sq("a7")).is_empty());

    for (at, color) in [("d4", Color::White), ("e4", Color::White), ("d5", Color::Black), ("e5", Color::Black)] {
        board.put(Piece::new(PieceKind::Pawn, color, sq(at)));
    }
    assert_eq!(notation(&board, "d4"), vec!["d4xe5"]);
    assert_eq!(notation(&board, "e4"), vec!["e4xd5"]);
    assert_eq!(notation(&board, "d5"), vec!["d5xe4"]);
    assert_eq!(notation(&board, "e5"), vec!["e5xd4"]);
}

#[test]
fn pawn_attacks_are_diagonal_only() {
    let mut board = Board::empty();
    board.put(Piece::white(PieceKind::Pawn, "e4").unwrap());
    board.put(Piece::black(PieceKind::Pawn, "a7").unwrap());
    let mut white: Vec<String> = board.all_attacks(Some(Color::White)).iter().map(|s| s.to_string()).collect();
    white.sort();
    assert_eq!(white, vec!["d5", "f5"]);
    let black: Vec<String> = board.all_attacks(Some(Color::Black)).iter().map(|s| s.to_string()).collect();
    assert_eq!(black, vec!["b6"]);
    assert_eq!(board.all_attacks(None).len(), 3);
}

#[test]
fn knight_in_the_middle_and_in_the_corner() {
    let mut board = Board::empty();
    board.put(Piece::white(PieceKind::Knight, "d5").unwrap());
    board.put(Piece::white(PieceKind::Knight, "a1").unwrap());
    assert_eq!(board.figure_moves(sq("d5")).len(), 8);
    assert_eq!(notation(&board, "a1"), vec!["Na1-b3", "Na1-c2"]);

    // friendly pieces block, enemy pieces are captured
    board.put(Piece::white(PieceKind::Pawn, "b3").unwrap());
    board.put(Piece::black(PieceKind::Rook, "c2").unwrap());
    assert_eq!(notation(&board, "a1"), vec!["Na1xc2"]);
}

#[test]
fn king_steps() {
    let mut board = Board::empty();
    board.put(Piece::white(PieceKind::King, "b2").unwrap());
    board.put(Piece::black(PieceKind::King, "g8").unwrap());
    let moves = board.figure_moves(sq("b2"));
    assert_eq!(moves.len(), 8);

    let corner = moves.into_iter().find(|m| m.to_string() == "Kb2-a1").unwrap();
    board.make_move(corner);
    assert_eq!(board.figure_moves(sq("a1")).len(), 3);
    assert_eq!(notation(&board, "g8")[0], "kg8-g7");
}

#[test]
fn sliders_stop_at_the_first_piece() {
    let mut board = Board::empty();
    board.put(Piece::white(PieceKind::Rook, "a1").unwrap());
    board.put(Piece::white(PieceKind::Pawn, "a3").unwrap());
    board.put(Piece::black(PieceKind::Knight, "d1").unwrap());
    assert_eq!(notation(&board, "a1"), vec!["Ra1-a2", "Ra1-b1", "Ra1-c1", "Ra1xd1"]);

    board.put(Piece::white(PieceKind::Bishop, "h8").unwrap());
    // the a1 rook ends the long diagonal
    assert_eq!(board.figure_moves(sq("h8")).len(), 6);
    board.put(Piece::white(PieceKind::Queen, "d4").unwrap());
    // h8 bishop now stops before d4
    assert_eq!(board.figure_moves(sq("h8")).len(), 3);
}

#[test]
fn promotion_fans_out_for_both_colors() {
    let mut board = Board::from_fen("7n/P5P1/7k/8/2K5/8/p5p1/7N w - - 0 1").unwrap();

    let legal = |board: &mut Board, color: Color, at: &str| -> Vec<String> {
        board.legal_moves(color, Some(sq(at))).iter().map(|m| m.to_string()).collect()
    };
    assert_eq!(legal(&mut board, Color::White, "a7"), vec!["a7-a8=Q", "a7-a8=R", "a7-a8=B", "a7-a8=N"]);
    // g7 may also capture on h8
    assert_eq!(legal(&mut board, Color::White, "g7").len(), 8);

    assert_eq!(legal(&mut board, Color::Black, "a2"), vec!["a2-a1=q", "a2-a1=r", "a2-a1=b", "a2-a1=n"]);
    let g2 = legal(&mut board, Color::Black, "g2");
    assert_eq!(g2.len(), 8);
    assert!(g2.contains(&"g2xh1=q".to_string()));
}

#[test]
fn promotion_replaces_the_pawn() {
    let mut board = Board::from_fen("7n/P5P1/8/8/8/8/p5p1/7N").unwrap();
    let before = board.balance();
    let queen = board.figure_moves(sq("a7")).into_iter().find(|m| m.promotion == Some(PieceKind::Queen)).unwrap();
    board.make_move(queen);

    let a8 = board.figure_at(sq("a8")).unwrap();
    assert_eq!((a8.kind, a8.color), (PieceKind::Queen, Color::White));
    assert!(board.figure_at(sq("a7")).is_none());
    assert_eq!(board.balance(), before + 8);

    board.rollback();
    assert_eq!(board.figure_at(sq("a7")).map(|p| p.kind), Some(PieceKind::Pawn));
    assert!(board.figure_at(sq("a8")).is_none());
    assert_eq!(board.balance(), before);
}

#[test]
fn legal_moves_keep_the_king_safe() {
    // the f6 pawn is pinned against the king by the a6 rook
    let mut board = Board::from_fen("8/8/r4PK1/8/1k6/8/8/8").unwrap();
    let moves: Vec<String> = board.legal_moves(Color::White, None).iter().map(|m| m.to_string()).collect();
    assert_eq!(moves.len(), 7);
    assert!(moves.iter().all(|m| m.starts_with('K')));
}

#[test]
fn legal_moves_filtered_by_square() {
    let mut board = Board::from_fen("r1bqkbnr/pppp1ppp/8/4p2Q/2B1P3/2K5/PP1P1PPP/n1BK2NR").unwrap();
    let queen = board.figure_at(sq("h5")).copied().unwrap();
    assert_eq!((queen.kind, queen.color), (PieceKind::Queen, Color::White));

    let moves: Vec<String> = board.legal_moves(Color::White, Some(sq("h5"))).iter().map(|m| m.to_string()).collect();
    assert!(moves.contains(&"Qh5xf7+".to_string()), "{moves:?}");
    assert!(moves.iter().all(|m| m.starts_with("Qh5")));

    // a square holding the other side's piece yields nothing
    assert!(board.legal_moves(Color::White, Some(sq("e8"))).is_empty());
    assert!(board.legal_moves(Color::White, Some(sq("e4"))).is_empty());
}
