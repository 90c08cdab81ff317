use chemate::board::Board;
use chemate::perft::{divide, perft, perft_parallel};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

#[test]
fn perft_startpos_small_depths() {
    let mut b = Board::initial();
    assert_eq!(perft(&mut b, 0), 1);
    assert_eq!(perft(&mut b, 1), 20);
    assert_eq!(perft(&mut b, 2), 400);
    assert_eq!(perft(&mut b, 3), 8902);
    assert_eq!(b, Board::initial());
}

#[test]
fn perft_kiwipete() {
    let mut b = Board::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft(&mut b, 1), 48);
    assert_eq!(perft(&mut b, 2), 2039);
}

#[test]
fn perft_position_3() {
    let mut b = Board::from_fen(POSITION_3).unwrap();
    assert_eq!(perft(&mut b, 1), 14);
    assert_eq!(perft(&mut b, 2), 191);
    assert_eq!(perft(&mut b, 3), 2812);
}

#[test]
fn perft_parallel_matches_serial() {
    let b = Board::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft_parallel(&b, 2), 2039);
    assert_eq!(perft_parallel(&Board::initial(), 3), 8902);
    assert_eq!(perft_parallel(&Board::initial(), 1), 20);
}

#[test]
fn divide_sums_to_perft() {
    let mut b = Board::initial();
    let parts = divide(&mut b, 3);
    assert_eq!(parts.len(), 20);
    assert_eq!(parts.iter().map(|(_, n)| n).sum::<u64>(), 8902);
    let e2e4 = parts.iter().find(|(m, _)| m.to_uci() == "e2e4").unwrap();
    assert_eq!(e2e4.1, 600);
}
