use chemate::board::Board;
use chemate::search::alphabeta::{SearchParams, Searcher};
use std::fs::File;
use std::io::{BufRead, BufReader};

#[derive(Debug, serde::Deserialize)]
struct PosRec {
    fen: String,
    best: String,
}

fn read_records(path: &str) -> Option<Vec<PosRec>> {
    let f = File::open(path).ok()?;
    let rdr = BufReader::new(f);
    Some(
        rdr.lines()
            .map_while(|l| l.ok())
            .filter(|l| !l.trim().is_empty())
            .filter_map(|l| serde_json::from_str(&l).ok())
            .collect(),
    )
}

fn load_positions() -> Vec<PosRec> {
    if let Some(recs) = std::env::var("CHEMATE_TEST_POSITIONS").ok().and_then(|p| read_records(&p)) {
        return recs;
    }
    read_records("tests/data/positions.jsonl").expect("open bundled positions.jsonl")
}

fn search(fen: &str, threads: usize) -> Option<String> {
    let mut b = Board::from_fen(fen).expect("valid fen");
    let mut s = Searcher::default();
    let mut p = SearchParams::default();
    p.depth = 3;
    p.threads = threads;
    s.search_with_params(&mut b, p).best.map(|m| m.to_string())
}

#[test]
fn positions_single_thread_correct_move() {
    let poses = load_positions();
    assert!(!poses.is_empty());
    for rec in poses.iter() {
        assert_eq!(search(&rec.fen, 1).as_deref(), Some(rec.best.as_str()), "FEN {}", rec.fen);
    }
}

#[test]
fn positions_consistent_across_threads() {
    for rec in load_positions().iter() {
        assert_eq!(search(&rec.fen, 1), search(&rec.fen, 4), "FEN {}", rec.fen);
    }
}
