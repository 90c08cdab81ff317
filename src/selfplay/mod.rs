use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, FenExporter, Movement};
use crate::error::Result;
use crate::search::alphabeta::{SearchParams, Searcher};
use crate::search::noise::choose_uniform;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub depth: u32,
    pub threads: usize,
    /// Engine moves when true, uniformly random legal moves otherwise.
    pub use_engine: bool,
    pub jitter: bool,
    pub seed: u64,
    /// Starting position; the standard one when `None`.
    pub fen: Option<String>,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 1, max_plies: 200, depth: 2, threads: 1, use_engine: true, jitter: true, seed: 42, fen: None }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    Unfinished,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<String>,
    pub result: GameResult,
    pub final_fen: String,
}

pub fn generate_games(params: &SelfPlayParams) -> Result<Vec<GameRecord>> {
    (0..params.games).map(|gi| play_game(params, gi)).collect()
}

/// Plays game number `index` of a run. Each game has its own seed derived
/// from the run seed, so any game can be replayed on its own.
pub fn play_game(params: &SelfPlayParams, index: usize) -> Result<GameRecord> {
    let mut board = match &params.fen {
        Some(fen) => Board::from_fen(fen)?,
        None => Board::initial(),
    };
    let game_seed = params.seed.wrapping_add(index as u64);
    let mut rng = SmallRng::seed_from_u64(game_seed);
    let mut moves = Vec::new();

    let result = loop {
        let color = board.side_to_move();
        let legal = board.legal_moves(color, None);
        if legal.is_empty() {
            break if board.test_for_check(color) {
                match color {
                    Color::White => GameResult::BlackWins,
                    Color::Black => GameResult::WhiteWins,
                }
            } else {
                GameResult::Draw
            };
        }
        if moves.len() >= params.max_plies {
            break GameResult::Unfinished;
        }

        let chosen = if params.use_engine {
            select_engine_move(&mut board, params, game_seed ^ ((moves.len() as u64) << 32))
        } else {
            choose_uniform(&legal, &mut rng).copied()
        };
        let Some(m) = chosen else { break GameResult::Unfinished };
        debug!("game {} ply {}: {}", index, moves.len() + 1, m);
        moves.push(m.to_string());
        board.make_move(m);
    };

    info!("game {} finished after {} plies: {:?}", index, moves.len(), result);
    Ok(GameRecord { moves, result, final_fen: board.export::<FenExporter>() })
}

fn select_engine_move(board: &mut Board, params: &SelfPlayParams, seed: u64) -> Option<Movement> {
    let mut s = Searcher::default();
    let mut p = SearchParams::default();
    p.depth = params.depth;
    p.threads = params.threads;
    p.jitter = params.jitter;
    p.seed = seed;
    s.search_with_params(board, p).best
}

/// Writes one JSON object per game and line.
pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], path: P) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_jsonl<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<GameRecord>> {
    let text = std::fs::read_to_string(path)?;
    let mut games = Vec::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        games.push(serde_json::from_str(line)?);
    }
    Ok(games)
}
