use log::{debug, info};
use rayon::prelude::*;

use crate::board::{Board, Color, Movement};
use crate::search::eval::{estimate, DRAW_SCORE, INF, MATE_SCORE};
use crate::search::noise::Jitter;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u32,
    pub threads: usize,
    /// Add bounded random noise to every leaf evaluation.
    pub jitter: bool,
    pub seed: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { depth: 3, threads: 1, jitter: false, seed: 0 }
    }
}

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub best: Option<Movement>,
    /// Centipawns from White's point of view.
    pub score_cp: i32,
    pub nodes: u64,
}

/// Minimax with fail-hard alpha-beta pruning over a single mutable board.
///
/// Scores are absolute: White maximises, Black minimises. Moves are applied
/// and rolled back in place, so one searcher never copies its board; only the
/// root-parallel mode clones it, once per root move.
#[derive(Default)]
pub struct Searcher {
    pub(crate) nodes: u64,
    threads: usize,
    jitter: Option<Jitter>,
    seed: u64,
}

impl Searcher {
    pub fn new(params: &SearchParams) -> Self {
        let mut s = Self::default();
        s.configure(params);
        s
    }

    fn configure(&mut self, params: &SearchParams) {
        self.threads = params.threads.max(1);
        self.seed = params.seed;
        self.jitter = params.jitter.then(|| Jitter::new(params.seed));
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn search_with_params(&mut self, board: &mut Board, params: SearchParams) -> SearchResult {
        self.configure(&params);
        self.best_move(board, params.depth)
    }

    /// Static evaluation plus jitter when enabled.
    pub fn evaluate(&mut self, board: &Board) -> i32 {
        let noise = self.jitter.as_mut().map_or(0, Jitter::sample);
        estimate(board) + noise
    }

    /// Searches every legal root move of the side to move with a full window
    /// and keeps the strictly best one, so ties go to the first move in
    /// generation order. Depth 0 is searched as depth 1.
    pub fn best_move(&mut self, board: &mut Board, depth: u32) -> SearchResult {
        self.nodes = 0;
        let color = board.side_to_move();
        let moves = board.legal_moves(color, None);
        if moves.is_empty() {
            self.nodes = 1;
            return SearchResult { best: None, score_cp: self.terminal_score(board, color, 0), nodes: self.nodes };
        }
        let child_depth = depth.saturating_sub(1);

        let scored: Vec<(Movement, i32)> = if self.threads > 1 && moves.len() > 1 {
            self.score_root_parallel(board, &moves, child_depth)
        } else {
            let mut scored = Vec::with_capacity(moves.len());
            for m in moves {
                let score = {
                    let mut trial = board.trial(m);
                    self.minimax_at(&mut trial, !color, child_depth, -INF, INF, 1)
                };
                scored.push((m, score));
            }
            scored
        };

        let mut best: Option<(Movement, i32)> = None;
        for (m, score) in scored {
            debug!("root {} scored {}", m, score);
            let better = match best {
                None => true,
                Some((_, best_score)) => is_better(color, score, best_score),
            };
            if better {
                best = Some((m, score));
            }
        }
        let Some((chosen, score)) = best else {
            return SearchResult { best: None, score_cp: self.terminal_score(board, color, 0), nodes: self.nodes };
        };
        info!("best move {} score {} nodes {} depth {}", chosen, score, self.nodes, depth);
        SearchResult { best: Some(chosen), score_cp: score, nodes: self.nodes }
    }

    fn score_root_parallel(&mut self, board: &Board, moves: &[Movement], depth: u32) -> Vec<(Movement, i32)> {
        let color = board.side_to_move();
        let jitter = self.jitter.is_some();
        let seed = self.seed;
        // Evaluate each root move independently with full window in parallel
        let results: Vec<(Movement, i32, u64)> = moves
            .par_iter()
            .enumerate()
            .map(|(i, &m)| {
                let mut child = board.clone();
                child.make_move(m);
                let mut w = Searcher::default();
                w.threads = 1;
                w.jitter = jitter.then(|| Jitter::new(seed ^ (i as u64 + 1)));
                let score = w.minimax_at(&mut child, !color, depth, -INF, INF, 1);
                (m, score, w.nodes)
            })
            .collect();
        self.nodes += results.iter().map(|r| r.2).sum::<u64>();
        results.into_iter().map(|(m, s, _)| (m, s)).collect()
    }

    /// Score of `board` with `color` to move, searched `depth` plies deep.
    pub fn minimax(&mut self, board: &mut Board, color: Color, depth: u32, alpha: i32, beta: i32) -> i32 {
        self.minimax_at(board, color, depth, alpha, beta, 0)
    }

    fn minimax_at(&mut self, board: &mut Board, color: Color, depth: u32, mut alpha: i32, mut beta: i32, ply: i32) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            return self.evaluate(board);
        }
        let moves = board.legal_moves(color, None);
        if moves.is_empty() {
            return self.terminal_score(board, color, ply);
        }

        let maximizing = color == Color::White;
        let mut best = if maximizing { -INF } else { INF };
        for m in moves {
            let score = {
                let mut trial = board.trial(m);
                self.minimax_at(&mut trial, !color, depth - 1, alpha, beta, ply + 1)
            };
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }

    /// Score of a position where `color` has no legal move.
    fn terminal_score(&self, board: &Board, color: Color, ply: i32) -> i32 {
        if board.test_for_check(color) {
            -color.sign() * (MATE_SCORE - ply)
        } else {
            DRAW_SCORE
        }
    }
}

fn is_better(color: Color, score: i32, best: i32) -> bool {
    match color {
        Color::White => score > best,
        Color::Black => score < best,
    }
}
