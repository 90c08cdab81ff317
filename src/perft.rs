use rayon::prelude::*;

use crate::board::{Board, Movement};

// Perft using make/rollback (no cloning)
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let color = board.side_to_move();
    let moves = board.legal_moves(color, None);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for m in moves {
        let mut trial = board.trial(m);
        nodes += perft(&mut trial, depth - 1);
    }
    nodes
}

/// Node count below each root move, in generation order.
pub fn divide(board: &mut Board, depth: u32) -> Vec<(Movement, u64)> {
    let color = board.side_to_move();
    let moves = board.legal_moves(color, None);
    moves
        .into_iter()
        .map(|m| {
            let mut trial = board.trial(m);
            (m, perft(&mut trial, depth.saturating_sub(1)))
        })
        .collect()
}

/// Root-split perft: one board clone per root move, subtrees counted on the rayon pool.
pub fn perft_parallel(board: &Board, depth: u32) -> u64 {
    if depth < 2 {
        return perft(&mut board.clone(), depth);
    }
    let mut root = board.clone();
    let moves = root.legal_moves(root.side_to_move(), None);
    moves
        .par_iter()
        .map(|&m| {
            let mut child = board.clone();
            child.make_move(m);
            perft(&mut child, depth - 1)
        })
        .sum()
}
