use crate::board::{Board, Square};

const PAWN: i32 = 100;
// half a pawn per unit of price for a piece standing in the center
const CENTER_PER_PRICE: i32 = 50;
const CASTLING_BONUS: i32 = 200;

// Mate scoring helpers
pub const MATE_SCORE: i32 = 30_000;
pub const DRAW_SCORE: i32 = 0;
/// Search window bound, beyond any reachable score.
pub const INF: i32 = 32_000;

// Side-agnostic material in centipawns: positive means White has more material.
pub fn material_eval_cp(board: &Board) -> i32 {
    board.balance() * PAWN
}

/// Occupation of d4, e4, d5 and e5, weighted by signed piece price.
/// Only counts when material is level.
pub fn center_eval_cp(board: &Board) -> i32 {
    if board.balance() != 0 {
        return 0;
    }
    Square::CENTER
        .iter()
        .filter_map(|&sq| board.figure_at(sq))
        .map(|p| p.price() * CENTER_PER_PRICE)
        .sum()
}

/// Bonus for every castling already played, signed by the side that castled.
pub fn castling_eval_cp(board: &Board) -> i32 {
    board
        .history()
        .iter()
        .filter(|m| m.is_castling())
        .map(|m| CASTLING_BONUS * m.piece.color.sign())
        .sum()
}

/// Static evaluation in centipawns, positive favouring White.
pub fn estimate(board: &Board) -> i32 {
    material_eval_cp(board) + center_eval_cp(board) + castling_eval_cp(board)
}
