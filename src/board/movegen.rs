//! Per-kind move generation.
//!
//! Pseudo-moves respect occupancy and board edges but may leave the mover's
//! king in check; [`Board::legal_moves`](super::Board::legal_moves) filters
//! them. Attack sets are what a piece threatens and feed check detection.

use super::direction::{Direction, Ray, KNIGHT_JUMPS};
use super::movement::{CastlingRook, Movement};
use super::piece::{Piece, PieceKind};
use super::square::Square;
use super::Board;

/// Appends the pseudo-moves of `piece` to `out`.
pub fn pseudo_moves(board: &Board, piece: &Piece, out: &mut Vec<Movement>) {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, piece, out),
        PieceKind::Knight => step_moves(board, piece, &KNIGHT_JUMPS, out),
        PieceKind::Bishop => slide_moves(board, piece, &Direction::DIAGONAL, out),
        PieceKind::Rook => slide_moves(board, piece, &Direction::ORTHOGONAL, out),
        PieceKind::Queen => slide_moves(board, piece, &Direction::ALL, out),
        PieceKind::King => {
            step_moves(board, piece, &KING_STEPS, out);
            castling_moves(board, piece, out);
        }
    }
}

/// Appends the squares `piece` attacks to `out`.
pub fn attacks(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    visit_attacks(board, piece, &mut |sq| {
        out.push(sq);
        false
    });
}

/// Whether `piece` attacks `target`; stops at the first hit.
pub fn attacks_square(board: &Board, piece: &Piece, target: Square) -> bool {
    visit_attacks(board, piece, &mut |sq| sq == target)
}

const KING_STEPS: [(i8, i8); 8] = [(0, 1), (0, -1), (-1, 0), (1, 0), (-1, 1), (1, 1), (-1, -1), (1, -1)];

/// Calls `f` for every attacked square until it returns true. Returns whether it did.
fn visit_attacks(board: &Board, piece: &Piece, f: &mut dyn FnMut(Square) -> bool) -> bool {
    let from = piece.square;
    match piece.kind {
        PieceKind::Pawn => {
            let fwd = piece.color.forward();
            [-1, 1].into_iter().filter_map(|df| from.offset(df, fwd)).any(|sq| f(sq))
        }
        PieceKind::Knight => KNIGHT_JUMPS.iter().filter_map(|&(df, dr)| from.offset(df, dr)).any(|sq| f(sq)),
        PieceKind::King => KING_STEPS.iter().filter_map(|&(df, dr)| from.offset(df, dr)).any(|sq| f(sq)),
        PieceKind::Bishop => slide_attacks(board, from, &Direction::DIAGONAL, f),
        PieceKind::Rook => slide_attacks(board, from, &Direction::ORTHOGONAL, f),
        PieceKind::Queen => slide_attacks(board, from, &Direction::ALL, f),
    }
}

fn slide_attacks(board: &Board, from: Square, directions: &[Direction], f: &mut dyn FnMut(Square) -> bool) -> bool {
    for &dir in directions {
        for sq in Ray::new(from, dir) {
            if f(sq) {
                return true;
            }
            if board.figure_at(sq).is_some() {
                break;
            }
        }
    }
    false
}

fn slide_moves(board: &Board, piece: &Piece, directions: &[Direction], out: &mut Vec<Movement>) {
    for &dir in directions {
        for sq in Ray::new(piece.square, dir) {
            match board.figure_at(sq) {
                None => out.push(Movement::new(*piece, sq, None)),
                Some(other) => {
                    if other.color != piece.color {
                        out.push(Movement::new(*piece, sq, Some(*other)));
                    }
                    break;
                }
            }
        }
    }
}

fn step_moves(board: &Board, piece: &Piece, steps: &[(i8, i8)], out: &mut Vec<Movement>) {
    for &(df, dr) in steps {
        let Some(sq) = piece.square.offset(df, dr) else { continue };
        match board.figure_at(sq) {
            None => out.push(Movement::new(*piece, sq, None)),
            Some(other) if other.color != piece.color => out.push(Movement::new(*piece, sq, Some(*other))),
            Some(_) => {}
        }
    }
}

fn pawn_moves(board: &Board, pawn: &Piece, out: &mut Vec<Movement>) {
    let fwd = pawn.color.forward();
    if let Some(one) = pawn.square.offset(0, fwd) {
        if board.figure_at(one).is_none() {
            push_pawn_move(out, Movement::new(*pawn, one, None));
            let on_start_rank = pawn.square.rank() == pawn.color.pawn_rank();
            if pawn.moves == 0 && on_start_rank {
                if let Some(two) = one.offset(0, fwd) {
                    if board.figure_at(two).is_none() {
                        out.push(Movement::new(*pawn, two, None));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(target) = pawn.square.offset(df, fwd) else { continue };
        match board.figure_at(target) {
            Some(victim) if victim.color != pawn.color => {
                push_pawn_move(out, Movement::new(*pawn, target, Some(*victim)));
            }
            Some(_) => {}
            None => {
                if board.en_passant_target() != Some(target) {
                    continue;
                }
                // the victim stands beside the pawn, on the target's file
                let Some(beside) = pawn.square.offset(df, 0) else { continue };
                if let Some(victim) = board.figure_at(beside) {
                    if victim.kind == PieceKind::Pawn && victim.color != pawn.color {
                        let mut m = Movement::new(*pawn, target, Some(*victim));
                        m.en_passant = true;
                        out.push(m);
                    }
                }
            }
        }
    }
}

/// Pushes a pawn move, fanning out into one movement per promotion choice on the last rank.
fn push_pawn_move(out: &mut Vec<Movement>, m: Movement) {
    if !m.to.is_last_rank_for(m.piece.color) {
        out.push(m);
        return;
    }
    for kind in PieceKind::PROMOTIONS {
        out.push(Movement { promotion: Some(kind), ..m });
    }
}

fn castling_moves(board: &Board, king: &Piece, out: &mut Vec<Movement>) {
    let home = king.color.home_rank();
    if king.has_moved() || king.square.rank() != home || king.square.file() != 4 {
        return;
    }
    // (rook file, files that must be empty, king transit file, king destination file)
    const SIDES: [(u8, &[u8], u8, u8); 2] = [(7, &[5, 6], 5, 6), (0, &[1, 2, 3], 3, 2)];

    for (rook_file, between, transit_file, dest_file) in SIDES {
        let corner = Square::at(rook_file, home);
        let Some(rook) = board.figure_at(corner) else { continue };
        if rook.kind != PieceKind::Rook || rook.color != king.color || rook.has_moved() {
            continue;
        }
        if between.iter().any(|&file| board.figure_at(Square::at(file, home)).is_some()) {
            continue;
        }
        let transit = Square::at(transit_file, home);
        let dest = Square::at(dest_file, home);
        if [king.square, transit, dest].into_iter().any(|sq| board.is_attacked(king.color, sq)) {
            continue;
        }
        let mut m = Movement::new(*king, dest, None);
        m.rook = Some(CastlingRook { rook: *rook, to: transit });
        out.push(m);
    }
}
