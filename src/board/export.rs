use std::fmt::Write;

use super::piece::PieceKind;
use super::square::{Color, Square};
use super::Board;

/// Renders a board to text.
pub trait Exporter {
    fn export(board: &Board) -> String;
}

/// 8x8 letter grid, rank 8 on top, with file and rank labels.
pub struct PlainExporter;

/// Same grid drawn with chess glyphs.
pub struct UnicodeExporter;

/// Full six-field FEN record.
pub struct FenExporter;

fn grid(board: &Board, draw: impl Fn(Option<char>, Option<char>) -> char) -> String {
    let mut out = String::with_capacity(8 * 20 + 20);
    for rank in (0..8u8).rev() {
        let _ = write!(out, "{} ", rank + 1);
        for file in 0..8u8 {
            let piece = board.figure_at(Square::at(file, rank));
            out.push(draw(piece.map(|p| p.char()), piece.map(|p| p.glyph())));
            if file < 7 {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    out
}

impl Exporter for PlainExporter {
    fn export(board: &Board) -> String {
        grid(board, |letter, _| letter.unwrap_or('.'))
    }
}

impl Exporter for UnicodeExporter {
    fn export(board: &Board) -> String {
        grid(board, |_, glyph| glyph.unwrap_or('·'))
    }
}

impl Exporter for FenExporter {
    fn export(board: &Board) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match board.figure_at(Square::at(file, rank)) {
                    None => empty += 1,
                    Some(p) => {
                        if empty > 0 {
                            let _ = write!(fen, "{empty}");
                            empty = 0;
                        }
                        fen.push(p.char());
                    }
                }
            }
            if empty > 0 {
                let _ = write!(fen, "{empty}");
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        let side = match board.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let en_passant = board.en_passant_target().map_or_else(|| "-".to_string(), |sq| sq.to_string());
        let _ = write!(
            fen,
            " {side} {} {en_passant} {} {}",
            castling_rights(board),
            board.halfmove_clock(),
            board.move_number()
        );
        fen
    }
}

/// `KQkq` subset derived from king and rook move counters.
fn castling_rights(board: &Board) -> String {
    let mut rights = String::with_capacity(4);
    for color in [Color::White, Color::Black] {
        let home = color.home_rank();
        let king_ready = board
            .figure_at(Square::at(4, home))
            .map_or(false, |k| k.kind == PieceKind::King && k.color == color && !k.has_moved());
        if !king_ready {
            continue;
        }
        for (file, letter) in [(7, PieceKind::King), (0, PieceKind::Queen)] {
            let rook_ready = board
                .figure_at(Square::at(file, home))
                .map_or(false, |r| r.kind == PieceKind::Rook && r.color == color && !r.has_moved());
            if rook_ready {
                rights.push(letter.to_char(color));
            }
        }
    }
    if rights.is_empty() {
        rights.push('-');
    }
    rights
}
