//! Board setups: empty, the standard start, and FEN.

use std::str::FromStr;

use super::piece::{Piece, PieceKind};
use super::square::{Color, Square};
use crate::error::{ChessError, Result};

/// Something that knows how to populate a [`Board`](super::Board).
pub trait PositionFactory {
    fn pieces(&self) -> Result<Vec<Piece>>;

    fn side_to_move(&self) -> Color {
        Color::White
    }

    fn move_number(&self) -> u32 {
        1
    }

    fn halfmove_clock(&self) -> u32 {
        0
    }

    fn en_passant(&self) -> Option<Square> {
        None
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyPosition;

impl PositionFactory for EmptyPosition {
    fn pieces(&self) -> Result<Vec<Piece>> {
        Ok(Vec::new())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InitialPosition;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl InitialPosition {
    pub fn standard_pieces(&self) -> Vec<Piece> {
        let mut pieces = Vec::with_capacity(32);
        for color in [Color::White, Color::Black] {
            for (file, kind) in (0u8..).zip(BACK_RANK) {
                pieces.push(Piece::new(kind, color, Square::at(file, color.home_rank())));
                pieces.push(Piece::new(PieceKind::Pawn, color, Square::at(file, color.pawn_rank())));
            }
        }
        pieces
    }
}

impl PositionFactory for InitialPosition {
    fn pieces(&self) -> Result<Vec<Piece>> {
        Ok(self.standard_pieces())
    }
}

/// A parsed FEN record. Only the placement field is mandatory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenPosition {
    pieces: Vec<Piece>,
    side_to_move: Color,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    move_number: u32,
}

impl FenPosition {
    pub fn parse(fen: &str) -> Result<Self> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or_else(|| invalid(fen, "empty record"))?;
        let mut pieces = parse_placement(fen, placement)?;

        let side_to_move = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(invalid(fen, &format!("bad active color '{other}'"))),
        };

        if let Some(castling) = fields.next() {
            apply_castling_rights(fen, castling, &mut pieces)?;
        }

        let en_passant = match fields.next() {
            None | Some("-") => None,
            Some(sq) => {
                let target = sq.parse::<Square>().map_err(|_| invalid(fen, &format!("bad en passant square '{sq}'")))?;
                check_en_passant(fen, target, side_to_move, &pieces)?;
                Some(target)
            }
        };

        let halfmove_clock = parse_counter(fen, fields.next(), 0)?;
        let move_number = parse_counter(fen, fields.next(), 1)?.max(1);
        if fields.next().is_some() {
            return Err(invalid(fen, "trailing fields"));
        }

        Ok(Self { pieces, side_to_move, en_passant, halfmove_clock, move_number })
    }
}

/// The target must sit behind a pawn of the side not to move that has just
/// double stepped.
fn check_en_passant(fen: &str, target: Square, side_to_move: Color, pieces: &[Piece]) -> Result<()> {
    let mover = !side_to_move;
    let (target_rank, pawn_rank) = match mover {
        Color::White => (2, 3),
        Color::Black => (5, 4),
    };
    let pawn_in_front = pieces.iter().any(|p| {
        p.kind == PieceKind::Pawn && p.color == mover && p.square.file() == target.file() && p.square.rank() == pawn_rank
    });
    if target.rank() != target_rank || !pawn_in_front {
        return Err(invalid(fen, &format!("impossible en passant square '{target}'")));
    }
    Ok(())
}

impl FromStr for FenPosition {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PositionFactory for FenPosition {
    fn pieces(&self) -> Result<Vec<Piece>> {
        Ok(self.pieces.clone())
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn move_number(&self) -> u32 {
        self.move_number
    }

    fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
}

fn invalid(fen: &str, reason: &str) -> ChessError {
    ChessError::InvalidFen(format!("{reason} in '{fen}'"))
}

fn parse_placement(fen: &str, placement: &str) -> Result<Vec<Piece>> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(fen, &format!("expected 8 ranks, found {}", ranks.len())));
    }
    let mut pieces = Vec::with_capacity(32);
    // FEN lists rank 8 first
    for (text, rank) in ranks.iter().zip((0..8u8).rev()) {
        let mut file = 0u8;
        for c in text.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(invalid(fen, &format!("bad empty run '{c}'")));
                }
                file += run as u8;
            } else {
                let (kind, color) = PieceKind::from_char(c).map_err(|_| invalid(fen, &format!("bad piece '{c}'")))?;
                if file > 7 {
                    return Err(invalid(fen, &format!("rank {} overflows", rank + 1)));
                }
                pieces.push(Piece::new(kind, color, Square::at(file, rank)));
                file += 1;
            }
            if file > 8 {
                return Err(invalid(fen, &format!("rank {} overflows", rank + 1)));
            }
        }
        if file != 8 {
            return Err(invalid(fen, &format!("rank {} has {file} files", rank + 1)));
        }
    }
    Ok(pieces)
}

/// Marks kings and rooks that lost their castling rights as having moved.
fn apply_castling_rights(fen: &str, field: &str, pieces: &mut [Piece]) -> Result<()> {
    let mut rights = [[false; 2]; 2]; // [color][kingside, queenside]
    if field != "-" {
        for c in field.chars() {
            match c {
                'K' => rights[0][0] = true,
                'Q' => rights[0][1] = true,
                'k' => rights[1][0] = true,
                'q' => rights[1][1] = true,
                _ => return Err(invalid(fen, &format!("bad castling right '{c}'"))),
            }
        }
    }
    for piece in pieces.iter_mut() {
        let [kingside, queenside] = rights[piece.color as usize];
        let home = piece.square.rank() == piece.color.home_rank();
        let lost = match piece.kind {
            PieceKind::King => !kingside && !queenside,
            PieceKind::Rook if home && piece.square.file() == 7 => !kingside,
            PieceKind::Rook if home && piece.square.file() == 0 => !queenside,
            _ => false,
        };
        if lost {
            piece.moves = 1;
        }
    }
    Ok(())
}

fn parse_counter(fen: &str, field: Option<&str>, default: u32) -> Result<u32> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| invalid(fen, &format!("bad counter '{text}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_has_32_pieces() {
        let pieces = InitialPosition.pieces().unwrap();
        assert_eq!(pieces.len(), 32);
        let kings: Vec<_> = pieces.iter().filter(|p| p.kind == PieceKind::King).map(|p| p.square.to_string()).collect();
        assert_eq!(kings, vec!["e1", "e8"]);
    }

    #[test]
    fn placement_only_defaults() {
        let fen = FenPosition::parse("8/8/r4PK1/8/1k6/8/8/8").unwrap();
        assert_eq!(fen.side_to_move(), Color::White);
        assert_eq!(fen.move_number(), 1);
        assert_eq!(fen.pieces().unwrap().len(), 4);
    }

    #[test]
    fn castling_field_marks_moved_pieces() {
        let fen: FenPosition = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1".parse().unwrap();
        let moved: Vec<String> =
            fen.pieces().unwrap().iter().filter(|p| p.has_moved()).map(|p| p.to_string()).collect();
        // black keeps the queenside right only, white the kingside one
        assert_eq!(moved, vec!["rh8", "Ra1"]);
    }

    #[test]
    fn rejects_malformed_records() {
        for bad in [
            "",
            "8/8/8/8/8/8/8",
            "9/8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/7",
            "8/8/8/8/8/8/8/ppppppppp",
            "8/8/8/8/8/8/8/7x",
            "8/8/8/8/8/8/8/8 x",
            "8/8/8/8/8/8/8/8 w KX",
            "8/8/8/8/8/8/8/8 w - z9",
            "4k3/8/8/8/8/3Pp3/8/4K3 w - e4 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1",
            "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1",
            "8/8/8/8/8/8/8/8 w - - a 1",
        ] {
            assert!(matches!(FenPosition::parse(bad), Err(ChessError::InvalidFen(_))), "{bad:?} should be rejected");
        }
    }
}
