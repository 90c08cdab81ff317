use std::fmt;

use serde::{Deserialize, Serialize};

use super::square::{Color, Square};
use crate::error::{ChessError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Unicode glyphs indexed by `[color][kind]`.
const GLYPHS: [[char; 6]; 2] = [
    ['♙', '♘', '♗', '♖', '♕', '♔'],
    ['♟', '♞', '♝', '♜', '♛', '♚'],
];

impl PieceKind {
    pub const ALL: [PieceKind; 6] =
        [PieceKind::Pawn, PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen, PieceKind::King];

    /// Promotion choices, in the order the move generator emits them.
    pub const PROMOTIONS: [PieceKind; 4] = [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];

    /// Material price in pawns. The king is priceless and kept out of the balance.
    pub const fn price(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Letter cased by color: uppercase for White.
    pub fn to_char(self, color: Color) -> char {
        match color {
            Color::White => self.letter().to_ascii_uppercase(),
            Color::Black => self.letter(),
        }
    }

    pub const fn glyph(self, color: Color) -> char {
        GLYPHS[color as usize][self as usize]
    }

    /// Parses a FEN letter; case selects the color.
    pub fn from_char(c: char) -> Result<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(ChessError::InvalidPiece(c)),
        };
        Ok((kind, color))
    }
}

/// A piece standing on the board.
///
/// `moves` counts how often the piece has moved; zero stands in for every
/// "initial position" question (pawn double step, castling eligibility).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub moves: u32,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self { kind, color, square, moves: 0 }
    }

    pub fn white(kind: PieceKind, square: &str) -> Result<Self> {
        Ok(Self::new(kind, Color::White, square.parse()?))
    }

    pub fn black(kind: PieceKind, square: &str) -> Result<Self> {
        Ok(Self::new(kind, Color::Black, square.parse()?))
    }

    /// Price signed by color, positive for White.
    pub const fn price(&self) -> i32 {
        self.kind.price() * self.color.sign()
    }

    pub fn char(&self) -> char {
        self.kind.to_char(self.color)
    }

    pub const fn glyph(&self) -> char {
        self.kind.glyph(self.color)
    }

    pub const fn has_moved(&self) -> bool {
        self.moves > 0
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.char(), self.square)
    }
}
