use std::fmt;
use std::str::FromStr;

use super::piece::{Piece, PieceKind};
use super::square::{Color, Square};
use crate::error::{ChessError, Result};

/// Rook displacement attached to a castling move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CastlingRook {
    pub rook: Piece,
    pub to: Square,
}

/// One ply, with everything needed to undo it exactly.
///
/// `piece`, `taken` and `rook` are snapshots taken before the move. A captured
/// piece lives here while it is off the board and is put back on rollback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Movement {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub taken: Option<Piece>,
    pub promotion: Option<PieceKind>,
    pub rook: Option<CastlingRook>,
    pub en_passant: bool,
    pub is_check: bool,
    pub(crate) undo: Undo,
}

/// Board counters as they were before the move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Undo {
    pub halfmove_clock: u32,
    pub move_number: u32,
    pub side_to_move: Color,
}

impl Movement {
    pub fn new(piece: Piece, to: Square, taken: Option<Piece>) -> Self {
        Self {
            piece,
            from: piece.square,
            to,
            taken,
            promotion: None,
            rook: None,
            en_passant: false,
            is_check: false,
            undo: Undo::default(),
        }
    }

    pub fn is_capture(&self) -> bool {
        self.taken.is_some()
    }

    pub fn is_castling(&self) -> bool {
        self.rook.is_some()
    }

    /// Kind of the piece standing on `to` once the move is made.
    pub fn resulting_kind(&self) -> PieceKind {
        self.promotion.unwrap_or(self.piece.kind)
    }

    /// Change in material balance caused by this move, signed for White.
    pub fn balance_delta(&self) -> i32 {
        let captured = self.taken.map_or(0, |t| -t.price());
        let promoted = self
            .promotion
            .map_or(0, |kind| (kind.price() - self.piece.kind.price()) * self.piece.color.sign());
        captured + promoted
    }

    pub fn matches(&self, request: &MoveRequest) -> bool {
        self.from == request.from && self.to == request.to && self.promotion == request.promotion
    }

    /// Coordinate form, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(&self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.letter()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_castling() {
            f.write_str(if self.to.file() < self.from.file() { "0-0-0" } else { "0-0" })?;
        } else {
            if self.piece.kind != PieceKind::Pawn {
                write!(f, "{}", self.piece.char())?;
            }
            let sep = if self.is_capture() { 'x' } else { '-' };
            write!(f, "{}{}{}", self.from, sep, self.to)?;
            if let Some(kind) = self.promotion {
                write!(f, "={}", kind.to_char(self.piece.color))?;
            }
        }
        if self.is_check {
            f.write_str("+")?;
        }
        Ok(())
    }
}

/// A move as typed by a user or sent over an API: squares only.
///
/// Accepts `e2e4`, `e2-e4`, `e4xd5`, `Ng1-f3`, `e7e8q` and `e7-e8=Q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to, promotion: None }
    }
}

impl FromStr for MoveRequest {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ChessError::InvalidMove(s.to_string());
        if !s.is_ascii() {
            return Err(invalid());
        }
        let mut text: String = s.trim().chars().filter(|c| !matches!(c, '-' | 'x' | '=' | '+' | '#')).collect();
        // optional leading piece letter (Ng1f3)
        if text.len() == 5 && text.starts_with(|c: char| "NBRQKP".contains(c)) {
            text.remove(0);
        }
        if text.len() != 4 && text.len() != 5 {
            return Err(invalid());
        }
        let from: Square = text[0..2].parse().map_err(|_| invalid())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid())?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => {
                let (kind, _) = PieceKind::from_char(c).map_err(|_| invalid())?;
                if !PieceKind::PROMOTIONS.contains(&kind) {
                    return Err(invalid());
                }
                Some(kind)
            }
        };
        Ok(Self { from, to, promotion })
    }
}
