//! Mailbox board: 64 squares of optional pieces, an undo stack of
//! [`Movement`] records and an incrementally maintained material balance.
//!
//! All mutation after setup goes through [`Board::make_move`] /
//! [`Board::rollback`]. Legality is decided by trying a pseudo-move, testing
//! the mover's king, and rolling back; [`Trial`] guarantees the rollback.

pub mod direction;
pub mod export;
pub mod movegen;
pub mod movement;
pub mod piece;
pub mod positions;
pub mod square;

use std::fmt;
use std::ops::{Deref, DerefMut};

use log::trace;

pub use direction::{Direction, Ray};
pub use export::{Exporter, FenExporter, PlainExporter, UnicodeExporter};
pub use movement::{CastlingRook, MoveRequest, Movement};
pub use piece::{Piece, PieceKind};
pub use positions::{EmptyPosition, FenPosition, InitialPosition, PositionFactory};
pub use square::{Color, Square};

use crate::error::{ChessError, Result};
use movement::Undo;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    balance: i32,
    history: Vec<Movement>,
    side_to_move: Color,
    move_number: u32,
    halfmove_clock: u32,
    /// En-passant target handed over by a FEN; only consulted while history is empty.
    initial_en_passant: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            balance: 0,
            history: Vec::with_capacity(128),
            side_to_move: Color::White,
            move_number: 1,
            halfmove_clock: 0,
            initial_en_passant: None,
        }
    }

    /// Standard starting position.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        board.populate(&InitialPosition);
        board
    }

    pub fn new(factory: &dyn PositionFactory) -> Result<Self> {
        let mut board = Self::empty();
        board.init(factory)?;
        Ok(board)
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        Self::new(&FenPosition::parse(fen)?)
    }

    /// Clears the board and repopulates it from `factory`.
    pub fn init(&mut self, factory: &dyn PositionFactory) -> Result<()> {
        let pieces = factory.pieces()?;
        self.clear();
        for piece in pieces {
            self.put(piece);
        }
        self.side_to_move = factory.side_to_move();
        self.move_number = factory.move_number().max(1);
        self.halfmove_clock = factory.halfmove_clock();
        self.initial_en_passant = factory.en_passant();
        Ok(())
    }

    fn populate(&mut self, factory: &InitialPosition) {
        for piece in factory.standard_pieces() {
            self.put(piece);
        }
    }

    /// Empties every square and forgets the history.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Places a piece during setup, replacing whatever stood on its square.
    pub fn put(&mut self, piece: Piece) -> Option<Piece> {
        let replaced = self.remove(piece.square);
        self.squares[piece.square.index()] = Some(piece);
        self.balance += piece.price();
        replaced
    }

    /// Takes a piece off the board during setup.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let removed = self.squares[square.index()].take();
        if let Some(p) = removed {
            self.balance -= p.price();
        }
        removed
    }

    pub fn figure_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.index()].as_ref()
    }

    /// All pieces in square order, a1 first.
    pub fn figures(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().flatten()
    }

    pub fn figures_of(&self, kind: Option<PieceKind>, color: Option<Color>) -> impl Iterator<Item = &Piece> + '_ {
        self.figures()
            .filter(move |p| kind.map_or(true, |k| p.kind == k) && color.map_or(true, |c| p.color == c))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.figures_of(Some(PieceKind::King), Some(color)).next().map(|k| k.square)
    }

    pub fn require_king(&self, color: Color) -> Result<Square> {
        self.king_square(color).ok_or(ChessError::NoKing(color))
    }

    /// Signed sum of piece prices on the board, positive favouring White.
    pub fn balance(&self) -> i32 {
        self.balance
    }

    pub fn history(&self) -> &[Movement] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&Movement> {
        self.history.last()
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Check flag of the last move played; false before any move.
    pub fn is_check(&self) -> bool {
        self.history.last().map_or(false, |m| m.is_check)
    }

    /// Square a pawn may capture onto en passant, if the last move was a double step.
    pub fn en_passant_target(&self) -> Option<Square> {
        let Some(last) = self.history.last() else {
            return self.initial_en_passant;
        };
        if last.piece.kind != PieceKind::Pawn || last.from.rank().abs_diff(last.to.rank()) != 2 {
            return None;
        }
        Some(Square::at(last.from.file(), (last.from.rank() + last.to.rank()) / 2))
    }

    /// Applies a movement produced by the move generator.
    ///
    /// The movement is trusted: use [`Board::try_move`] for input that did not
    /// come from [`Board::legal_moves`].
    pub fn make_move(&mut self, mut m: Movement) {
        m.undo = Undo {
            halfmove_clock: self.halfmove_clock,
            move_number: self.move_number,
            side_to_move: self.side_to_move,
        };

        if let Some(taken) = m.taken {
            self.squares[taken.square.index()] = None;
        }
        self.squares[m.from.index()] = None;
        let mut moved = m.piece;
        moved.square = m.to;
        moved.moves += 1;
        moved.kind = m.resulting_kind();
        self.squares[m.to.index()] = Some(moved);

        if let Some(castle) = m.rook {
            self.squares[castle.rook.square.index()] = None;
            let mut rook = castle.rook;
            rook.square = castle.to;
            rook.moves += 1;
            self.squares[castle.to.index()] = Some(rook);
        }

        self.balance += m.balance_delta();
        self.halfmove_clock =
            if m.piece.kind == PieceKind::Pawn || m.is_capture() { 0 } else { self.halfmove_clock + 1 };
        if m.piece.color == Color::Black {
            self.move_number += 1;
        }
        self.side_to_move = !m.piece.color;

        m.is_check = self.test_for_check(!m.piece.color);
        self.history.push(m);
    }

    /// Undoes the last move. A no-op returning `None` when there is nothing to undo.
    pub fn rollback(&mut self) -> Option<Movement> {
        let m = self.history.pop()?;

        self.squares[m.to.index()] = None;
        if let Some(castle) = m.rook {
            self.squares[castle.to.index()] = None;
            self.squares[castle.rook.square.index()] = Some(castle.rook);
        }
        self.squares[m.from.index()] = Some(m.piece);
        if let Some(taken) = m.taken {
            self.squares[taken.square.index()] = Some(taken);
        }

        self.balance -= m.balance_delta();
        self.halfmove_clock = m.undo.halfmove_clock;
        self.move_number = m.undo.move_number;
        self.side_to_move = m.undo.side_to_move;
        Some(m)
    }

    /// Applies `m` and returns a guard that rolls it back when dropped.
    pub fn trial(&mut self, m: Movement) -> Trial<'_> {
        self.make_move(m);
        Trial { board: self }
    }

    /// Validates a user-supplied move against the legal moves of the side to
    /// move and applies it. The board is left untouched on error.
    pub fn try_move(&mut self, request: MoveRequest) -> Result<Movement> {
        let color = self.side_to_move;
        let chosen = self
            .legal_moves(color, Some(request.from))
            .into_iter()
            .find(|m| m.matches(&request))
            .ok_or_else(|| ChessError::IllegalMove { from: request.from.to_string(), to: request.to.to_string() })?;
        self.make_move(chosen);
        Ok(chosen)
    }

    /// Pseudo-moves of the piece on `square`, empty when the square is.
    pub fn figure_moves(&self, square: Square) -> Vec<Movement> {
        let mut out = Vec::new();
        if let Some(piece) = self.figure_at(square) {
            movegen::pseudo_moves(self, piece, &mut out);
        }
        out
    }

    /// Pseudo-moves of every piece of `color`, or of both sides for `None`.
    pub fn all_moves(&self, color: Option<Color>) -> Vec<Movement> {
        let mut out = Vec::with_capacity(64);
        for piece in self.figures_of(None, color) {
            movegen::pseudo_moves(self, piece, &mut out);
        }
        out
    }

    /// Attacked squares of every piece of `color` (or both), duplicates included.
    pub fn all_attacks(&self, color: Option<Color>) -> Vec<Square> {
        let mut out = Vec::with_capacity(64);
        for piece in self.figures_of(None, color) {
            movegen::attacks(self, piece, &mut out);
        }
        out
    }

    /// Whether any piece of the opponent of `color` attacks `square`.
    pub fn is_attacked(&self, color: Color, square: Square) -> bool {
        self.figures_of(None, Some(!color)).any(|p| movegen::attacks_square(self, p, square))
    }

    /// Whether the king of `color` is attacked. False when there is no such king.
    pub fn test_for_check(&self, color: Color) -> bool {
        self.king_square(color).map_or(false, |k| self.is_attacked(color, k))
    }

    /// Moves of `color` that do not leave its own king in check, optionally
    /// restricted to the piece on `filter`. Each returned movement has its
    /// `is_check` flag set.
    pub fn legal_moves(&mut self, color: Color, filter: Option<Square>) -> Vec<Movement> {
        let candidates = match filter {
            Some(square) => {
                if self.figure_at(square).map_or(true, |p| p.color != color) {
                    return Vec::new();
                }
                self.figure_moves(square)
            }
            None => self.all_moves(Some(color)),
        };
        let legal: Vec<Movement> = candidates
            .into_iter()
            .filter_map(|m| {
                let trial = self.trial(m);
                if trial.test_for_check(color) {
                    return None;
                }
                // the applied copy carries the check flag
                trial.last_move().copied()
            })
            .collect();
        trace!("{} legal moves for {}", legal.len(), color);
        legal
    }

    /// Cheaper than `legal_moves(..).is_empty()`: stops at the first legal move.
    pub fn has_legal_moves(&mut self, color: Color) -> bool {
        self.all_moves(Some(color)).into_iter().any(|m| {
            let trial = self.trial(m);
            !trial.test_for_check(color)
        })
    }

    pub fn test_for_mate(&mut self, color: Color) -> bool {
        self.test_for_check(color) && !self.has_legal_moves(color)
    }

    pub fn test_for_stalemate(&mut self, color: Color) -> bool {
        !self.test_for_check(color) && !self.has_legal_moves(color)
    }

    pub fn export<E: Exporter>(&self) -> String {
        E::export(self)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PlainExporter::export(self))
    }
}

/// A move applied for inspection; rolled back when the guard is dropped,
/// including during unwinding.
pub struct Trial<'a> {
    board: &'a mut Board,
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Trial<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.board.rollback();
    }
}
