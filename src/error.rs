use crate::board::Color;

/// Domain errors for the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("invalid FEN string: {0}")]
    InvalidFen(String),

    #[error("unknown piece letter: {0:?}")]
    InvalidPiece(char),

    #[error("invalid move notation: {0}")]
    InvalidMove(String),

    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: String, to: String },

    #[error("no {0} king on the board")]
    NoKing(Color),
}

pub type Result<T> = std::result::Result<T, ChessError>;
