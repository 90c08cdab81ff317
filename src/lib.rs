pub mod board;
pub mod error;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::{Board, Color, Movement, Piece, PieceKind, Square};
pub use error::{ChessError, Result};
