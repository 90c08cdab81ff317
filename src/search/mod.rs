pub mod alphabeta;
pub mod eval;
pub mod noise;

pub use alphabeta::{SearchParams, SearchResult, Searcher};
pub use eval::{estimate, DRAW_SCORE, INF, MATE_SCORE};
