// Azul engine: rules, magic-bitboard scoring and MCTS
pub mod game;
pub mod encoder;
pub mod eval;
pub mod search;
pub mod config;
pub mod rng;
pub mod selfplay;
pub mod perft;

// Re-exports for the common entry points
pub use game::moves::Move;
pub use game::state::{GameResult, State};
pub use game::Tile;
pub use search::mcts::{Mcts, SearchResult};
