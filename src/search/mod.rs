pub mod hash;
pub mod mcts;
pub mod noise;
