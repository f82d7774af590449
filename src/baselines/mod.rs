//! Non-learning opponents used as training partners and benchmarks.

pub mod minimax;
pub mod random;

pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
