//! Tic-tac-toe reinforcement-learning testbed
//!
//! This crate provides:
//! - A tic-tac-toe board state machine with state-key encoding
//! - Random and depth-limited minimax baselines
//! - Tabular Q-learning, SARSA and first-visit Monte Carlo agents
//! - A self-play training harness with checkpoint evaluation
//! - Policy persistence (JSON and MessagePack) and a small CLI

pub mod adapters;
pub mod app;
pub mod baselines;
pub mod cli;
pub mod error;
pub mod monte_carlo;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use types::StateKey;
