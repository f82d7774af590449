//! First-visit Monte Carlo control
//!
//! Unlike the TD learners this agent never bootstraps: Q-values are the mean
//! of complete discounted returns observed from each (state, action) pair.

pub mod agent;
pub mod returns;

pub use agent::{EpisodeStep, MonteCarloAgent};
pub use returns::ReturnsTable;
