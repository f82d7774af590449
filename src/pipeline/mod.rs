//! Training and evaluation pipeline
//!
//! This module provides:
//! - The game harness that feeds half-moves to learners
//! - Self-play training with periodic benchmark checkpoints
//! - Reward-scheme comparison
//! - Observers for progress reporting

pub mod comparison;
pub mod observers;
pub mod training;

pub use comparison::{ComparisonConfig, ComparisonFramework, PRESET_SCHEMES, SchemeComparison};
pub use observers::{MetricsObserver, ProgressObserver};
pub use training::{
    AgentOutcome, Checkpoint, FrozenAgent, Harness, MatchResult, Matchup, RewardScheme, Seat,
    TrainingConfig, TrainingPipeline, TrainingReport, evaluate,
};
