//! Q-learning and SARSA temporal difference learning
//!
//! TD methods bootstrap value estimates from successor states, so both
//! agents update after every half-move instead of waiting for the game to
//! end.
//!
//! ## Key Differences
//!
//! | Aspect | Q-learning | SARSA |
//! |--------|------------|-------|
//! | Policy | Off-policy (learns Q*) | On-policy (learns Q^π) |
//! | Update | Uses max_a Q(s',a') | Uses sampled Q(s',a') |
//! | Exploration | Not in the target | Leaks into the target |
//!
//! The Q-table, exploration schedule and persisted [`PolicySnapshot`] are
//! shared with the Monte Carlo learner.
//!
//! ## Usage Example
//!
//! ```
//! use tictactoe_rl::{
//!     app::AgentConfig,
//!     ports::{Agent, LearningAgent, Transition},
//!     q_learning::QLearningAgent,
//!     tictactoe::Player,
//!     types::StateKey,
//! };
//!
//! let mut agent = QLearningAgent::with_config(Player::One, AgentConfig::default().with_seed(7));
//! let state = StateKey::parse("110220000")?;
//! agent.learn(&Transition::terminal(state.clone(), 2, 1.0))?;
//! assert!((agent.q_table().get(&state, 2) - 0.1).abs() < 1e-12);
//! # Ok::<(), tictactoe_rl::Error>(())
//! ```

pub mod agent;
pub mod exploration;
pub mod q_table;
pub mod serialization;

pub use agent::{QLearningAgent, SarsaAgent, TabularPolicy};
pub use exploration::Exploration;
pub use q_table::{ActionValues, QTable};
pub use serialization::{Algorithm, PolicySnapshot, ReturnsMap};
