//! Agent port - the capability set every strategy implements
//!
//! This port defines the interface shared by all strategies:
//! - Baselines that never learn (random, minimax)
//! - Tabular learners (Q-learning, SARSA, Monte Carlo control)
//!
//! Learners additionally expose [`LearningAgent`] through
//! [`Agent::as_learning`], which is how callers decide what to persist or
//! switch into evaluating mode without inspecting concrete types.

use crate::{
    Result,
    q_learning::{Algorithm, PolicySnapshot, QTable},
    tictactoe::{Board, Player},
    types::StateKey,
};

/// One half-move as seen by the mover.
///
/// `next_state` is `None` on the terminal half-move; that is the episode-end
/// signal for every learner and means no future value is bootstrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: StateKey,
    pub action: usize,
    pub reward: f64,
    pub next_state: Option<StateKey>,
}

impl Transition {
    /// Non-terminal transition
    pub fn step(state: StateKey, action: usize, reward: f64, next_state: StateKey) -> Self {
        Self {
            state,
            action,
            reward,
            next_state: Some(next_state),
        }
    }

    /// Terminal transition (episode end)
    pub fn terminal(state: StateKey, action: usize, reward: f64) -> Self {
        Self {
            state,
            action,
            reward,
            next_state: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next_state.is_none()
    }
}

/// Agent trait - unified interface for every strategy
///
/// # Contract
///
/// Move selection returns a legal position whenever one exists and
/// [`crate::Error::NoValidMoves`] otherwise. Learning tolerates terminal
/// transitions at any point.
///
/// # Examples
///
/// ```
/// use tictactoe_rl::{
///     baselines::RandomAgent,
///     ports::Agent,
///     tictactoe::{Board, Player},
/// };
///
/// let mut agent = RandomAgent::new(Player::One);
/// let board = Board::new();
/// let position = agent.select_move(&board, Player::Two)?;
/// assert!(board.is_empty(position));
/// # Ok::<(), tictactoe_rl::Error>(())
/// ```
pub trait Agent: Send {
    /// Display name used in logs and reports.
    fn name(&self) -> &str;

    /// The player this agent was configured to play.
    fn player(&self) -> Player;

    /// Select a move for `player` on `board`.
    ///
    /// Used by the training harness, which may seat the same agent as either
    /// player.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] on a full board.
    fn select_move(&mut self, board: &Board, player: Player) -> Result<usize>;

    /// Select a move for the agent's own configured player.
    ///
    /// Used by interactive play.
    fn choose_action(&mut self, board: &Board) -> Result<usize> {
        let player = self.player();
        self.select_move(board, player)
    }

    /// Learning update for one half-move.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for non-adaptive agents.
    fn learn(&mut self, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    /// Key under which `board` is stored in a Q-table.
    ///
    /// Every strategy shares this encoding so tables are interchangeable.
    fn state_key(&self, board: &Board) -> StateKey {
        board.encode()
    }

    /// Reseed the agent's private random source.
    fn set_rng_seed(&mut self, _seed: u64) {}

    /// Learning capability, if this agent has one.
    fn as_learning(&self) -> Option<&dyn LearningAgent> {
        None
    }

    /// Mutable learning capability, if this agent has one.
    fn as_learning_mut(&mut self) -> Option<&mut dyn LearningAgent> {
        None
    }
}

/// Capability of agents that own a Q-table.
pub trait LearningAgent {
    fn algorithm(&self) -> Algorithm;

    fn q_table(&self) -> &QTable;

    /// Current exploration rate
    fn epsilon(&self) -> f64;

    fn is_evaluating(&self) -> bool;

    /// Evaluating mode disables exploration; selection is always greedy.
    fn set_evaluating(&mut self, evaluating: bool);

    /// Export the persisted part of the policy.
    fn snapshot(&self) -> PolicySnapshot;

    /// Replace the persisted part of the policy.
    fn restore(&mut self, snapshot: PolicySnapshot) -> Result<()>;
}
