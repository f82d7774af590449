//! Q-learning and SARSA agents
//!
//! Both agents learn online from one [`Transition`] per half-move and share
//! the ε-greedy [`TabularPolicy`]; they differ only in the bootstrap target.

use crate::{
    Error, Result,
    app::AgentConfig,
    ports::{Agent, LearningAgent, Transition},
    q_learning::{
        exploration::Exploration,
        q_table::{QTable, check_action},
        serialization::{Algorithm, PolicySnapshot},
    },
    tictactoe::{Board, Player},
    types::StateKey,
};

/// Q-table plus the exploration schedule that acts on it.
#[derive(Debug, Clone)]
pub struct TabularPolicy {
    q_table: QTable,
    exploration: Exploration,
    config: AgentConfig,
}

impl TabularPolicy {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            q_table: QTable::new(),
            exploration: Exploration::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn q_table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub fn replace_q_table(&mut self, q_table: QTable) {
        self.q_table = q_table;
    }

    pub fn exploration(&self) -> &Exploration {
        &self.exploration
    }

    pub fn exploration_mut(&mut self) -> &mut Exploration {
        &mut self.exploration
    }

    /// ε-greedy action for `state`, `None` when `legal_moves` is empty
    pub fn sample(&mut self, state: &StateKey, legal_moves: &[usize]) -> Option<usize> {
        let q_table = &self.q_table;
        self.exploration
            .select(legal_moves, |moves| q_table.greedy_action(state, moves))
    }

    /// Move selection on a live board
    pub fn select(&mut self, board: &Board) -> Result<usize> {
        let state = board.encode();
        self.sample(&state, &board.legal_moves())
            .ok_or(Error::NoValidMoves)
    }

    pub fn decay_epsilon(&mut self) {
        self.exploration.decay();
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)], with the max taken
/// over the legal moves of s' and zero on terminal transitions. ε decays
/// after every update.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    name: String,
    player: Player,
    policy: TabularPolicy,
}

impl QLearningAgent {
    pub fn new(player: Player) -> Self {
        Self::with_config(player, AgentConfig::default())
    }

    pub fn with_config(player: Player, config: AgentConfig) -> Self {
        Self {
            name: Algorithm::QLearning.display_name().to_string(),
            player,
            policy: TabularPolicy::new(config),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn policy(&self) -> &TabularPolicy {
        &self.policy
    }

    /// r + γ max_a' Q(s',a')
    fn td_target(&self, transition: &Transition) -> f64 {
        let bootstrap = match &transition.next_state {
            Some(next) => {
                let legal = Board::decode(next).legal_moves();
                self.policy.q_table().max_q(next, &legal)
            }
            None => 0.0,
        };
        transition.reward + self.policy.config().discount * bootstrap
    }
}

impl Agent for QLearningAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn player(&self) -> Player {
        self.player
    }

    fn select_move(&mut self, board: &Board, _player: Player) -> Result<usize> {
        self.policy.select(board)
    }

    fn learn(&mut self, transition: &Transition) -> Result<()> {
        check_action(transition.action)?;
        let target = self.td_target(transition);
        let alpha = self.policy.config().alpha;
        self.policy
            .q_table_mut()
            .update_toward(&transition.state, transition.action, target, alpha)?;
        self.policy.decay_epsilon();
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.policy.exploration_mut().reseed(seed);
    }

    fn as_learning(&self) -> Option<&dyn LearningAgent> {
        Some(self)
    }

    fn as_learning_mut(&mut self) -> Option<&mut dyn LearningAgent> {
        Some(self)
    }
}

impl LearningAgent for QLearningAgent {
    fn algorithm(&self) -> Algorithm {
        Algorithm::QLearning
    }

    fn q_table(&self) -> &QTable {
        self.policy.q_table()
    }

    fn epsilon(&self) -> f64 {
        self.policy.exploration().epsilon()
    }

    fn is_evaluating(&self) -> bool {
        self.policy.exploration().is_evaluating()
    }

    fn set_evaluating(&mut self, evaluating: bool) {
        self.policy.exploration_mut().set_evaluating(evaluating);
    }

    fn snapshot(&self) -> PolicySnapshot {
        PolicySnapshot::from_q_table(self.policy.q_table())
    }

    fn restore(&mut self, snapshot: PolicySnapshot) -> Result<()> {
        self.policy.replace_q_table(QTable::from_map(snapshot.qtable));
        Ok(())
    }
}

/// SARSA agent (on-policy TD control)
///
/// Keeps the previous (state, action) pair. Each call samples the action the
/// ε-greedy policy would take in the new state and moves the previous pair
/// toward r + γ Q(s', a'), so exploration noise is part of the target. The
/// terminal call also settles the final pair against the terminal reward
/// and clears the lag. This departs from a pure one-step lag, where the final
/// pair would wait as "previous" for a call that never comes.
#[derive(Debug, Clone)]
pub struct SarsaAgent {
    name: String,
    player: Player,
    policy: TabularPolicy,
    previous: Option<(StateKey, usize)>,
}

impl SarsaAgent {
    pub fn new(player: Player) -> Self {
        Self::with_config(player, AgentConfig::default())
    }

    pub fn with_config(player: Player, config: AgentConfig) -> Self {
        Self {
            name: Algorithm::Sarsa.display_name().to_string(),
            player,
            policy: TabularPolicy::new(config),
            previous: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn policy(&self) -> &TabularPolicy {
        &self.policy
    }

    /// Pair waiting for its successor action
    pub fn pending(&self) -> Option<&(StateKey, usize)> {
        self.previous.as_ref()
    }

    /// Q(s', a') for the action the policy samples in `next`
    fn on_policy_value(&mut self, next: Option<&StateKey>) -> f64 {
        let Some(next) = next else {
            return 0.0;
        };
        let legal = Board::decode(next).legal_moves();
        match self.policy.sample(next, &legal) {
            Some(action) => self.policy.q_table().get(next, action),
            None => 0.0,
        }
    }
}

impl Agent for SarsaAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn player(&self) -> Player {
        self.player
    }

    fn select_move(&mut self, board: &Board, _player: Player) -> Result<usize> {
        self.policy.select(board)
    }

    fn learn(&mut self, transition: &Transition) -> Result<()> {
        check_action(transition.action)?;
        let alpha = self.policy.config().alpha;
        let discount = self.policy.config().discount;

        if let Some((prev_state, prev_action)) = self.previous.take() {
            let next_value = self.on_policy_value(transition.next_state.as_ref());
            let target = transition.reward + discount * next_value;
            self.policy
                .q_table_mut()
                .update_toward(&prev_state, prev_action, target, alpha)?;
        }

        if transition.is_terminal() {
            self.policy.q_table_mut().update_toward(
                &transition.state,
                transition.action,
                transition.reward,
                alpha,
            )?;
        } else {
            self.previous = Some((transition.state.clone(), transition.action));
        }

        self.policy.decay_epsilon();
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.policy.exploration_mut().reseed(seed);
    }

    fn as_learning(&self) -> Option<&dyn LearningAgent> {
        Some(self)
    }

    fn as_learning_mut(&mut self) -> Option<&mut dyn LearningAgent> {
        Some(self)
    }
}

impl LearningAgent for SarsaAgent {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sarsa
    }

    fn q_table(&self) -> &QTable {
        self.policy.q_table()
    }

    fn epsilon(&self) -> f64 {
        self.policy.exploration().epsilon()
    }

    fn is_evaluating(&self) -> bool {
        self.policy.exploration().is_evaluating()
    }

    fn set_evaluating(&mut self, evaluating: bool) {
        self.policy.exploration_mut().set_evaluating(evaluating);
    }

    fn snapshot(&self) -> PolicySnapshot {
        PolicySnapshot::from_q_table(self.policy.q_table())
    }

    fn restore(&mut self, snapshot: PolicySnapshot) -> Result<()> {
        self.policy.replace_q_table(QTable::from_map(snapshot.qtable));
        self.previous = None;
        Ok(())
    }
}
