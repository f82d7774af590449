//! First-visit Monte Carlo control agent

use std::collections::HashSet;

use crate::{
    Result,
    app::AgentConfig,
    monte_carlo::returns::ReturnsTable,
    ports::{Agent, LearningAgent, Transition},
    q_learning::{Algorithm, PolicySnapshot, QTable, TabularPolicy, q_table::check_action},
    tictactoe::{Board, Player},
    types::StateKey,
};

/// One of the agent's own moves within the current episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeStep {
    pub state: StateKey,
    pub action: usize,
    pub reward: f64,
}

/// Monte Carlo control with first-visit return averaging.
///
/// Transitions are buffered until the terminal one arrives. Returns are then
/// accumulated backward (G ← γG + r) and each (state, action) pair is
/// credited once, at its earliest occurrence in the episode. The Q-value
/// becomes the mean of every return ever credited to the pair. ε decays once
/// per completed episode.
#[derive(Debug, Clone)]
pub struct MonteCarloAgent {
    name: String,
    player: Player,
    policy: TabularPolicy,
    returns: ReturnsTable,
    episode: Vec<EpisodeStep>,
}

impl MonteCarloAgent {
    pub fn new(player: Player) -> Self {
        Self::with_config(player, AgentConfig::default())
    }

    pub fn with_config(player: Player, config: AgentConfig) -> Self {
        Self {
            name: Algorithm::MonteCarlo.display_name().to_string(),
            player,
            policy: TabularPolicy::new(config),
            returns: ReturnsTable::new(),
            episode: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn returns(&self) -> &ReturnsTable {
        &self.returns
    }

    /// Steps buffered since the last terminal transition
    pub fn episode(&self) -> &[EpisodeStep] {
        &self.episode
    }

    fn finish_episode(&mut self) -> Result<()> {
        let episode = std::mem::take(&mut self.episode);
        let discount = self.policy.config().discount;

        let mut returns = vec![0.0; episode.len()];
        let mut g = 0.0;
        for (i, step) in episode.iter().enumerate().rev() {
            g = discount * g + step.reward;
            returns[i] = g;
        }

        let mut visited = HashSet::new();
        for (step, g) in episode.iter().zip(returns) {
            if !visited.insert((&step.state, step.action)) {
                continue;
            }
            let mean = self.returns.record(&step.state, step.action, g);
            self.policy
                .q_table_mut()
                .set(&step.state, step.action, mean)?;
        }

        log::trace!("{}: episode of {} steps settled", self.name, episode.len());
        Ok(())
    }
}

impl Agent for MonteCarloAgent {
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
        self.episode.push(EpisodeStep {
            state: transition.state.clone(),
            action: transition.action,
            reward: transition.reward,
        });

        if transition.is_terminal() {
            self.finish_episode()?;
            self.policy.decay_epsilon();
        }
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

impl LearningAgent for MonteCarloAgent {
    fn algorithm(&self) -> Algorithm {
        Algorithm::MonteCarlo
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
        PolicySnapshot::from_q_table(self.policy.q_table()).with_returns(self.returns.to_map())
    }

    fn restore(&mut self, snapshot: PolicySnapshot) -> Result<()> {
        let returns = ReturnsTable::from_map(snapshot.returns.unwrap_or_default())?;
        self.policy.replace_q_table(QTable::from_map(snapshot.qtable));
        self.returns = returns;
        self.episode.clear();
        Ok(())
    }
}
