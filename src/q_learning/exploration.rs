//! ε-greedy exploration with multiplicative decay

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::app::AgentConfig;

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Per-agent exploration state: current ε, its schedule and a private RNG.
#[derive(Debug, Clone)]
pub struct Exploration {
    epsilon: f64,
    decay: f64,
    min_epsilon: f64,
    evaluating: bool,
    rng: StdRng,
}

impl Exploration {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            epsilon: config.initial_epsilon.max(config.min_epsilon),
            decay: config.epsilon_decay,
            min_epsilon: config.min_epsilon,
            evaluating: false,
            rng: build_rng(config.seed),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn is_evaluating(&self) -> bool {
        self.evaluating
    }

    pub fn set_evaluating(&mut self, evaluating: bool) {
        self.evaluating = evaluating;
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// ε-greedy choice among `legal_moves`.
    ///
    /// With probability ε a uniformly random legal move, otherwise `greedy`.
    /// Evaluating mode always takes `greedy`. Returns `None` when there are no
    /// legal moves.
    pub fn select<F>(&mut self, legal_moves: &[usize], greedy: F) -> Option<usize>
    where
        F: FnOnce(&[usize]) -> Option<usize>,
    {
        if legal_moves.is_empty() {
            return None;
        }
        if !self.evaluating && self.rng.random::<f64>() < self.epsilon {
            legal_moves.choose(&mut self.rng).copied()
        } else {
            greedy(legal_moves)
        }
    }

    /// Multiplicative decay, never below the floor. Paused while evaluating.
    pub fn decay(&mut self) {
        if self.evaluating {
            return;
        }
        self.epsilon = (self.epsilon * self.decay).max(self.min_epsilon);
    }
}
