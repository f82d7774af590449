//! Configuration types for agent creation and training runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, pipeline::RewardScheme};

/// Hyper-parameters shared by the tabular learners.
///
/// # Examples
///
/// ```
/// use tictactoe_rl::app::AgentConfig;
///
/// let config = AgentConfig::default().with_seed(42);
/// assert_eq!(config.alpha, 0.1);
/// assert_eq!(config.min_epsilon, 0.1);
/// config.validate()?;
/// # Ok::<(), tictactoe_rl::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate α (TD learners only)
    pub alpha: f64,
    /// Discount factor γ
    pub discount: f64,
    /// Exploration rate at construction
    pub initial_epsilon: f64,
    /// Multiplicative decay applied after each update (or episode, for Monte Carlo)
    pub epsilon_decay: f64,
    /// Exploration floor
    pub min_epsilon: f64,
    /// Seed for the agent's private random source (None = from entropy)
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub const DEFAULT_ALPHA: f64 = 0.1;
    pub const DEFAULT_DISCOUNT: f64 = 0.99;
    pub const DEFAULT_EPSILON: f64 = 0.9;
    pub const DEFAULT_EPSILON_DECAY: f64 = 0.99995;
    pub const DEFAULT_MIN_EPSILON: f64 = 0.1;

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Set the exploration schedule (start, decay, floor).
    pub fn with_exploration(mut self, initial: f64, decay: f64, min: f64) -> Self {
        self.initial_epsilon = initial;
        self.epsilon_decay = decay;
        self.min_epsilon = min;
        self
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, value: f64| -> Result<()> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(Error::InvalidConfiguration {
                    message: format!("{name} must be in [0, 1], got {value}"),
                })
            }
        };

        unit("alpha", self.alpha)?;
        unit("discount", self.discount)?;
        unit("initial_epsilon", self.initial_epsilon)?;
        unit("min_epsilon", self.min_epsilon)?;

        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "epsilon_decay must be in (0, 1], got {}",
                    self.epsilon_decay
                ),
            });
        }
        if self.min_epsilon > self.initial_epsilon {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "min_epsilon {} exceeds initial_epsilon {}",
                    self.min_epsilon, self.initial_epsilon
                ),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            discount: Self::DEFAULT_DISCOUNT,
            initial_epsilon: Self::DEFAULT_EPSILON,
            epsilon_decay: Self::DEFAULT_EPSILON_DECAY,
            min_epsilon: Self::DEFAULT_MIN_EPSILON,
            seed: None,
        }
    }
}

/// On-disk format for saved policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    #[default]
    Json,
    #[value(name = "msgpack")]
    MsgPack,
}

/// Settings for the `--train`, `--evaluate`, `--play` and `--compare` runs.
///
/// Every field has a default, so a JSON config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Self-play games per learner
    pub iterations: usize,
    /// Games between checkpoints
    pub eval_frequency: usize,
    /// Benchmark games per checkpoint
    pub eval_games: usize,
    /// Games per opponent in `--evaluate`
    pub benchmark_games: usize,
    /// Directory holding saved policies
    pub models_dir: PathBuf,
    /// Encoding of the files in `models_dir`
    pub model_format: ModelFormat,
    /// Rewards used during self-play
    pub training_rewards: RewardScheme,
    /// Self-play games per block in `--compare`
    pub compare_block_games: usize,
    /// Blocks per reward scheme in `--compare`
    pub compare_blocks: usize,
    /// Evaluation games after each `--compare` block
    pub compare_eval_games: usize,
    /// Seed for the harness coin flips and derived agent seeds
    pub seed: Option<u64>,
    /// Learner hyper-parameters
    pub agent: AgentConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: 100_000,
            eval_frequency: 5_000,
            eval_games: 100,
            benchmark_games: 1_000,
            models_dir: PathBuf::from("models"),
            model_format: ModelFormat::Json,
            training_rewards: RewardScheme::training(),
            compare_block_games: 1_000,
            compare_blocks: 5,
            compare_eval_games: 200,
            seed: None,
            agent: AgentConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load a config from a JSON file; missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check run settings and the learner schedule.
    ///
    /// Runs keep ε between the default floor (0.1) and the default start
    /// (0.9); wider schedules need an [`AgentConfig`] built directly.
    pub fn validate(&self) -> Result<()> {
        if self.eval_frequency == 0 {
            return Err(Error::InvalidConfiguration {
                message: "eval_frequency must be positive".to_string(),
            });
        }
        self.agent.validate()?;

        if self.agent.min_epsilon < AgentConfig::DEFAULT_MIN_EPSILON {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "min_epsilon must be at least {}, got {}",
                    AgentConfig::DEFAULT_MIN_EPSILON,
                    self.agent.min_epsilon
                ),
            });
        }
        if self.agent.initial_epsilon > AgentConfig::DEFAULT_EPSILON {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "initial_epsilon must be at most {}, got {}",
                    AgentConfig::DEFAULT_EPSILON,
                    self.agent.initial_epsilon
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_learning_constants() {
        let config = AgentConfig::default();
        assert_eq!(config.alpha, 0.1);
        assert_eq!(config.discount, 0.99);
        assert_eq!(config.initial_epsilon, 0.9);
        assert_eq!(config.epsilon_decay, 0.99995);
        assert_eq!(config.min_epsilon, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(AgentConfig::default().with_alpha(1.5).validate().is_err());
        assert!(AgentConfig::default().with_discount(-0.1).validate().is_err());
        assert!(
            AgentConfig::default()
                .with_exploration(0.2, 0.0, 0.1)
                .validate()
                .is_err()
        );
        assert!(
            AgentConfig::default()
                .with_exploration(0.05, 0.9, 0.1)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_partial_run_config_uses_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{"iterations": 10, "agent": {"seed": 3}}"#).unwrap();
        assert_eq!(config.iterations, 10);
        assert_eq!(config.eval_frequency, 5_000);
        assert_eq!(config.agent.seed, Some(3));
        assert_eq!(config.agent.alpha, 0.1);
        assert_eq!(config.training_rewards, RewardScheme::training());
        assert_eq!(config.model_format, ModelFormat::Json);

        let config: RunConfig = serde_json::from_str(r#"{"model_format": "msgpack"}"#).unwrap();
        assert_eq!(config.model_format, ModelFormat::MsgPack);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"eval_frequency": 0}"#).unwrap();
        assert!(RunConfig::load(&path).is_err());

        std::fs::write(&path, r#"{"eval_games": 7}"#).unwrap();
        assert_eq!(RunConfig::load(&path).unwrap().eval_games, 7);

        assert!(RunConfig::load(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_run_config_keeps_epsilon_in_band() {
        let config: RunConfig = serde_json::from_str(
            r#"{"agent": {"min_epsilon": 0.0, "epsilon_decay": 0.5, "initial_epsilon": 1.0}}"#,
        )
        .unwrap();
        assert!(config.agent.validate().is_ok());
        assert!(config.validate().is_err());

        let config: RunConfig =
            serde_json::from_str(r#"{"agent": {"min_epsilon": 0.05}}"#).unwrap();
        assert!(config.validate().is_err());

        let config: RunConfig =
            serde_json::from_str(r#"{"agent": {"initial_epsilon": 0.95}}"#).unwrap();
        assert!(config.validate().is_err());

        let config: RunConfig = serde_json::from_str(
            r#"{"agent": {"initial_epsilon": 0.5, "epsilon_decay": 0.9, "min_epsilon": 0.2}}"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validated_schedule_never_drops_below_floor() {
        use crate::{
            ports::{Agent, LearningAgent, Transition},
            q_learning::QLearningAgent,
            tictactoe::{Board, Player},
        };

        let config: RunConfig =
            serde_json::from_str(r#"{"agent": {"epsilon_decay": 0.5, "seed": 1}}"#).unwrap();
        config.validate().unwrap();

        let mut agent = QLearningAgent::with_config(Player::One, config.agent);
        let state = Board::new().encode();
        for _ in 0..100 {
            agent.learn(&Transition::terminal(state.clone(), 0, 0.0)).unwrap();
        }
        assert!(agent.epsilon() >= AgentConfig::DEFAULT_MIN_EPSILON);
    }
}
