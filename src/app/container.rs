//! Dependency injection container for the application.
//!
//! The container owns infrastructure dependencies (the policy repository and
//! the models directory) and provides factory methods for creating agents.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use super::config::{AgentConfig, ModelFormat, RunConfig};
use crate::{
    Error, Result,
    adapters::{JsonRepository, MsgPackRepository},
    baselines::{MinimaxAgent, RandomAgent},
    monte_carlo::MonteCarloAgent,
    ports::{Agent, PolicyRepository},
    q_learning::{Algorithm, QLearningAgent, SarsaAgent},
    tictactoe::Player,
};

/// Every strategy the application can construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Random,
    Minimax,
    QLearning,
    Sarsa,
    MonteCarlo,
}

impl AgentKind {
    /// Menu order for interactive play
    pub const ALL: [AgentKind; 5] = [
        AgentKind::Random,
        AgentKind::Minimax,
        AgentKind::QLearning,
        AgentKind::Sarsa,
        AgentKind::MonteCarlo,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            AgentKind::Random => "Random",
            AgentKind::Minimax => "Minimax",
            AgentKind::QLearning => Algorithm::QLearning.display_name(),
            AgentKind::Sarsa => Algorithm::Sarsa.display_name(),
            AgentKind::MonteCarlo => Algorithm::MonteCarlo.display_name(),
        }
    }

    /// Learning rule, for the kinds that learn
    pub fn algorithm(self) -> Option<Algorithm> {
        match self {
            AgentKind::Random | AgentKind::Minimax => None,
            AgentKind::QLearning => Some(Algorithm::QLearning),
            AgentKind::Sarsa => Some(Algorithm::Sarsa),
            AgentKind::MonteCarlo => Some(Algorithm::MonteCarlo),
        }
    }

    /// Construct a fresh agent of this kind.
    pub fn build(self, player: Player, config: AgentConfig) -> Box<dyn Agent> {
        match self {
            AgentKind::Random => Box::new(RandomAgent::with_seed(
                player,
                config.seed.unwrap_or(RandomAgent::DEFAULT_SEED),
            )),
            AgentKind::Minimax => Box::new(MinimaxAgent::new(player)),
            AgentKind::QLearning => Box::new(QLearningAgent::with_config(player, config)),
            AgentKind::Sarsa => Box::new(SarsaAgent::with_config(player, config)),
            AgentKind::MonteCarlo => Box::new(MonteCarloAgent::with_config(player, config)),
        }
    }
}

impl From<Algorithm> for AgentKind {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::QLearning => AgentKind::QLearning,
            Algorithm::Sarsa => AgentKind::Sarsa,
            Algorithm::MonteCarlo => AgentKind::MonteCarlo,
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Application with dependency injection.
///
/// # Examples
///
/// ```
/// use tictactoe_rl::adapters::InMemoryRepository;
/// use tictactoe_rl::app::{AgentKind, App};
/// use tictactoe_rl::tictactoe::Player;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
///
/// let mut agent = app.create_agent(AgentKind::QLearning, Player::One);
/// assert!(!app.load_or_warn(agent.as_mut()));
/// assert!(app.save(agent.as_ref())?.is_some());
/// # Ok::<(), tictactoe_rl::Error>(())
/// ```
pub struct App {
    /// Repository for policy persistence
    repository: Arc<dyn PolicyRepository + Send + Sync>,
    /// Directory holding `<algorithm>.<ext>` files
    models_dir: PathBuf,
    /// Hyper-parameters for every learner created here
    agent_config: AgentConfig,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Production defaults: JSON files under `models/`.
    pub fn new() -> Self {
        Self {
            repository: Arc::new(JsonRepository::new()),
            models_dir: PathBuf::from("models"),
            agent_config: AgentConfig::default(),
            default_seed: None,
        }
    }

    /// Production app configured from a run config.
    pub fn from_config(config: &RunConfig) -> Self {
        let repository: Arc<dyn PolicyRepository + Send + Sync> = match config.model_format {
            ModelFormat::Json => Arc::new(JsonRepository::new()),
            ModelFormat::MsgPack => Arc::new(MsgPackRepository::new()),
        };
        Self {
            repository,
            models_dir: config.models_dir.clone(),
            agent_config: config.agent,
            default_seed: config.seed,
            ..Self::new()
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the policy repository.
    pub fn repository(&self) -> Arc<dyn PolicyRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn agent_config(&self) -> AgentConfig {
        let mut config = self.agent_config;
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }
        config
    }

    /// Create an agent; the seed comes from the agent config or the app default.
    pub fn create_agent(&self, kind: AgentKind, player: Player) -> Box<dyn Agent> {
        kind.build(player, self.agent_config())
    }

    /// Where the policy for `algorithm` lives
    pub fn model_path(&self, algorithm: Algorithm) -> PathBuf {
        self.models_dir
            .join(algorithm.file_stem())
            .with_extension(self.repository.extension())
    }

    /// Restore a saved policy into `agent`.
    ///
    /// Returns `Ok(false)` for agents that do not learn.
    ///
    /// # Errors
    ///
    /// [`Error::MissingModel`] if nothing is saved yet, or the repository's
    /// error for unreadable data. The agent is unchanged on error.
    pub fn load_into(&self, agent: &mut dyn Agent) -> Result<bool> {
        let Some(learner) = agent.as_learning_mut() else {
            return Ok(false);
        };
        let path = self.model_path(learner.algorithm());
        let snapshot = self.repository.load(&path)?;
        let states = snapshot.len();
        learner.restore(snapshot)?;
        log::info!(
            "Loaded {} policy from {} ({states} states)",
            learner.algorithm(),
            path.display()
        );
        Ok(true)
    }

    /// Like [`App::load_into`], but any failure is logged as a warning and
    /// the agent keeps its empty policy.
    pub fn load_or_warn(&self, agent: &mut dyn Agent) -> bool {
        match self.load_into(agent) {
            Ok(loaded) => loaded,
            Err(Error::MissingModel { path }) => {
                log::warn!("No trained {} model found at {path}", agent.name());
                false
            }
            Err(err) => {
                log::warn!("Could not load {} model: {err}", agent.name());
                false
            }
        }
    }

    /// Persist `agent`'s policy if it has one; returns the path written.
    pub fn save(&self, agent: &dyn Agent) -> Result<Option<PathBuf>> {
        let Some(learner) = agent.as_learning() else {
            return Ok(None);
        };
        let path = self.model_path(learner.algorithm());
        let snapshot = learner.snapshot();
        self.repository.save(&snapshot, &path)?;
        log::info!(
            "Saved {} policy to {} ({} states)",
            learner.algorithm(),
            path.display(),
            snapshot.len()
        );
        Ok(Some(path))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing App with custom dependencies.
pub struct AppBuilder {
    repository: Option<Arc<dyn PolicyRepository + Send + Sync>>,
    models_dir: Option<PathBuf>,
    agent_config: AgentConfig,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            models_dir: None,
            agent_config: AgentConfig::default(),
            default_seed: None,
        }
    }

    /// Set the policy repository implementation.
    pub fn with_repository<R>(mut self, repository: R) -> Self
    where
        R: PolicyRepository + Send + Sync + 'static,
    {
        self.repository = Some(Arc::new(repository));
        self
    }

    pub fn with_models_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.models_dir = Some(dir.into());
        self
    }

    pub fn with_agent_config(mut self, config: AgentConfig) -> Self {
        self.agent_config = config;
        self
    }

    /// Set the default random seed for all agents.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app. Unset dependencies fall back to production defaults.
    pub fn build(self) -> App {
        let defaults = App::new();
        App {
            repository: self.repository.unwrap_or(defaults.repository),
            models_dir: self.models_dir.unwrap_or(defaults.models_dir),
            agent_config: self.agent_config,
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::InMemoryRepository,
        ports::{LearningAgent, Transition},
        types::StateKey,
    };

    fn app(repo: InMemoryRepository) -> App {
        App::for_testing()
            .with_repository(repo)
            .with_models_dir("models")
            .with_default_seed(7)
            .build()
    }

    #[test]
    fn test_model_paths() {
        let app = App::new();
        assert_eq!(
            app.model_path(Algorithm::QLearning),
            PathBuf::from("models/qlearning.json")
        );
        assert_eq!(
            app.model_path(Algorithm::MonteCarlo),
            PathBuf::from("models/montecarlo.json")
        );
    }

    #[test]
    fn test_default_seed_flows_into_agents() {
        let app = app(InMemoryRepository::new());
        assert_eq!(app.agent_config().seed, Some(7));

        let explicit = App::for_testing()
            .with_agent_config(AgentConfig::default().with_seed(3))
            .with_default_seed(7)
            .build();
        assert_eq!(explicit.agent_config().seed, Some(3));
    }

    #[test]
    fn test_baselines_are_not_saved() {
        let repo = InMemoryRepository::new();
        let app = app(repo.clone());
        for kind in [AgentKind::Random, AgentKind::Minimax] {
            let mut agent = app.create_agent(kind, Player::Two);
            assert!(app.save(agent.as_ref()).unwrap().is_none());
            assert!(!app.load_into(agent.as_mut()).unwrap());
        }
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let repo = InMemoryRepository::new();
        let app = app(repo.clone());

        let state = StateKey::parse("110220000").unwrap();
        let mut trained = app.create_agent(AgentKind::Sarsa, Player::One);
        trained
            .learn(&Transition::terminal(state.clone(), 2, 1.0))
            .unwrap();
        let path = app.save(trained.as_ref()).unwrap().unwrap();
        assert!(repo.contains(&path));

        let mut fresh = app.create_agent(AgentKind::Sarsa, Player::One);
        assert!(app.load_into(fresh.as_mut()).unwrap());
        let learner = fresh.as_learning().unwrap();
        assert!((learner.q_table().get(&state, 2) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_missing_model_warns_and_keeps_empty_table() {
        let app = app(InMemoryRepository::new());
        let mut agent = app.create_agent(AgentKind::MonteCarlo, Player::One);
        assert!(matches!(
            app.load_into(agent.as_mut()),
            Err(Error::MissingModel { .. })
        ));
        assert!(!app.load_or_warn(agent.as_mut()));
        assert!(agent.as_learning().unwrap().q_table().is_empty());
    }

    #[test]
    fn test_kind_names() {
        let names: Vec<&str> = AgentKind::ALL.iter().map(|k| k.display_name()).collect();
        assert_eq!(
            names,
            ["Random", "Minimax", "Q-Learning", "SARSA", "Monte Carlo"]
        );
        assert_eq!(AgentKind::from(Algorithm::Sarsa), AgentKind::Sarsa);
        assert_eq!(AgentKind::Minimax.algorithm(), None);
    }
}
