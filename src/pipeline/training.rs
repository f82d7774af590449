//! Game harness and checkpoint training for tabular agents

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    app::RunConfig,
    ports::{Agent, LearningAgent, Observer, Transition},
    q_learning::exploration::build_rng,
    tictactoe::{Board, GameOutcome, Player},
    types::StateKey,
};

/// Rewards handed to learners during a run.
///
/// `step` is paid for every non-terminal half-move; the other three settle
/// the terminal half-move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardScheme {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
    pub step: f64,
}

impl RewardScheme {
    pub const fn new(win: f64, draw: f64, loss: f64, step: f64) -> Self {
        Self {
            win,
            draw,
            loss,
            step,
        }
    }

    /// All zeros; used for benchmark games where nothing should be learned.
    pub const fn neutral() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Self-play rewards for `--train`
    pub const fn training() -> Self {
        Self::new(1.0, 0.5, -2.0, -0.01)
    }

    pub fn terminal(&self, outcome: AgentOutcome) -> f64 {
        match outcome {
            AgentOutcome::Win => self.win,
            AgentOutcome::Draw => self.draw,
            AgentOutcome::Loss => self.loss,
        }
    }
}

impl Default for RewardScheme {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Game result from one seat's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentOutcome {
    Win,
    Draw,
    Loss,
}

impl AgentOutcome {
    pub fn from_game(outcome: GameOutcome, seat: Player) -> Self {
        match outcome {
            GameOutcome::Win(winner) if winner == seat => AgentOutcome::Win,
            GameOutcome::Win(_) => AgentOutcome::Loss,
            GameOutcome::Draw => AgentOutcome::Draw,
        }
    }
}

/// Win/draw/loss tally relative to the first agent of a matchup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl MatchResult {
    pub fn new(wins: usize, draws: usize, losses: usize) -> Self {
        Self {
            total_games: wins + draws + losses,
            wins,
            draws,
            losses,
        }
    }

    pub fn record(&mut self, outcome: AgentOutcome) {
        self.total_games += 1;
        match outcome {
            AgentOutcome::Win => self.wins += 1,
            AgentOutcome::Draw => self.draws += 1,
            AgentOutcome::Loss => self.losses += 1,
        }
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }
}

/// Periodic benchmark result during training
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Training games completed when the benchmark ran
    pub iteration: usize,
    pub result: MatchResult,
}

/// The two logical agents of a matchup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Agent1,
    Agent2,
}

impl Seat {
    fn other(self) -> Seat {
        match self {
            Seat::Agent1 => Seat::Agent2,
            Seat::Agent2 => Seat::Agent1,
        }
    }
}

/// Who plays whom.
///
/// Self-play seats one agent in both chairs; the harness still tells it
/// which player it is moving for on each turn.
pub enum Matchup<'a> {
    SelfPlay(&'a mut dyn Agent),
    Versus(&'a mut dyn Agent, &'a mut dyn Agent),
}

impl Matchup<'_> {
    fn agent_mut(&mut self, seat: Seat) -> &mut dyn Agent {
        match (self, seat) {
            (Matchup::SelfPlay(agent), _) => &mut **agent,
            (Matchup::Versus(agent1, _), Seat::Agent1) => &mut **agent1,
            (Matchup::Versus(_, agent2), Seat::Agent2) => &mut **agent2,
        }
    }
}

/// Plays complete games and feeds every half-move to the mover.
///
/// A fair coin decides which agent opens; the opener plays [`Player::One`].
/// Non-terminal half-moves pay `step`. The terminal half-move pays the
/// agent1-perspective outcome reward, sign-flipped when agent2 made it
/// (draws are never flipped), and carries no next state.
pub struct Harness {
    rewards: RewardScheme,
    rng: StdRng,
}

impl Harness {
    pub fn new(rewards: RewardScheme) -> Self {
        Self {
            rewards,
            rng: build_rng(None),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn rewards(&self) -> RewardScheme {
        self.rewards
    }

    /// Play one game; the outcome is relative to agent1.
    pub fn play_game(&mut self, matchup: &mut Matchup<'_>) -> Result<AgentOutcome> {
        let opener = if self.rng.random_bool(0.5) {
            Seat::Agent1
        } else {
            Seat::Agent2
        };
        let agent1_player = if opener == Seat::Agent1 {
            Player::One
        } else {
            Player::Two
        };

        let mut board = Board::new();
        let mut to_move = Player::One;
        let mut seat = opener;

        loop {
            let agent = matchup.agent_mut(seat);
            let state = agent.state_key(&board);
            let position = agent.select_move(&board, to_move)?;
            if !board.set_cell(position, to_move) {
                return Err(Error::IllegalAgentMove {
                    agent: agent.name().to_string(),
                    position,
                });
            }

            if let Some(outcome) = board.outcome() {
                let agent1_outcome = AgentOutcome::from_game(outcome, agent1_player);
                let reward = self.terminal_reward(agent1_outcome, seat);
                agent.learn(&Transition::terminal(state, position, reward))?;
                return Ok(agent1_outcome);
            }

            let next: StateKey = agent.state_key(&board);
            agent.learn(&Transition::step(state, position, self.rewards.step, next))?;

            to_move = to_move.opponent();
            seat = seat.other();
        }
    }

    pub fn play_games(&mut self, matchup: &mut Matchup<'_>, games: usize) -> Result<MatchResult> {
        let mut result = MatchResult::default();
        for _ in 0..games {
            result.record(self.play_game(matchup)?);
        }
        Ok(result)
    }

    fn terminal_reward(&self, agent1_outcome: AgentOutcome, mover: Seat) -> f64 {
        let reward = self.rewards.terminal(agent1_outcome);
        match (agent1_outcome, mover) {
            (AgentOutcome::Draw, _) | (_, Seat::Agent1) => reward,
            (_, Seat::Agent2) => -reward,
        }
    }
}

/// Frozen agent wrapper that prevents learning
///
/// Move selection is delegated unchanged; [`Agent::learn`] is a no-op. Used
/// for benchmark games so evaluation never changes the policy under test.
pub struct FrozenAgent<'a> {
    inner: &'a mut dyn Agent,
}

impl<'a> FrozenAgent<'a> {
    pub fn new(inner: &'a mut dyn Agent) -> Self {
        Self { inner }
    }
}

impl Agent for FrozenAgent<'_> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn player(&self) -> Player {
        self.inner.player()
    }

    fn select_move(&mut self, board: &Board, player: Player) -> Result<usize> {
        self.inner.select_move(board, player)
    }

    fn learn(&mut self, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    fn state_key(&self, board: &Board) -> StateKey {
        self.inner.state_key(board)
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.inner.set_rng_seed(seed);
    }

    fn as_learning(&self) -> Option<&dyn LearningAgent> {
        self.inner.as_learning()
    }
}

/// Benchmark `agent` against `opponent` without learning or exploration.
///
/// Learning agents are switched into evaluating mode for the duration and
/// restored afterwards. All rewards are zero.
pub fn evaluate(
    harness_seed: Option<u64>,
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    games: usize,
) -> Result<MatchResult> {
    let mut harness = Harness::new(RewardScheme::neutral());
    if let Some(seed) = harness_seed {
        harness = harness.with_seed(seed);
    }
    evaluate_with(&mut harness, agent, opponent, games)
}

fn evaluate_with(
    harness: &mut Harness,
    agent: &mut dyn Agent,
    opponent: &mut dyn Agent,
    games: usize,
) -> Result<MatchResult> {
    let previous = agent.as_learning_mut().map(|learner| {
        let previous = learner.is_evaluating();
        learner.set_evaluating(true);
        previous
    });

    let result = {
        let mut frozen = FrozenAgent::new(&mut *agent);
        let mut frozen_opponent = FrozenAgent::new(&mut *opponent);
        harness.play_games(
            &mut Matchup::Versus(&mut frozen, &mut frozen_opponent),
            games,
        )
    };

    if let (Some(previous), Some(learner)) = (previous, agent.as_learning_mut()) {
        learner.set_evaluating(previous);
    }
    result
}

/// Training configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Self-play games
    pub iterations: usize,
    /// Games between checkpoints (0 disables them)
    pub eval_frequency: usize,
    /// Benchmark games per checkpoint
    pub eval_games: usize,
    /// Self-play rewards
    pub rewards: RewardScheme,
    /// Random seed for the coin flips
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::from(&RunConfig::default())
    }
}

impl From<&RunConfig> for TrainingConfig {
    fn from(config: &RunConfig) -> Self {
        Self {
            iterations: config.iterations,
            eval_frequency: config.eval_frequency,
            eval_games: config.eval_games,
            rewards: config.training_rewards,
            seed: config.seed,
        }
    }
}

/// Outcome of a training run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Self-play tally (relative to the coin-flip seat agent1)
    pub self_play: MatchResult,
    pub checkpoints: Vec<Checkpoint>,
}

impl TrainingReport {
    pub fn last_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }
}

/// Self-play training with periodic benchmark checkpoints
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train `agent` against itself, benchmarking against `benchmark` every
    /// `eval_frequency` games.
    pub fn run(
        &mut self,
        agent: &mut dyn Agent,
        benchmark: &mut dyn Agent,
    ) -> Result<TrainingReport> {
        let (mut harness, mut eval_harness) = match self.config.seed {
            Some(seed) => (
                Harness::new(self.config.rewards).with_seed(seed),
                Harness::new(RewardScheme::neutral()).with_seed(seed.wrapping_add(1)),
            ),
            None => (
                Harness::new(self.config.rewards),
                Harness::new(RewardScheme::neutral()),
            ),
        };

        for observer in &mut self.observers {
            observer.on_training_start(self.config.iterations)?;
        }

        let mut report = TrainingReport::default();
        for game in 1..=self.config.iterations {
            let outcome = harness.play_game(&mut Matchup::SelfPlay(&mut *agent))?;
            report.self_play.record(outcome);
            log::debug!("{} game {game}: {outcome:?}", agent.name());

            for observer in &mut self.observers {
                observer.on_game_end(game, outcome)?;
            }

            if self.config.eval_frequency > 0 && game.is_multiple_of(self.config.eval_frequency) {
                let result =
                    evaluate_with(&mut eval_harness, agent, benchmark, self.config.eval_games)?;
                let checkpoint = Checkpoint {
                    iteration: game,
                    result,
                };
                log::info!(
                    "{} iteration {}: W {:.1}% D {:.1}% L {:.1}% vs {}",
                    agent.name(),
                    game,
                    result.win_rate() * 100.0,
                    result.draw_rate() * 100.0,
                    result.loss_rate() * 100.0,
                    benchmark.name()
                );
                for observer in &mut self.observers {
                    observer.on_checkpoint(&checkpoint)?;
                }
                report.checkpoints.push(checkpoint);
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(report)
    }
}
