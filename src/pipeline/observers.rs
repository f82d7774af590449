//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    pipeline::{AgentOutcome, Checkpoint, MatchResult},
    ports::Observer,
};

/// Width of the checkpoint bar in characters
pub const CHECKPOINT_BAR_WIDTH: usize = 30;

/// One-line checkpoint summary with a proportional W/D/L bar.
///
/// ```
/// use tictactoe_rl::pipeline::{Checkpoint, MatchResult, observers::render_checkpoint};
///
/// let line = render_checkpoint(&Checkpoint {
///     iteration: 5000,
///     result: MatchResult::new(50, 30, 20),
/// });
/// assert!(line.starts_with("Iteration 5000: ["));
/// assert!(line.ends_with("] W:50% D:30% L:20%"));
/// ```
pub fn render_checkpoint(checkpoint: &Checkpoint) -> String {
    let result = &checkpoint.result;
    let width = CHECKPOINT_BAR_WIDTH;
    let wins = (result.win_rate() * width as f64) as usize;
    let draws = ((result.draw_rate() * width as f64) as usize).min(width - wins);
    let losses = width - wins - draws;

    format!(
        "Iteration {}: [{}{}{}] W:{:.0}% D:{:.0}% L:{:.0}%",
        checkpoint.iteration,
        "█".repeat(wins),
        "▒".repeat(draws),
        "░".repeat(losses),
        result.win_rate() * 100.0,
        result.draw_rate() * 100.0,
        result.loss_rate() * 100.0,
    )
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    label: String,
    tally: MatchResult,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            progress_bar: None,
            label: label.into(),
            tally: MatchResult::default(),
        }
    }

    fn message(&self) -> String {
        format!(
            "{} W:{} D:{} L:{}",
            self.label, self.tally.wins, self.tally.draws, self.tally.losses
        )
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: AgentOutcome) -> Result<()> {
        self.tally.record(outcome);
        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64);
            if game_num.is_multiple_of(100) {
                pb.set_message(self.message());
            }
        }
        Ok(())
    }

    fn on_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<()> {
        let line = render_checkpoint(checkpoint);
        match &self.progress_bar {
            Some(pb) => pb.println(line),
            None => println!("{line}"),
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    tally: MatchResult,
    checkpoints: Vec<Checkpoint>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Self-play tally so far
    pub fn tally(&self) -> &MatchResult {
        &self.tally
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Best checkpoint win rate, if any checkpoint ran
    pub fn best_win_rate(&self) -> Option<f64> {
        self.checkpoints
            .iter()
            .map(|c| c.result.win_rate())
            .reduce(f64::max)
    }
}

impl Observer for MetricsObserver {
    fn on_game_end(&mut self, _game_num: usize, outcome: AgentOutcome) -> Result<()> {
        self.tally.record(outcome);
        Ok(())
    }

    fn on_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<()> {
        self.checkpoints.push(*checkpoint);
        Ok(())
    }
}
