//! Observer port - abstraction for training progress reporting
//!
//! This port defines the interface for observing training events, allowing
//! progress bars, metrics and logs to be composed without coupling the
//! training loop to any output format.

use crate::{
    Result,
    pipeline::{AgentOutcome, Checkpoint},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_games)` - Once at the beginning
/// 2. For each training game: `on_game_end(game_num, outcome)`
/// 3. After every evaluation block: `on_checkpoint(checkpoint)`
/// 4. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```
/// use tictactoe_rl::{pipeline::AgentOutcome, ports::Observer};
///
/// struct CountingObserver {
///     games: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         _outcome: AgentOutcome,
///     ) -> tictactoe_rl::Result<()> {
///         self.games += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Parameters
    ///
    /// * `total_games` - Number of training games that will be played
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every training game.
    ///
    /// `outcome` is seen from the trained agent's seat.
    fn on_game_end(&mut self, _game_num: usize, _outcome: AgentOutcome) -> Result<()> {
        Ok(())
    }

    /// Called after each periodic evaluation against the benchmark.
    fn on_checkpoint(&mut self, _checkpoint: &Checkpoint) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
