//! Reward-scheme comparison
//!
//! Trains fresh Q-learning, SARSA and Monte Carlo agents under each reward
//! scheme in blocks of self-play, benchmarking all three against a random
//! opponent after every block.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    app::{AgentConfig, AgentKind, RunConfig},
    baselines::RandomAgent,
    pipeline::training::{Harness, MatchResult, Matchup, RewardScheme, evaluate},
    q_learning::Algorithm,
    tictactoe::Player,
};

/// The five preset schemes, in report order.
pub const PRESET_SCHEMES: [RewardScheme; 5] = [
    // Standard
    RewardScheme::new(1.0, 0.0, -1.0, 0.0),
    // Reward draws
    RewardScheme::new(1.0, 0.5, -1.0, 0.0),
    // Emphasize winning
    RewardScheme::new(2.0, 0.0, -1.0, 0.0),
    // Emphasize avoiding losses
    RewardScheme::new(1.0, 0.0, -2.0, 0.0),
    // Penalize long games
    RewardScheme::new(1.0, 0.0, -1.0, -0.1),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Self-play games per block
    pub block_games: usize,
    /// Blocks per scheme
    pub blocks: usize,
    /// Games against Random after each block
    pub eval_games: usize,
    pub agent: AgentConfig,
    pub seed: Option<u64>,
}

impl From<&RunConfig> for ComparisonConfig {
    fn from(config: &RunConfig) -> Self {
        Self {
            block_games: config.compare_block_games,
            blocks: config.compare_blocks,
            eval_games: config.compare_eval_games,
            agent: config.agent,
            seed: config.seed,
        }
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self::from(&RunConfig::default())
    }
}

/// Benchmark results after one block of training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockResult {
    /// Cumulative self-play games per agent
    pub games_trained: usize,
    pub results: Vec<(Algorithm, MatchResult)>,
}

/// Everything measured for one scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeComparison {
    pub scheme: RewardScheme,
    pub blocks: Vec<BlockResult>,
}

/// Runs the comparison scheme by scheme.
pub struct ComparisonFramework {
    config: ComparisonConfig,
}

impl ComparisonFramework {
    pub fn new(config: ComparisonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Train fresh agents under `scheme`; `on_block` sees each block's
    /// results as soon as they are measured.
    pub fn run_scheme<F>(
        &self,
        scheme_index: usize,
        scheme: RewardScheme,
        mut on_block: F,
    ) -> Result<SchemeComparison>
    where
        F: FnMut(&BlockResult),
    {
        let seed = self
            .config
            .seed
            .map(|seed| seed.wrapping_add(scheme_index as u64 * 1_000));
        let mut agent_config = self.config.agent;
        if let Some(seed) = seed {
            agent_config = agent_config.with_seed(seed);
        }

        let mut learners: Vec<_> = Algorithm::ALL
            .into_iter()
            .map(|algorithm| {
                (
                    algorithm,
                    AgentKind::from(algorithm).build(Player::One, agent_config),
                )
            })
            .collect();
        let mut random = RandomAgent::with_seed(
            Player::Two,
            seed.unwrap_or(RandomAgent::DEFAULT_SEED),
        );

        let mut harness = Harness::new(scheme);
        if let Some(seed) = seed {
            harness = harness.with_seed(seed);
        }

        let mut comparison = SchemeComparison {
            scheme,
            blocks: Vec::with_capacity(self.config.blocks),
        };

        for block in 1..=self.config.blocks {
            let mut results = Vec::with_capacity(learners.len());
            for (algorithm, agent) in &mut learners {
                harness.play_games(
                    &mut Matchup::SelfPlay(agent.as_mut()),
                    self.config.block_games,
                )?;
                let eval_seed = seed.map(|s| s.wrapping_add(block as u64));
                let result = evaluate(
                    eval_seed,
                    agent.as_mut(),
                    &mut random,
                    self.config.eval_games,
                )?;
                results.push((*algorithm, result));
            }

            let block_result = BlockResult {
                games_trained: block * self.config.block_games,
                results,
            };
            log::debug!(
                "scheme {} block {block}: {:?}",
                scheme_index + 1,
                block_result.results
            );
            on_block(&block_result);
            comparison.blocks.push(block_result);
        }

        Ok(comparison)
    }

    /// Run every scheme in `schemes`.
    pub fn run_all(&self, schemes: &[RewardScheme]) -> Result<Vec<SchemeComparison>> {
        schemes
            .iter()
            .enumerate()
            .map(|(index, &scheme)| self.run_scheme(index, scheme, |_| {}))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(PRESET_SCHEMES.len(), 5);
        assert_eq!(PRESET_SCHEMES[2].win, 2.0);
        assert_eq!(PRESET_SCHEMES[4].step, -0.1);
    }

    #[test]
    fn test_small_comparison() {
        let framework = ComparisonFramework::new(ComparisonConfig {
            block_games: 20,
            blocks: 2,
            eval_games: 10,
            agent: AgentConfig::default(),
            seed: Some(1),
        });

        let mut seen = 0;
        let comparison = framework
            .run_scheme(0, PRESET_SCHEMES[0], |_| seen += 1)
            .unwrap();

        assert_eq!(seen, 2);
        assert_eq!(comparison.blocks.len(), 2);
        assert_eq!(comparison.blocks[1].games_trained, 40);
        for block in &comparison.blocks {
            let algorithms: Vec<Algorithm> = block.results.iter().map(|(a, _)| *a).collect();
            assert_eq!(algorithms, Algorithm::ALL.to_vec());
            assert!(block.results.iter().all(|(_, r)| r.total_games == 10));
        }
    }
}
