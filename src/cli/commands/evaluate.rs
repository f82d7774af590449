//! Evaluate command - benchmark saved models against the baselines

use anyhow::Result;
use serde::Serialize;

use crate::{
    app::{AgentKind, App, RunConfig},
    baselines::{MinimaxAgent, RandomAgent},
    cli::output::{format_rates, print_section, print_subsection},
    pipeline::{MatchResult, evaluate},
    q_learning::Algorithm,
    tictactoe::Player,
};

/// Benchmark results for one learner
#[derive(Debug, Clone, Serialize)]
pub struct ModelEvaluation {
    pub algorithm: Algorithm,
    /// Whether a saved policy was found
    pub loaded: bool,
    pub vs_random: MatchResult,
    pub vs_minimax: MatchResult,
}

/// Restore every learner (empty if nothing is saved) and benchmark it.
pub fn evaluate_models(app: &App, config: &RunConfig) -> Result<Vec<ModelEvaluation>> {
    let seed = config.seed.unwrap_or(RandomAgent::DEFAULT_SEED);
    let mut random = RandomAgent::with_seed(Player::Two, seed);
    let mut minimax = MinimaxAgent::new(Player::Two);

    let mut evaluations = Vec::with_capacity(Algorithm::ALL.len());
    for algorithm in Algorithm::ALL {
        let mut agent = app.create_agent(AgentKind::from(algorithm), Player::One);
        let loaded = app.load_or_warn(agent.as_mut());

        let vs_random = evaluate(config.seed, agent.as_mut(), &mut random, config.benchmark_games)?;
        let vs_minimax = evaluate(
            config.seed.map(|s| s.wrapping_add(1)),
            agent.as_mut(),
            &mut minimax,
            config.benchmark_games,
        )?;

        evaluations.push(ModelEvaluation {
            algorithm,
            loaded,
            vs_random,
            vs_minimax,
        });
    }

    Ok(evaluations)
}

pub fn execute(app: &App, config: &RunConfig) -> Result<()> {
    print_section("Evaluating Models");
    println!("Games per opponent: {}", config.benchmark_games);

    for evaluation in evaluate_models(app, config)? {
        let title = if evaluation.loaded {
            format!("{} agent", evaluation.algorithm)
        } else {
            format!("{} agent (untrained)", evaluation.algorithm)
        };
        print_subsection(&title);
        println!("vs Random:  {}", format_rates(&evaluation.vs_random));
        println!("vs Minimax: {}", format_rates(&evaluation.vs_minimax));
    }

    Ok(())
}
