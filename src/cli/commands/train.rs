//! Train command - self-play training for every learner

use anyhow::{Context, Result};

use crate::{
    app::{AgentKind, App, RunConfig},
    baselines::RandomAgent,
    cli::output::{format_number, format_rates, print_kv, print_section},
    pipeline::{ProgressObserver, TrainingConfig, TrainingPipeline, TrainingReport},
    q_learning::Algorithm,
    tictactoe::Player,
};

/// Train one fresh agent per algorithm and save each policy.
///
/// Returns the training report of every learner, in [`Algorithm::ALL`] order.
pub fn train_all(
    app: &App,
    config: &RunConfig,
    show_progress: bool,
) -> Result<Vec<(Algorithm, TrainingReport)>> {
    let training = TrainingConfig::from(config);
    let mut reports = Vec::with_capacity(Algorithm::ALL.len());

    for algorithm in Algorithm::ALL {
        let mut agent = app.create_agent(AgentKind::from(algorithm), Player::One);
        let mut benchmark = RandomAgent::with_seed(
            Player::Two,
            config.seed.unwrap_or(RandomAgent::DEFAULT_SEED),
        );

        let mut pipeline = TrainingPipeline::new(training);
        if show_progress {
            pipeline =
                pipeline.with_observer(Box::new(ProgressObserver::new(algorithm.display_name())));
        }

        println!("\nTraining {algorithm} agent...");
        let report = pipeline
            .run(agent.as_mut(), &mut benchmark)
            .with_context(|| format!("Training {algorithm} failed"))?;

        if let Some(path) = app
            .save(agent.as_ref())
            .with_context(|| format!("Failed to save {algorithm} model"))?
        {
            print_kv("Saved to", &path.display().to_string());
        }
        reports.push((algorithm, report));
    }

    Ok(reports)
}

pub fn execute(app: &App, config: &RunConfig) -> Result<()> {
    print_section("Training Models");
    print_kv("Iterations", &format_number(config.iterations));
    print_kv("Eval frequency", &format_number(config.eval_frequency));
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let reports = train_all(app, config, true)?;

    print_section("Final Checkpoints vs Random");
    for (algorithm, report) in &reports {
        match report.last_checkpoint() {
            Some(checkpoint) => {
                print_kv(algorithm.display_name(), &format_rates(&checkpoint.result))
            }
            None => print_kv(algorithm.display_name(), "no checkpoint"),
        }
    }

    Ok(())
}
