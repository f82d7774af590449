//! Command-line interface
//!
//! Flags select what runs; any combination may be given and they run in the
//! order train, evaluate, compare, play. Without a command flag the usage is
//! printed and nothing else happens.
//!
//! Flags take the GNU double-dash form (`--train`, `--evaluate`, `--play`,
//! `--compare`); the single-dash `-train` spelling is not accepted.

pub mod commands;
pub mod output;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use crate::app::{App, ModelFormat, RunConfig};

/// Command-line flags.
///
/// Commands are long flags with two dashes (`--train`); a single-dash
/// `-train` is read as a cluster of short flags and rejected.
#[derive(Parser, Debug, Default)]
#[command(name = "tictactoe-rl")]
#[command(version, about = "Tic-tac-toe reinforcement-learning testbed", long_about = None)]
pub struct Cli {
    /// Train all models in self-play and save them
    #[arg(long)]
    pub train: bool,

    /// Evaluate trained models against Random and Minimax
    #[arg(long)]
    pub evaluate: bool,

    /// Play against an agent in the terminal
    #[arg(long)]
    pub play: bool,

    /// Compare reward schemes with freshly trained agents
    #[arg(long)]
    pub compare: bool,

    /// JSON run configuration; flags below override its fields
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Directory for saved models
    #[arg(long)]
    pub models_dir: Option<PathBuf>,

    /// Encoding of saved models
    #[arg(long, value_enum)]
    pub model_format: Option<ModelFormat>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Self-play games per learner
    #[arg(long, short = 'n')]
    pub iterations: Option<usize>,

    /// Games between training checkpoints
    #[arg(long)]
    pub eval_frequency: Option<usize>,

    /// Games per opponent when evaluating
    #[arg(long)]
    pub benchmark_games: Option<usize>,

    /// Training blocks per reward scheme when comparing
    #[arg(long)]
    pub compare_blocks: Option<usize>,
}

impl Cli {
    /// Whether any command flag was given
    pub fn has_command(&self) -> bool {
        self.train || self.evaluate || self.play || self.compare
    }

    /// Resolve the run configuration: file (or defaults), then flag overrides.
    pub fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(dir) = &self.models_dir {
            config.models_dir = dir.clone();
        }
        if let Some(format) = self.model_format {
            config.model_format = format;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(frequency) = self.eval_frequency {
            config.eval_frequency = frequency;
        }
        if let Some(games) = self.benchmark_games {
            config.benchmark_games = games;
        }
        if let Some(blocks) = self.compare_blocks {
            config.compare_blocks = blocks;
        }

        config.validate().context("Invalid run configuration")?;
        Ok(config)
    }
}

/// Run the commands selected by `cli`.
pub fn run(cli: Cli) -> Result<()> {
    if !cli.has_command() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let config = cli.run_config()?;
    let app = App::from_config(&config);

    if cli.train {
        commands::train::execute(&app, &config)?;
    }
    if cli.evaluate {
        commands::evaluate::execute(&app, &config)?;
    }
    if cli.compare {
        commands::compare::execute(&config)?;
    }
    if cli.play {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        commands::play::execute(&app, &mut input, &mut output)?;
    }

    Ok(())
}
