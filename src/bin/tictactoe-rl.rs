//! tictactoe-rl - train, evaluate and play tabular reinforcement-learning agents

use anyhow::Result;
use clap::Parser;
use tictactoe_rl::cli::{self, Cli};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    cli::run(Cli::parse())
}
