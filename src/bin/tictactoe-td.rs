//! tictactoe-td CLI - Train SARSA or Q-learning agents by self-play and play
//! against the result.

use anyhow::Result;
use clap::Parser;
use tictactoe_td::cli::commands::train::{TrainArgs, execute};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    execute(TrainArgs::parse())
}
