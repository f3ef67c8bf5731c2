//! Tabular reinforcement learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - An immutable 3x3 board model with win/terminal detection
//! - Per-player action-value tables keyed by board contents
//! - Epsilon-greedy action selection
//! - SARSA and Q-learning temporal difference updates
//! - A self-play training pipeline with reward-per-episode monitoring
//! - Interactive human-vs-agent games

pub mod cli;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};
pub use q_learning::{ActionValueFunc, TdAlgorithm};
pub use tictactoe::{Player, State};
