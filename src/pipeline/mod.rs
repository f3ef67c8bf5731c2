//! Self-play training and evaluation pipeline
//!
//! This module provides:
//! - The one-ply-delayed self-play episode driver
//! - The reward-per-episode evaluation game
//! - The training loop that alternates the two and reports progress
//! - Observers for progress bars, log output and JSONL export

pub mod episode;
pub mod evaluation;
pub mod observers;
pub mod training;

pub use episode::run_episode;
pub use evaluation::reward_per_episode;
pub use observers::{JsonlObserver, LogObserver, ProgressObserver};
pub use training::{ReportPoint, TrainingConfig, TrainingPipeline, TrainingResult, run};

pub use crate::ports::Observer;
