//! Observer port - abstraction for training observation and reporting
//!
//! This port defines the interface for observing training events,
//! allowing progress display, logging and report export to be composed
//! without coupling the training loop to any output format.

use crate::{
    Result,
    pipeline::{ReportPoint, TrainingResult},
    q_learning::TdAlgorithm,
};

/// Observer trait for monitoring self-play training
///
/// # Event Sequence
///
/// 1. `on_training_start(algorithm, total_episodes)` - Once at the beginning
/// 2. For each episode: `on_episode_end(episode, reward)`, followed by
///    `on_report(point)` whenever a reporting window completes
/// 3. `on_training_end(result)` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use tictactoe_td::{pipeline::ReportPoint, ports::Observer};
///
/// struct LastAverage(Option<f64>);
///
/// impl Observer for LastAverage {
///     fn on_report(&mut self, point: &ReportPoint) -> tictactoe_td::Result<()> {
///         self.0 = Some(point.average_reward);
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _algorithm: TdAlgorithm, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each self-play episode with the Circle table's
    /// reward-per-episode from the evaluation game.
    ///
    /// `episode` is 0-based.
    fn on_episode_end(&mut self, _episode: usize, _reward: f64) -> Result<()> {
        Ok(())
    }

    /// Called each time a reporting window of episodes completes.
    fn on_report(&mut self, _point: &ReportPoint) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs, close files, or display summaries.
    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        Ok(())
    }
}
