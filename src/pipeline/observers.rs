//! Observer implementations for the training pipeline
//!
//! Observers allow composable reporting during training without coupling
//! training logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};

use super::training::{ReportPoint, TrainingResult};
use crate::{Result, ports::Observer, q_learning::TdAlgorithm};

/// Progress bar observer - Shows training progress and the latest average
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, _algorithm: TdAlgorithm, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        pb.set_message("reward-per-episode: n/a");
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, _reward: f64) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
        }
        Ok(())
    }

    fn on_report(&mut self, point: &ReportPoint) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("reward-per-episode: {:.4}", point.average_reward));
        }
        Ok(())
    }

    fn on_training_end(&mut self, result: &TrainingResult) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            match result.final_average() {
                Some(avg) => pb.finish_with_message(format!("reward-per-episode: {avg:.4}")),
                None => pb.finish(),
            }
        }
        Ok(())
    }
}

/// Log observer - Emits one `info` line per report
#[derive(Debug, Default)]
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for LogObserver {
    fn on_report(&mut self, point: &ReportPoint) -> Result<()> {
        log::info!(
            "episode: {}, reward-per-episode: {}",
            point.episode,
            point.average_reward
        );
        Ok(())
    }
}

/// JSONL observer - Writes each report point as one JSON line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_report(&mut self, point: &ReportPoint) -> Result<()> {
        serde_json::to_writer(&mut self.writer, point)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
