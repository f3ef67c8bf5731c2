//! Training pipeline for two self-playing tables

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{episode::run_episode, evaluation::reward_per_episode};
use crate::{
    Error, Result,
    ports::Observer,
    q_learning::{ActionValueFunc, LearningParams, TdAlgorithm},
    tictactoe::Player,
};

/// Training configuration
#[derive(Debug, Clone, Serialize)]
pub struct TrainingConfig {
    /// Learning rate, discount and exploration
    #[serde(flatten)]
    pub params: LearningParams,

    /// Number of self-play episodes
    pub episodes: usize,

    /// Episodes per reward-per-episode report
    pub report_interval: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            params: LearningParams::default(),
            episodes: 400_000,
            report_interval: 1_000,
            seed: None,
        }
    }
}

impl TrainingConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_report_interval(mut self, report_interval: usize) -> Self {
        self.report_interval = report_interval;
        self
    }

    pub fn with_params(mut self, params: LearningParams) -> Self {
        self.params = params;
        self
    }

    /// Reject parameters outside their valid ranges
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        if self.report_interval == 0 {
            return Err(Error::InvalidConfiguration {
                message: "report interval must be at least 1 episode".to_string(),
            });
        }
        Ok(())
    }
}

/// Average reward-per-episode over one completed reporting window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportPoint {
    /// Episodes completed when the report was emitted
    pub episode: usize,
    /// Mean of the Circle table's reward-per-episode over the window
    pub average_reward: f64,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingResult {
    pub algorithm: TdAlgorithm,

    pub config: TrainingConfig,

    /// Episodes played
    pub episodes: usize,

    /// States recorded in the Circle table
    pub circle_states: usize,

    /// States recorded in the Cross table
    pub cross_states: usize,

    /// One entry per completed reporting window
    pub reports: Vec<ReportPoint>,
}

impl TrainingResult {
    /// Average of the last completed window, if any
    pub fn final_average(&self) -> Option<f64> {
        self.reports.last().map(|point| point.average_reward)
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Self-play training loop for a Circle table and a Cross table
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Train both tables in place, drawing randomness from the configured seed
    pub fn run(
        &mut self,
        algorithm: TdAlgorithm,
        circle: &mut ActionValueFunc,
        cross: &mut ActionValueFunc,
    ) -> Result<TrainingResult> {
        let mut rng = build_rng(self.config.seed);
        self.run_with_rng(algorithm, circle, cross, &mut rng)
    }

    /// Train both tables in place using the supplied random source
    ///
    /// Each episode flips a coin for the opening table, plays one self-play
    /// game, then plays one greedy evaluation game for the Circle table.
    /// Whenever `report_interval` episodes have completed, the mean
    /// evaluation reward over that window is reported and the accumulator
    /// reset.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &mut self,
        algorithm: TdAlgorithm,
        circle: &mut ActionValueFunc,
        cross: &mut ActionValueFunc,
        rng: &mut R,
    ) -> Result<TrainingResult> {
        self.config.validate()?;
        if circle.player() != Player::Circle || cross.player() != Player::Cross {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "expected a Circle and a Cross table, got '{}' and '{}'",
                    circle.player(),
                    cross.player()
                ),
            });
        }

        let params = self.config.params;
        let interval = self.config.report_interval;

        log::info!(
            "training {} tables for {} episodes (alpha={}, gamma={}, epsilon={})",
            algorithm,
            self.config.episodes,
            params.alpha,
            params.gamma,
            params.epsilon
        );
        for observer in &mut self.observers {
            observer.on_training_start(algorithm, self.config.episodes)?;
        }

        let mut reports = Vec::with_capacity(self.config.episodes / interval);
        let mut window_reward = 0.0;

        for episode in 0..self.config.episodes {
            if rng.random_bool(0.5) {
                run_episode(algorithm, circle, cross, &params, rng)?;
            } else {
                run_episode(algorithm, cross, circle, &params, rng)?;
            }

            let reward = reward_per_episode(circle, params.gamma, rng)?;
            window_reward += reward;
            for observer in &mut self.observers {
                observer.on_episode_end(episode, reward)?;
            }

            let completed = episode + 1;
            if completed.is_multiple_of(interval) {
                let point = ReportPoint {
                    episode: completed,
                    average_reward: window_reward / interval as f64,
                };
                window_reward = 0.0;
                for observer in &mut self.observers {
                    observer.on_report(&point)?;
                }
                reports.push(point);
            }
        }

        let result = TrainingResult {
            algorithm,
            config: self.config.clone(),
            episodes: self.config.episodes,
            circle_states: circle.len(),
            cross_states: cross.len(),
            reports,
        };

        for observer in &mut self.observers {
            observer.on_training_end(&result)?;
        }
        log::info!(
            "training finished: {} circle states, {} cross states",
            result.circle_states,
            result.cross_states
        );

        Ok(result)
    }
}

/// Train `circle` and `cross` with the default configuration and no observers
pub fn run(
    algorithm: TdAlgorithm,
    circle: &mut ActionValueFunc,
    cross: &mut ActionValueFunc,
) -> Result<TrainingResult> {
    TrainingPipeline::new(TrainingConfig::default()).run(algorithm, circle, cross)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl Observer for Recorder {
        fn on_training_start(&mut self, algorithm: TdAlgorithm, total: usize) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {algorithm} {total}"));
            Ok(())
        }

        fn on_report(&mut self, point: &ReportPoint) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("report {}", point.episode));
            Ok(())
        }

        fn on_training_end(&mut self, result: &TrainingResult) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("end {}", result.episodes));
            Ok(())
        }
    }

    fn tables() -> (ActionValueFunc, ActionValueFunc) {
        (
            ActionValueFunc::new(Player::Circle).unwrap(),
            ActionValueFunc::new(Player::Cross).unwrap(),
        )
    }

    #[test]
    fn test_training_pipeline() {
        let config = TrainingConfig::default()
            .with_episodes(250)
            .with_report_interval(100)
            .with_seed(42);
        let (mut circle, mut cross) = tables();

        let mut pipeline = TrainingPipeline::new(config);
        let result = pipeline
            .run(TdAlgorithm::QLearning, &mut circle, &mut cross)
            .unwrap();

        assert_eq!(result.episodes, 250);
        assert_eq!(
            result.reports.iter().map(|p| p.episode).collect::<Vec<_>>(),
            vec![100, 200]
        );
        assert!(result.circle_states > 0 && result.cross_states > 0);
        assert_eq!(result.circle_states, circle.len());
    }

    #[test]
    fn test_observer_event_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorder = Recorder {
            events: Arc::clone(&events),
        };
        let config = TrainingConfig::default()
            .with_episodes(4)
            .with_report_interval(2)
            .with_seed(1);
        let (mut circle, mut cross) = tables();

        TrainingPipeline::new(config)
            .with_observer(Box::new(recorder))
            .run(TdAlgorithm::Sarsa, &mut circle, &mut cross)
            .unwrap();

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec!["start SARSA 4", "report 2", "report 4", "end 4"]
        );
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = TrainingConfig::default()
            .with_episodes(300)
            .with_report_interval(50)
            .with_seed(7);

        let (mut circle_a, mut cross_a) = tables();
        let a = TrainingPipeline::new(config.clone())
            .run(TdAlgorithm::Sarsa, &mut circle_a, &mut cross_a)
            .unwrap();
        let (mut circle_b, mut cross_b) = tables();
        let b = TrainingPipeline::new(config)
            .run(TdAlgorithm::Sarsa, &mut circle_b, &mut cross_b)
            .unwrap();

        assert_eq!(a.reports, b.reports);
        assert_eq!(a.circle_states, b.circle_states);
        assert_eq!(a.cross_states, b.cross_states);
    }

    #[test]
    fn test_rejects_swapped_tables() {
        let (mut circle, mut cross) = tables();
        let result = TrainingPipeline::new(TrainingConfig::default().with_episodes(1))
            .run(TdAlgorithm::QLearning, &mut cross, &mut circle);
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_rejects_zero_report_interval() {
        let (mut circle, mut cross) = tables();
        let config = TrainingConfig::default()
            .with_episodes(1)
            .with_report_interval(0);
        let result =
            TrainingPipeline::new(config).run(TdAlgorithm::QLearning, &mut circle, &mut cross);
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }
}
