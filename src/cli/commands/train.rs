//! Train command - Self-play training followed by interactive games

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Error,
    cli::output::{format_number, print_kv, print_section},
    game::{play_game, prompt_session},
    pipeline::{
        JsonlObserver, LogObserver, ProgressObserver, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    q_learning::{ActionValueFunc, LearningParams, TdAlgorithm},
    tictactoe::Player,
};

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "tictactoe-td",
    version,
    about = "Train two tic-tac-toe agents by self-play, then play against them"
)]
pub struct TrainArgs {
    /// Training algorithm
    #[arg(long, value_enum, default_value_t = TdAlgorithm::QLearning)]
    pub algo: TdAlgorithm,

    /// Number of self-play episodes
    #[arg(long, short = 'e', default_value_t = 400_000)]
    pub episodes: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Discount factor
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Exploration probability for epsilon-greedy selection
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Episodes per reward-per-episode report
    #[arg(long, default_value_t = 1_000)]
    pub report_interval: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional JSONL file receiving one line per report
    #[arg(long)]
    pub report_log: Option<PathBuf>,

    /// Log each report instead of showing a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Exit after training instead of starting interactive games
    #[arg(long)]
    pub no_play: bool,
}

impl TrainArgs {
    pub fn training_config(&self) -> TrainingConfig {
        let params = LearningParams {
            alpha: self.alpha,
            gamma: self.gamma,
            epsilon: self.epsilon,
        };
        let config = TrainingConfig::default()
            .with_params(params)
            .with_episodes(self.episodes)
            .with_report_interval(self.report_interval);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.training_config();
    config.validate().context("Invalid training parameters")?;

    print_section(&format!("Training using {} algorithm", args.algo));

    let mut circle = ActionValueFunc::new(Player::Circle)?;
    let mut cross = ActionValueFunc::new(Player::Cross)?;

    let mut pipeline = TrainingPipeline::new(config);
    if args.no_progress {
        pipeline = pipeline.with_observer(Box::new(LogObserver::new()));
    } else {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.report_log {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create report log: {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let result = pipeline
        .run(args.algo, &mut circle, &mut cross)
        .context("Training failed")?;

    print_summary(&result);

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        result
            .save(&path)
            .with_context(|| format!("Failed to write summary: {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    if args.no_play {
        return Ok(());
    }

    println!("Training completed, game starting...");
    play_sessions(&circle, &cross, args.seed)
}

fn print_summary(result: &TrainingResult) {
    print_section("Training summary");
    print_kv("Algorithm", &result.algorithm.to_string());
    print_kv("Episodes", &format_number(result.episodes));
    print_kv("Circle states", &format_number(result.circle_states));
    print_kv("Cross states", &format_number(result.cross_states));
    if let Some(avg) = result.final_average() {
        print_kv("Reward/episode", &format!("{avg:.4}"));
    }
}

/// Play games on stdin/stdout until input closes
fn play_sessions(circle: &ActionValueFunc, cross: &ActionValueFunc, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    loop {
        let session = match prompt_session(&mut input, &mut output, &mut rng) {
            Ok(session) => session,
            Err(Error::InputClosed) => break,
            Err(err) => return Err(err.into()),
        };
        let opponent = match session.user {
            Player::Cross => circle,
            _ => cross,
        };

        match play_game(session, opponent, &mut input, &mut output, &mut rng) {
            Ok(_) => {}
            Err(Error::InputClosed) => break,
            Err(err) => return Err(err.into()),
        }
    }

    writeln!(output)?;
    Ok(())
}
