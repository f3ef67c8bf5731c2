use clap::Parser;
use tempfile::tempdir;
use tictactoe_td::cli::commands::train::{TrainArgs, execute};

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn summary_without_extension_appends_json() {
    let tmp = tempdir().unwrap();
    let summary_stem = tmp.path().join("run_overview");

    let args = parse_args([
        "tictactoe-td",
        "--algo",
        "sarsa",
        "--episodes",
        "40",
        "--report-interval",
        "10",
        "--seed",
        "5",
        "--summary",
        summary_stem.to_str().unwrap(),
        "--no-progress",
        "--no-play",
    ]);

    execute(args).expect("training with summary should succeed");

    let expected_path = summary_stem.with_extension("json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["episodes"], 40);
    assert_eq!(parsed["algorithm"], "sarsa");
    assert_eq!(parsed["config"]["alpha"], 0.1);
    assert_eq!(parsed["reports"].as_array().unwrap().len(), 4);
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}/", summary_dir.display());

    let args = parse_args([
        "tictactoe-td",
        "--episodes",
        "3",
        "--report-interval",
        "1",
        "--summary",
        &summary_arg,
        "--no-progress",
        "--no-play",
    ]);

    execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );

    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["episodes"], 3);
    assert_eq!(parsed["algorithm"], "q_learning");
}

#[test]
fn report_log_receives_one_line_per_window() {
    let tmp = tempdir().unwrap();
    let log_path = tmp.path().join("reports.jsonl");

    let args = parse_args([
        "tictactoe-td",
        "--episodes",
        "60",
        "--report-interval",
        "20",
        "--report-log",
        log_path.to_str().unwrap(),
        "--no-progress",
        "--no-play",
    ]);

    execute(args).expect("training with report log should succeed");

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let episodes: Vec<u64> = contents
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["episode"].as_u64().unwrap()
        })
        .collect();
    assert_eq!(episodes, vec![20, 40, 60]);
}

#[test]
fn out_of_range_parameters_are_rejected() {
    let args = parse_args([
        "tictactoe-td",
        "--episodes",
        "1",
        "--alpha",
        "2.0",
        "--no-progress",
        "--no-play",
    ]);

    assert!(execute(args).is_err());
}
