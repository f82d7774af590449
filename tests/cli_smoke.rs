//! CLI parsing and end-to-end command runs on tiny budgets.

use std::io::Cursor;

use clap::Parser;
use tempfile::TempDir;
use tictactoe_rl::{
    app::{App, RunConfig},
    cli::{
        Cli,
        commands::{evaluate::evaluate_models, play, train::train_all},
    },
    q_learning::Algorithm,
};

fn tiny_config(models_dir: &std::path::Path) -> RunConfig {
    RunConfig {
        iterations: 60,
        eval_frequency: 30,
        eval_games: 10,
        benchmark_games: 4,
        models_dir: models_dir.to_path_buf(),
        seed: Some(17),
        ..RunConfig::default()
    }
}

#[test]
fn test_parse_command_flags() {
    let cli = Cli::parse_from(["tictactoe-rl", "--evaluate", "--play", "--benchmark-games", "10"]);
    assert!(cli.evaluate && cli.play);
    assert!(!cli.train && !cli.compare);
    assert_eq!(cli.run_config().unwrap().benchmark_games, 10);
}

#[test]
fn test_config_file_with_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("run.json");
    std::fs::write(&path, r#"{"iterations": 500, "agent": {"alpha": 0.2}}"#).unwrap();

    let cli = Cli::parse_from([
        "tictactoe-rl",
        "--train",
        "--config",
        path.to_str().unwrap(),
        "--compare-blocks",
        "2",
    ]);
    let config = cli.run_config().unwrap();
    assert_eq!(config.iterations, 500);
    assert_eq!(config.agent.alpha, 0.2);
    assert_eq!(config.agent.discount, 0.99);
    assert_eq!(config.compare_blocks, 2);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let cli = Cli::parse_from(["tictactoe-rl", "--train", "--config", "/nonexistent/run.json"]);
    assert!(cli.run_config().is_err());
}

#[test]
fn test_train_then_evaluate() {
    let temp_dir = TempDir::new().unwrap();
    let config = tiny_config(temp_dir.path());
    let app = App::from_config(&config);

    let reports = train_all(&app, &config, false).unwrap();
    assert_eq!(reports.len(), 3);
    for (algorithm, report) in &reports {
        assert_eq!(report.checkpoints.len(), 2, "{algorithm}");
        let file = temp_dir.path().join(format!("{}.json", algorithm.file_stem()));
        assert!(file.exists(), "{} missing", file.display());
    }

    let evaluations = evaluate_models(&app, &config).unwrap();
    let algorithms: Vec<Algorithm> = evaluations.iter().map(|e| e.algorithm).collect();
    assert_eq!(algorithms, Algorithm::ALL.to_vec());
    for evaluation in evaluations {
        assert!(evaluation.loaded);
        assert_eq!(evaluation.vs_random.total_games, 4);
        assert_eq!(evaluation.vs_minimax.total_games, 4);
    }
}

#[test]
fn test_evaluate_without_models_uses_empty_policies() {
    let temp_dir = TempDir::new().unwrap();
    let config = tiny_config(temp_dir.path());
    let app = App::from_config(&config);

    let evaluations = evaluate_models(&app, &config).unwrap();
    assert!(evaluations.iter().all(|e| !e.loaded));
}

#[test]
fn test_play_one_game_then_quit() {
    let temp_dir = TempDir::new().unwrap();
    let config = tiny_config(temp_dir.path());
    let app = App::from_config(&config);

    // Minimax, then offer every cell until the game ends, then decline.
    let mut script = String::from("2\n");
    script.push_str(&"1\n2\n3\n4\n5\n6\n7\n8\n9\n".repeat(5));
    let mut input = Cursor::new(script);
    let mut output = Vec::new();
    play::execute(&app, &mut input, &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Playing against Minimax agent"));
    assert!(text.contains("Play another game? (y/n): "));
    assert!(text.ends_with("Thanks for playing!\n"));
}
