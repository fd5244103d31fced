//! End-to-end tests driving the `sf` shell through piped stdin.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn sf_binary() -> String {
    env!("CARGO_BIN_EXE_sf").to_string()
}

/// Runs `sf` with `args`, feeding `input` as the shell's stdin.
///
/// HOME and XDG_CONFIG_HOME point into `temp` so no user config is read.
fn run_shell(temp: &TempDir, args: &[&str], input: &str) -> Output {
    let mut child = Command::new(sf_binary())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env_remove("SF_SEED_DEMO")
        .env_remove("SF_WATCH_INTERVAL_MS")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn sf");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().expect("failed to wait for sf")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_manual_sessions_and_summary() {
    let temp = TempDir::new().unwrap();
    let output = run_shell(
        &temp,
        &[],
        "add Math Review 30\nadd \"Organic Chemistry\" Mechanisms 90 --date yesterday\nlist\nsummary\nexit\n",
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Session added: 30m for Math"));
    assert!(text.contains("Session added: 1h 30m for Organic Chemistry"));
    assert!(text.contains("SESSION HISTORY"));
    assert!(text.contains("Total: 2 sessions, 2h 0m"));
    assert!(text.contains("Today:          30m"));
    assert!(text.contains("This week:      2h 0m"));
    assert!(text.contains("Subjects:       Organic Chemistry, Math"));
    assert!(text.contains("Goodbye!"));
}

#[test]
fn test_timer_under_a_minute_is_not_recorded() {
    let temp = TempDir::new().unwrap();
    let output = run_shell(
        &temp,
        &[],
        "start Chemistry Lab\nstatus\npause\nresume\nstop\nsummary\nquit\n",
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Timer started: Chemistry - Lab"));
    assert!(text.contains("Chemistry - Lab (running)"));
    assert!(text.contains("Timer paused at"));
    assert!(text.contains("Timer resumed at"));
    assert!(text.contains("Sessions under a minute are not recorded."));
    assert!(text.contains("Total sessions: 0"));
}

#[test]
fn test_command_errors_keep_the_shell_running() {
    let temp = TempDir::new().unwrap();
    let output = run_shell(
        &temp,
        &[],
        "pause\nadd Math Review 0\nstart Math Review\nstart Physics Theory\nstatus\n",
    );

    // End of input leaves the shell cleanly.
    assert!(output.status.success());
    let errors = stderr(&output);
    assert!(errors.contains("error: no running timer to pause"));
    assert!(errors.contains("error: duration must be greater than 0 minutes, got 0"));
    assert!(errors.contains("error: a timer is already running for Math"));
    assert!(stdout(&output).contains("Math - Review (running)"));
}

#[test]
fn test_demo_flag_seeds_history() {
    let temp = TempDir::new().unwrap();
    let output = run_shell(&temp, &["--demo"], "summary\nsubjects\nexit\n");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Today:          3h 30m"));
    assert!(text.contains("Total sessions: 4"));
    assert!(text.contains("Calculus II\nChemistry\nPsychology\nStatistics\n"));
}

#[test]
fn test_config_file_presets() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("sf.toml");
    std::fs::write(
        &config,
        "[[quick_start]]\nsubject = \"Biology\"\nactivity = \"Flashcards\"\n",
    )
    .unwrap();
    let config = config.to_str().unwrap();

    let output = run_shell(&temp, &["--config", config, "presets"], "");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "1. Biology - Flashcards\n");

    let output = run_shell(&temp, &["--config", config], "start --preset 1\nexit\n");
    assert!(stdout(&output).contains("Timer started: Biology - Flashcards"));
}
