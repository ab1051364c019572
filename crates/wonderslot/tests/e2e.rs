//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn wonderslot() -> Command {
    let mut cmd = Command::cargo_bin("wonderslot").expect("binary not found");
    cmd.env_remove("WONDERSLOT_SEED").env_remove("WONDERSLOT_LANG");
    cmd
}

fn headless_stdout(args: &[&str]) -> String {
    let output = wonderslot()
        .arg("--headless")
        .args(args)
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    String::from_utf8(output.stdout).expect("stdout is utf-8")
}

#[test]
fn help_flag() {
    wonderslot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("slot machine"))
        .stdout(predicate::str::contains("--headless"));
}

#[test]
fn version_flag() {
    wonderslot()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wonderslot"));
}

#[test]
fn completion_bash() {
    wonderslot()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wonderslot"));
}

#[test]
fn headless_plays_until_game_over() {
    let stdout = headless_stdout(&["--seed", "42"]);
    let last = stdout.lines().last().expect("summary line");
    assert!(last.starts_with("spins: "));
    assert!(last.ends_with("You lost"));
}

#[test]
fn headless_seed_is_reproducible() {
    let first = headless_stdout(&["--seed", "1234"]);
    let second = headless_stdout(&["--seed", "1234"]);
    assert_eq!(first, second);
}

#[test]
fn seed_from_environment() {
    let flag = headless_stdout(&["--seed", "99", "--max-spins", "3"]);
    let output = wonderslot()
        .env("WONDERSLOT_SEED", "99")
        .args(["--headless", "--max-spins", "3"])
        .output()
        .expect("failed to run");
    assert_eq!(String::from_utf8(output.stdout).unwrap(), flag);
}

#[test]
fn max_spins_limits_session() {
    let stdout = headless_stdout(&["--seed", "5", "--max-spins", "2"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("#1"));
    assert!(lines[1].starts_with("#2"));
    assert!(lines[2].starts_with("spins: 2"));
}

#[test]
fn headless_json_lines() {
    let stdout = headless_stdout(&["--seed", "8", "--max-spins", "4", "--json"]);
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid json"))
        .collect();
    assert_eq!(records.len(), 5);

    for record in &records[..4] {
        assert_eq!(record["event"], "spin");
        for digit in record["targets"].as_array().unwrap() {
            let d = digit.as_u64().unwrap();
            assert!((1..=9).contains(&d));
        }
    }
    let summary = &records[4];
    assert_eq!(summary["event"], "summary");
    assert_eq!(summary["spins"], 4);
    assert_eq!(summary["final_balance"], records[3]["balance_after"]);
}

#[test]
fn headless_russian() {
    wonderslot()
        .args(["--headless", "--seed", "3", "--lang", "ru"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Баланс"))
        .stdout(predicate::str::contains("Вы проиграли"));
}

#[test]
fn invalid_settle_delay_exits_with_config_code() {
    wonderslot()
        .args(["--headless", "--settle-delay", "whenever"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("settle-delay"));
}

#[test]
fn zero_reel_tick_rejected() {
    wonderslot()
        .args(["--headless", "--reel-tick", "0"])
        .assert()
        .code(4);
}

#[test]
fn unknown_language_rejected() {
    wonderslot()
        .args(["--headless", "--lang", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fr"));
}

#[test]
fn log_file_receives_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wonderslot.log");
    wonderslot()
        .env("RUST_LOG", "wonderslot_core=info")
        .args(["--headless", "--seed", "11", "--max-spins", "1", "--log-file"])
        .arg(&path)
        .assert()
        .success();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("spin"));
}

#[test]
fn long_settle_delay_with_fast_ticks_finishes() {
    let stdout = headless_stdout(&[
        "--seed",
        "1",
        "--settle-delay",
        "10h",
        "--reel-tick",
        "1ms",
        "--max-spins",
        "2",
    ]);
    assert!(stdout.lines().last().unwrap().starts_with("spins: 2"));
}
