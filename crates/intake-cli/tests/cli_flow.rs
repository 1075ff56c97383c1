use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_intake"))
}

fn temp_xdg_dirs(prefix: &str) -> (PathBuf, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    let base = std::env::temp_dir().join(format!("{}_{}_{}", prefix, std::process::id(), nanos));
    let config = base.join("config");
    let data = base.join("data");
    std::fs::create_dir_all(&config).expect("create config dir");
    std::fs::create_dir_all(&data).expect("create data dir");
    (config, data)
}

/// A command isolated from the caller's environment.
fn intake(config_home: &Path, data_home: &Path) -> Command {
    let mut cmd = Command::new(bin());
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("XDG_DATA_HOME", data_home)
        .env("TERM", "dumb")
        .env("NO_COLOR", "1")
        .env_remove("INTAKE_PATH")
        .env_remove("INTAKE_CONFIG")
        .env_remove("INTAKE_LOG");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("run intake")
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{} failed: stdout={}, stderr={}",
        what,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_ledger(config_home: &Path, data_home: &Path) -> PathBuf {
    let init = run(intake(config_home, data_home)
        .arg("init")
        .arg("--timezone")
        .arg("UTC"));
    assert_success(&init, "init");
    data_home.join("intake").join("intake.db")
}

fn add(config_home: &Path, data_home: &Path, calories: &str) -> Output {
    run(intake(config_home, data_home).arg("add").arg(calories))
}

fn listed_calories(config_home: &Path, data_home: &Path, extra: &[&str]) -> Vec<i64> {
    let list = run(intake(config_home, data_home)
        .arg("list")
        .arg("--json")
        .args(extra));
    assert_success(&list, "list");
    let value: serde_json::Value = serde_json::from_slice(&list.stdout).expect("parse list json");
    value
        .as_array()
        .expect("list output array")
        .iter()
        .map(|record| record["calories"].as_i64().expect("calories"))
        .collect()
}

#[test]
fn test_cli_init_add_list() {
    let (config_home, data_home) = temp_xdg_dirs("intake_flow");
    let ledger_path = init_ledger(&config_home, &data_home);
    assert!(ledger_path.exists(), "ledger file should exist");

    let config = std::fs::read_to_string(config_home.join("intake").join("config.toml"))
        .expect("read config");
    assert!(config.contains("[ledger]"));
    assert!(config.contains("timezone = \"UTC\""));

    for calories in ["500", "300", "700"] {
        assert_success(&add(&config_home, &data_home, calories), "add");
    }

    assert_eq!(
        listed_calories(&config_home, &data_home, &[]),
        vec![500, 300, 700]
    );

    let list = run(intake(&config_home, &data_home).arg("list").arg("--json"));
    let value: serde_json::Value = serde_json::from_slice(&list.stdout).expect("parse list json");
    let stamps: Vec<&str> = value
        .as_array()
        .expect("array")
        .iter()
        .map(|record| record["timestamp"].as_str().expect("timestamp"))
        .collect();
    let mut sorted = stamps.clone();
    sorted.sort();
    assert_eq!(stamps, sorted);
}

#[test]
fn test_cli_add_receipt_plain() {
    let (config_home, data_home) = temp_xdg_dirs("intake_receipt");
    init_ledger(&config_home, &data_home);

    let added = add(&config_home, &data_home, "450");
    assert_success(&added, "add");
    let stdout = String::from_utf8_lossy(&added.stdout);
    assert!(stdout.contains("status=ok"));
    assert!(stdout.contains("calories=450"));
    assert!(stdout.contains("records=1"));
}

#[test]
fn test_cli_lenient_text_logs_zero() {
    let (config_home, data_home) = temp_xdg_dirs("intake_lenient");
    init_ledger(&config_home, &data_home);

    let added = add(&config_home, &data_home, "abc");
    assert_success(&added, "add abc");
    assert!(String::from_utf8_lossy(&added.stderr).contains("not a whole number"));

    assert_eq!(listed_calories(&config_home, &data_home, &[]), vec![0]);
}

#[test]
fn test_cli_strict_rejects_text() {
    let (config_home, data_home) = temp_xdg_dirs("intake_strict");
    init_ledger(&config_home, &data_home);

    let added = run(intake(&config_home, &data_home)
        .arg("add")
        .arg("abc")
        .arg("--strict"));
    assert_eq!(added.status.code(), Some(4));
    assert!(listed_calories(&config_home, &data_home, &[]).is_empty());
}

#[test]
fn test_cli_add_negative_amount() {
    let (config_home, data_home) = temp_xdg_dirs("intake_negative");
    init_ledger(&config_home, &data_home);

    assert_success(&add(&config_home, &data_home, "-50"), "add -50");
    assert_eq!(listed_calories(&config_home, &data_home, &[]), vec![-50]);
}

#[test]
fn test_cli_add_reads_piped_stdin() {
    let (config_home, data_home) = temp_xdg_dirs("intake_stdin");
    init_ledger(&config_home, &data_home);

    let mut child = intake(&config_home, &data_home)
        .arg("add")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn add");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"250\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait add");
    assert_success(&output, "add from stdin");

    assert_eq!(listed_calories(&config_home, &data_home, &[]), vec![250]);
}

#[test]
fn test_cli_list_limit_keeps_most_recent() {
    let (config_home, data_home) = temp_xdg_dirs("intake_limit");
    init_ledger(&config_home, &data_home);
    for calories in ["500", "300", "700"] {
        assert_success(&add(&config_home, &data_home, calories), "add");
    }

    assert_eq!(
        listed_calories(&config_home, &data_home, &["--limit", "2"]),
        vec![300, 700]
    );
}

#[test]
fn test_cli_list_rejects_zero_limit() {
    let (config_home, data_home) = temp_xdg_dirs("intake_limit_zero");
    init_ledger(&config_home, &data_home);
    assert_success(&add(&config_home, &data_home, "500"), "add");

    let list = run(intake(&config_home, &data_home)
        .arg("list")
        .arg("--limit")
        .arg("0"));
    assert_eq!(list.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&list.stderr);
    assert!(stderr.contains("--limit must be at least 1"), "stderr: {}", stderr);
    assert!(!String::from_utf8_lossy(&list.stdout).contains("No intakes logged yet"));
}

#[test]
fn test_cli_list_total_beyond_i64() {
    let (config_home, data_home) = temp_xdg_dirs("intake_big_total");
    init_ledger(&config_home, &data_home);
    assert_success(
        &add(&config_home, &data_home, "9223372036854775807"),
        "add max",
    );
    assert_success(&add(&config_home, &data_home, "1"), "add one");

    let list = run(intake(&config_home, &data_home)
        .arg("list")
        .arg("--format")
        .arg("table"));
    assert_success(&list, "list table");
    let stdout = String::from_utf8_lossy(&list.stdout);
    assert!(
        stdout.contains("Total: 9,223,372,036,854,775,808"),
        "stdout: {}",
        stdout
    );
}

#[test]
fn test_cli_list_plain_lines() {
    let (config_home, data_home) = temp_xdg_dirs("intake_plain");
    init_ledger(&config_home, &data_home);
    assert_success(&add(&config_home, &data_home, "1250"), "add");

    let list = run(intake(&config_home, &data_home)
        .arg("list")
        .arg("--format")
        .arg("plain"));
    assert_success(&list, "list plain");
    let stdout = String::from_utf8_lossy(&list.stdout);
    assert!(stdout.starts_with("Calories: 1250  "));
}

#[test]
fn test_cli_chart_json_and_ascii() {
    let (config_home, data_home) = temp_xdg_dirs("intake_chart");
    init_ledger(&config_home, &data_home);
    for calories in ["500", "300", "700"] {
        assert_success(&add(&config_home, &data_home, calories), "add");
    }

    let chart = run(intake(&config_home, &data_home).arg("chart").arg("--json"));
    assert_success(&chart, "chart json");
    let value: serde_json::Value = serde_json::from_slice(&chart.stdout).expect("parse chart");
    assert_eq!(value["series"], serde_json::json!([500.0, 300.0, 700.0]));
    assert_eq!(value["count"], 3);

    let chart = run(intake(&config_home, &data_home)
        .arg("chart")
        .arg("--ascii")
        .args(["--width", "3", "--height", "7"]));
    assert_success(&chart, "chart ascii");
    let stdout = String::from_utf8_lossy(&chart.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "700 |  #");
    assert_eq!(lines[7], "    +---");
}

#[test]
fn test_cli_chart_rejects_tiny_size() {
    let (config_home, data_home) = temp_xdg_dirs("intake_chart_size");
    init_ledger(&config_home, &data_home);

    let chart = run(intake(&config_home, &data_home)
        .arg("chart")
        .args(["--width", "1"]));
    assert_eq!(chart.status.code(), Some(4));
}

#[test]
fn test_cli_add_with_chart_redraws() {
    let (config_home, data_home) = temp_xdg_dirs("intake_add_chart");
    init_ledger(&config_home, &data_home);
    assert_success(&add(&config_home, &data_home, "400"), "add");

    let added = run(intake(&config_home, &data_home)
        .arg("add")
        .arg("600")
        .arg("--chart"));
    assert_success(&added, "add --chart");
    let stdout = String::from_utf8_lossy(&added.stdout);
    assert!(stdout.contains("records=2"));
    assert!(stdout.lines().any(|line| line.starts_with("600 |")));
    assert!(stdout.lines().any(|line| line.trim_start().starts_with("+---")));
}

#[test]
fn test_cli_check_ok_and_failure() {
    let (config_home, data_home) = temp_xdg_dirs("intake_check");
    let ledger_path = init_ledger(&config_home, &data_home);
    assert_success(&add(&config_home, &data_home, "500"), "add");
    assert_success(&add(&config_home, &data_home, "300"), "add");

    let check = run(intake(&config_home, &data_home).arg("check"));
    assert_success(&check, "check");
    assert!(String::from_utf8_lossy(&check.stdout).contains("Integrity check passed"));

    let conn = Connection::open(&ledger_path).expect("open sqlite");
    conn.execute(
        "UPDATE intake_records SET recorded_at = '1999-01-01T00:00:00.000000Z' WHERE seq = (SELECT MAX(seq) FROM intake_records)",
        [],
    )
    .expect("rewrite timestamp");
    drop(conn);

    let check = run(intake(&config_home, &data_home).arg("check"));
    assert_eq!(check.status.code(), Some(6));
    assert!(String::from_utf8_lossy(&check.stderr).contains("older than the record before it"));
}

#[test]
fn test_cli_backup_copies_records() {
    let (config_home, data_home) = temp_xdg_dirs("intake_backup");
    init_ledger(&config_home, &data_home);
    assert_success(&add(&config_home, &data_home, "500"), "add");
    assert_success(&add(&config_home, &data_home, "300"), "add");

    let destination = data_home.join("backups").join("copy.db");
    let backup = run(intake(&config_home, &data_home)
        .arg("backup")
        .arg(&destination));
    assert_success(&backup, "backup");
    assert!(destination.exists());

    let destination = destination.to_string_lossy().to_string();
    assert_eq!(
        listed_calories(&config_home, &data_home, &["--ledger", &destination]),
        vec![500, 300]
    );
}

#[test]
fn test_cli_missing_config_message() {
    let (config_home, data_home) = temp_xdg_dirs("intake_missing_config");

    let list = run(intake(&config_home, &data_home).arg("list"));
    assert_eq!(list.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&list.stderr);
    assert!(stderr.contains("No config found"));
    assert!(stderr.contains("intake init"));
}

#[test]
fn test_cli_missing_ledger_file() {
    let (config_home, data_home) = temp_xdg_dirs("intake_missing_ledger");
    let missing = data_home.join("nope.db");

    let add = run(intake(&config_home, &data_home)
        .arg("add")
        .arg("100")
        .arg("--ledger")
        .arg(&missing));
    assert_eq!(add.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&add.stderr).contains("No ledger found"));
    assert!(!missing.exists(), "open must not create the file");
}

#[test]
fn test_cli_init_refuses_to_overwrite() {
    let (config_home, data_home) = temp_xdg_dirs("intake_reinit");
    init_ledger(&config_home, &data_home);
    assert_success(&add(&config_home, &data_home, "500"), "add");

    let again = run(intake(&config_home, &data_home).arg("init"));
    assert_eq!(again.status.code(), Some(4));

    let forced = run(intake(&config_home, &data_home).arg("init").arg("--force"));
    assert_success(&forced, "init --force");
    assert_eq!(listed_calories(&config_home, &data_home, &[]), vec![500]);
}

#[test]
fn test_cli_invalid_timezone() {
    let (config_home, data_home) = temp_xdg_dirs("intake_bad_tz");

    let init = run(intake(&config_home, &data_home)
        .arg("init")
        .arg("--timezone")
        .arg("Mars/Olympus"));
    assert_eq!(init.status.code(), Some(4));
}
