use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const CARD: &str = "John Smith\njohn@example.com\n+1 415 555 0100\nAcme Corp Inc\n";

fn cmd() -> Command {
    Command::cargo_bin("cardscan").unwrap()
}

/// Command pointed at a config file inside `dir`, so no user config is read.
fn cmd_in(dir: &TempDir) -> Command {
    let config = dir.path().join("config.json");
    if !config.exists() {
        std::fs::write(&config, "{}").unwrap();
    }

    let mut cmd = cmd();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn parse_stdin_json() {
    let dir = tempfile::tempdir().unwrap();

    cmd_in(&dir)
        .arg("parse")
        .write_stdin(CARD)
        .assert()
        .success()
        .stdout(contains("\"phone\": \"+14155550100\""))
        .stdout(contains("\"company\": \"Acme Corp Inc\""));
}

#[test]
fn parse_file_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("card.txt");
    std::fs::write(&input, CARD).unwrap();

    cmd_in(&dir)
        .args(["parse", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("id,created_at,name,email,phone,company"))
        .stdout(contains(",,John Smith,john@example.com,+14155550100,Acme Corp Inc"));
}

#[test]
fn parse_strips_markup() {
    let dir = tempfile::tempdir().unwrap();

    cmd_in(&dir)
        .args(["parse", "--format", "text"])
        .write_stdin("<script>alert(1)</script>\nAcme Ltd\n")
        .assert()
        .success()
        .stdout(contains("scriptalert(1)/script"))
        .stdout(contains("<script>").not());
}

#[test]
fn parse_empty_input_reports_warnings() {
    let dir = tempfile::tempdir().unwrap();

    cmd_in(&dir)
        .args(["parse", "--show-warnings"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("{}"))
        .stderr(contains("Could not extract name"));
}

#[test]
fn parse_save_then_list() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("cards.json");

    cmd_in(&dir)
        .args(["parse", "--save", "--store"])
        .arg(&store)
        .write_stdin(CARD)
        .assert()
        .success()
        .stdout(contains("\"id\": 1"));

    cmd_in(&dir)
        .args(["list", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(contains("Card #1"))
        .stdout(contains("John Smith"));
}

#[test]
fn list_empty_store() {
    let dir = tempfile::tempdir().unwrap();

    cmd_in(&dir)
        .args(["list", "--format", "json", "--store"])
        .arg(dir.path().join("cards.json"))
        .assert()
        .success()
        .stdout(contains("[]"));
}

#[test]
fn config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");

    cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.max_lines", "5"])
        .assert()
        .success();

    cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.max_lines"])
        .assert()
        .success()
        .stdout(contains("5"));
}

#[test]
fn config_get_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .args(["config", "get", "ocr.nope"])
        .assert()
        .failure()
        .stderr(contains("Configuration key not found"));
}

#[test]
fn process_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    cmd_in(&dir)
        .args(["process", "does-not-exist.png", "--no-save"])
        .assert()
        .failure()
        .stderr(contains("Input file not found"));
}

#[test]
fn parse_uses_given_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"extraction": {"max_lines": 1}}"#,
    )
    .unwrap();

    cmd_in(&dir)
        .arg("parse")
        .write_stdin(CARD)
        .assert()
        .success()
        .stdout(contains("John Smith"))
        .stdout(contains("john@example.com").not());
}

#[test]
fn list_uses_store_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("from-config.json");
    std::fs::write(
        dir.path().join("config.json"),
        serde_json::json!({ "storage": { "path": store } }).to_string(),
    )
    .unwrap();

    cmd_in(&dir)
        .args(["parse", "--save"])
        .write_stdin(CARD)
        .assert()
        .success();
    assert!(store.exists());

    cmd_in(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Acme Corp Inc"));
}
