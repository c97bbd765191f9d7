//! Integration tests for the `satsignal` CLI binary.
//!
//! Every test isolates itself from the user's real configuration: config
//! directories point at a nonexistent path and `SATSIGNAL_*` overrides are
//! cleared.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

const ADDRESS: &str = "175tWpb8K1S7NmH4Zx6rewF9WQrcZv245W";

/// Build a [`Command`] for the `satsignal` binary with env isolation.
fn satsignal_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("satsignal");
    cmd.env("HOME", "/tmp/satsignal-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/satsignal-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SATSIGNAL_CONFIG")
        .env_remove("SATSIGNAL_LOCALE")
        .env_remove("SATSIGNAL_DEFAULTS__OUTPUT")
        .env_remove("SATSIGNAL_DEFAULTS__COLOR")
        .env_remove("SATSIGNAL_DEFAULTS__AUTO_ACCEPT")
        .env_remove("SATSIGNAL_WALLET__OPEN")
        .env_remove("SATSIGNAL_WALLET__LABEL");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn transaction_line(sats: u64) -> String {
    format!(
        r#"{{"type":"transaction_seen","payload":{{"transaction_id":"4a5e1e4baab89f3a","amount":{sats}}}}}"#
    )
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = satsignal_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    satsignal_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("correlate")
            .and(predicate::str::contains("uri"))
            .and(predicate::str::contains("messages"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    satsignal_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("satsignal"));
}

#[test]
fn test_invalid_subcommand() {
    satsignal_cmd().arg("frobnicate").assert().code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    satsignal_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("satsignal"));
}

#[test]
fn test_completions_zsh() {
    satsignal_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── uri ─────────────────────────────────────────────────────────────

#[test]
fn test_uri_shows_decoded_fields_and_alert() {
    satsignal_cmd()
        .args(["uri", &format!("bitcoin:{ADDRESS}?amount=0.015&label=Shop")])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(ADDRESS)
                .and(predicate::str::contains("0.015 BTC"))
                .and(predicate::str::contains("Shop"))
                .and(predicate::str::contains("Alert:")),
        );
}

#[test]
fn test_uri_json_output() {
    let output = satsignal_cmd()
        .args(["-o", "json", "uri", &format!("bitcoin:{ADDRESS}?amount=1")])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["uri"]["address"], ADDRESS);
    assert_eq!(value["alert"]["severity"], "pink");
}

#[test]
fn test_uri_without_address_raises_nothing() {
    satsignal_cmd()
        .args(["uri", "bitcoin:?amount=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("none"));
}

#[test]
fn test_uri_rejects_other_schemes() {
    satsignal_cmd()
        .args(["uri", "litecoin:abc"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid payment URI"));
}

// ── messages ────────────────────────────────────────────────────────

#[test]
fn test_messages_plain_lists_keys() {
    satsignal_cmd()
        .args(["-o", "plain", "messages"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("payment_received_alert")
                .and(predicate::str::contains("hardware_failure_alert")),
        );
}

#[test]
fn test_messages_reflect_config_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[messages]\npayment_received_alert = \"Got {0}\"\n",
    )
    .unwrap();

    satsignal_cmd()
        .args(["--config", path.to_str().unwrap(), "-o", "json", "messages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Got {0}"));
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    satsignal_cmd()
        .args(["--config", "/tmp/somewhere/satsignal.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/somewhere/satsignal.toml"));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let path_arg = path.to_str().unwrap();

    satsignal_cmd()
        .args(["--config", path_arg, "config", "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration written"));
    assert!(path.exists());

    satsignal_cmd()
        .args(["--config", path_arg, "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("locale")
                .and(predicate::str::contains("Default wallet")),
        );
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "locale = \"en\"\n").unwrap();
    let path_arg = path.to_str().unwrap();

    satsignal_cmd()
        .args(["--config", path_arg, "config", "init"])
        .assert()
        .code(2);

    satsignal_cmd()
        .args(["--config", path_arg, "config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_missing_config_file_is_a_config_error() {
    satsignal_cmd()
        .args([
            "--config",
            "/tmp/satsignal-cli-test-nonexistent/none.toml",
            "messages",
        ])
        .assert()
        .code(3);
}

// ── correlate ───────────────────────────────────────────────────────

#[test]
fn test_correlate_plain_prints_alert_messages() {
    let input = format!("# received\n{}\n", transaction_line(5_000_000_000));
    satsignal_cmd()
        .args(["-o", "plain", "correlate"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Payment of 50 BTC received"))
        .stderr(predicate::str::contains("1 alert(s) raised"));
}

#[test]
fn test_correlate_links_transactions_to_a_block_explorer() {
    satsignal_cmd()
        .args(["-o", "json-compact", "correlate"])
        .write_stdin(transaction_line(1500))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"lookup\":\"blockchain:/tx/4a5e1e4baab89f3a\"",
        ));
}

#[test]
fn test_correlate_json_with_accepted_actions() {
    let input = format!(
        "bitcoin:{ADDRESS}?amount=0.01\n\
         {{\"type\":\"payment_session\",\"payload\":{{\"status\":\"unverifiable\",\"session\":{{\"memo\":\"Coffee\"}}}}}}\n"
    );
    let output = satsignal_cmd()
        .args(["-o", "json", "correlate", "--accept", "--wallet-open"])
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "correlate failed:\n{}",
        combined_output(&output)
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let alerts = value.as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0]["executed"], true);
    assert_eq!(alerts[1]["executed"], true);

    let notifications: Vec<&str> = alerts[1]["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n.as_str().unwrap())
        .collect();
    assert_eq!(
        notifications,
        [
            "alert_added",
            "remove_alert",
            "wallet_detail_changed",
            "screen:review_payment_request"
        ]
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 payment request(s) stored"), "{stderr}");
}

#[test]
fn test_correlate_reads_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    std::fs::write(
        &path,
        r#"{"type":"hardware_wallet","payload":{"event_type":"SHOW_DEVICE_FAILED"}}"#,
    )
    .unwrap();

    satsignal_cmd()
        .args(["-o", "json-compact", "correlate", "-i", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"severity\":\"red\""));
}

#[test]
fn test_correlate_review_without_wallet_is_internal_error() {
    let input = r#"{"type":"payment_session","payload":{"status":"trusted","session":{"memo":"x"}}}"#;
    satsignal_cmd()
        .args(["correlate", "--accept"])
        .write_stdin(input)
        .assert()
        .code(70)
        .stderr(predicate::str::contains("No wallet is open"));
}

#[test]
fn test_correlate_stray_device_event_is_internal_error() {
    let input = r#"{"type":"hardware_wallet","payload":{"event_type":"SHOW_PIN_ENTRY"}}"#;
    satsignal_cmd()
        .arg("correlate")
        .write_stdin(input)
        .assert()
        .code(70);
}

#[test]
fn test_correlate_bad_line_reports_line_number() {
    let input = format!("{}\n{{oops\n", transaction_line(1500));
    satsignal_cmd()
        .arg("correlate")
        .write_stdin(input)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Line 2"));
}

#[test]
fn test_wallet_label_requires_wallet_open() {
    satsignal_cmd()
        .args(["correlate", "--wallet-label", "Savings"])
        .write_stdin("")
        .assert()
        .code(2);
}
