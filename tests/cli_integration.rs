//! Integration tests for the Keyfob CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`. The
//! delete confirmation prompt is interactive, so deletion is always
//! tested with `--force`.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

const USER: &str = "7f5cb5f1-32e7-4fd5-87ca-d366617624f6";
const SERVICE_KEY: &str = "000102030405060708090a0b0c0d0e0f";

/// Helper: get a Command pointing at the keyfob binary.
fn keyfob() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("keyfob").expect("binary should exist")
}

/// Helper: extract the single stdout line of a successful run.
fn stdout_line(assert: assert_cmd::assert::Assert) -> String {
    let output = assert.success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf-8").trim().to_string()
}

#[test]
fn help_flag_shows_usage() {
    keyfob()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Per-service encryption key vault"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn version_flag_shows_version() {
    keyfob()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("keyfob"));
}

#[test]
fn no_args_shows_help() {
    keyfob().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn create_prints_a_hex_key_and_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let vault = tmp.path().join("keyfob.db");
    let vault = vault.to_str().unwrap();

    let first = stdout_line(
        keyfob()
            .args(["create", USER, "contact", "--service-key", SERVICE_KEY, "--vault", vault])
            .assert(),
    );
    assert_eq!(first.len(), 64, "expected 32 bytes of hex");
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));

    // Creating again must return the very same key.
    let second = stdout_line(
        keyfob()
            .args(["create", USER, "contact", "--service-key", SERVICE_KEY, "--vault", vault])
            .assert(),
    );
    assert_eq!(first, second);

    // And `get` agrees.
    let fetched = stdout_line(
        keyfob()
            .args(["get", USER, "contact", "--service-key", SERVICE_KEY, "--vault", vault])
            .assert(),
    );
    assert_eq!(first, fetched);
}

#[test]
fn get_without_root_key_fails() {
    let tmp = TempDir::new().unwrap();
    let vault = tmp.path().join("keyfob.db");

    keyfob()
        .args([
            "get",
            USER,
            "contact",
            "--service-key",
            SERVICE_KEY,
            "--vault",
            vault.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no root key"));
}

#[test]
fn short_service_key_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let vault = tmp.path().join("keyfob.db");

    keyfob()
        .args([
            "create",
            USER,
            "contact",
            "--service-key",
            "00010203", // 4 bytes
            "--vault",
            vault.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("128 bits"));
}

#[test]
fn invalid_uuid_is_rejected() {
    keyfob()
        .args(["get", "not-a-uuid", "contact", "--service-key", SERVICE_KEY])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid user id"));
}

#[test]
fn invalid_hex_service_key_is_rejected() {
    keyfob()
        .args(["get", USER, "contact", "--service-key", "zz-not-hex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("encoding"));
}

#[test]
fn list_shows_created_categories() {
    let tmp = TempDir::new().unwrap();
    let vault = tmp.path().join("keyfob.db");
    let vault = vault.to_str().unwrap();

    for category in ["contact", "billing"] {
        keyfob()
            .args(["create", USER, category, "--service-key", SERVICE_KEY, "--vault", vault])
            .assert()
            .success();
    }

    keyfob()
        .args(["list", USER, "--service-key", SERVICE_KEY, "--vault", vault])
        .assert()
        .success()
        .stdout(predicate::str::contains("contact"))
        .stdout(predicate::str::contains("billing"));
}

#[test]
fn list_json_emits_parseable_output() {
    let tmp = TempDir::new().unwrap();
    let vault = tmp.path().join("keyfob.db");
    let vault = vault.to_str().unwrap();

    keyfob()
        .args(["create", USER, "contact", "--service-key", SERVICE_KEY, "--vault", vault])
        .assert()
        .success();

    let out = stdout_line(
        keyfob()
            .args([
                "list", USER, "--service-key", SERVICE_KEY, "--format", "json", "--vault", vault,
            ])
            .assert(),
    );

    let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid json");
    let items = parsed.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "contact");
    assert_eq!(items[0]["key"].as_str().expect("key").len(), 64);
}

#[test]
fn list_for_unknown_user_succeeds_with_no_keys() {
    let tmp = TempDir::new().unwrap();
    let vault = tmp.path().join("keyfob.db");

    keyfob()
        .args([
            "list",
            USER,
            "--service-key",
            SERVICE_KEY,
            "--vault",
            vault.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No root keys"));
}

#[test]
fn delete_then_create_changes_the_key() {
    let tmp = TempDir::new().unwrap();
    let vault = tmp.path().join("keyfob.db");
    let vault = vault.to_str().unwrap();

    let before = stdout_line(
        keyfob()
            .args(["create", USER, "contact", "--service-key", SERVICE_KEY, "--vault", vault])
            .assert(),
    );

    keyfob()
        .args(["delete", USER, "contact", "--force", "--vault", vault])
        .assert()
        .success();

    keyfob()
        .args(["get", USER, "contact", "--service-key", SERVICE_KEY, "--vault", vault])
        .assert()
        .failure();

    let after = stdout_line(
        keyfob()
            .args(["create", USER, "contact", "--service-key", SERVICE_KEY, "--vault", vault])
            .assert(),
    );
    assert_ne!(before, after, "a recreated root key must derive a new key");
}

#[test]
fn service_key_can_come_from_the_environment() {
    let tmp = TempDir::new().unwrap();
    let vault = tmp.path().join("keyfob.db");
    let vault = vault.to_str().unwrap();

    let created = stdout_line(
        keyfob()
            .env("KEYFOB_SERVICE_KEY", SERVICE_KEY)
            .args(["create", USER, "contact", "--vault", vault])
            .assert(),
    );
    assert_eq!(created.len(), 64);
}

#[test]
fn completions_generate_for_bash() {
    keyfob()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keyfob"));
}
