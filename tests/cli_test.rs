mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

/// A `paysim` command with no artificial latency and a test client id.
fn paysim() -> Command {
    let mut cmd = Command::new(cargo_bin!("paysim"));
    cmd.env("PAYSIM_CLIENT_ID", "test-client-id")
        .env("PAYSIM_ACCOUNT_LATENCY_MS", "0")
        .env("PAYSIM_PAYMENT_LATENCY_MS", "0")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_account_command_prints_snapshot() {
    paysim()
        .arg("account")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id": "acc_12345""#))
        .stdout(predicate::str::contains(r#""name": "John Doe""#))
        .stdout(predicate::str::contains(r#""balance": 1250.75"#))
        .stdout(predicate::str::contains(r#""currency": "USD""#));
}

#[test]
fn test_pay_command_completed() {
    paysim()
        .env("PAYSIM_SUCCESS_PROBABILITY", "1")
        .args(["pay", "--amount", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""success": true"#))
        .stdout(predicate::str::contains(r#""status": "completed""#))
        .stdout(predicate::str::contains(r#""amount": 10.0"#).or(predicate::str::contains(r#""amount": 10"#)))
        .stdout(predicate::str::contains("txn_"))
        .stdout(predicate::str::contains("message").not());
}

#[test]
fn test_pay_command_declined_still_succeeds() {
    paysim()
        .env("PAYSIM_SUCCESS_PROBABILITY", "0")
        .args(["pay", "--amount", "10", "--currency", "eur"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""success": false"#))
        .stdout(predicate::str::contains(r#""status": "failed""#))
        .stdout(predicate::str::contains(r#""currency": "EUR""#))
        .stdout(predicate::str::contains(
            "Payment processing failed. Please try again.",
        ));
}

#[test]
fn test_pay_command_rejects_invalid_amount() {
    paysim()
        .args(["pay", "--amount", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be positive"));
}

#[test]
fn test_pay_command_rejects_fractional_yen() {
    paysim()
        .args(["pay", "--amount", "10.50", "--currency", "JPY"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("decimal places for JPY"));
}

#[test]
fn test_pay_command_rejects_amount_over_limit() {
    paysim()
        .env("PAYSIM_MAX_AMOUNT", "100")
        .args(["pay", "--amount", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the limit"));
}

#[test]
fn test_missing_client_id_fails_fast() {
    paysim()
        .env_remove("PAYSIM_CLIENT_ID")
        .arg("account")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PAYSIM_CLIENT_ID is not set"));
}

#[test]
fn test_client_id_command() {
    paysim()
        .arg("client-id")
        .assert()
        .success()
        .stdout(predicate::str::diff("test-client-id\n"));
}

#[test]
fn test_batch_command_reports_bad_rows() {
    paysim()
        .env("PAYSIM_SUCCESS_PROBABILITY", "1")
        .args(["batch", "tests/fixtures/requests.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "transaction_id,status,success,amount,currency,timestamp,message",
        ))
        .stdout(predicate::str::contains(",completed,true,10,USD,"))
        .stdout(predicate::str::contains(",completed,true,2.5,EUR,"))
        .stdout(predicate::str::contains(",completed,true,99.99,GBP,"))
        .stderr(predicate::str::contains("Error reading payment request").count(3));
}

#[test]
fn test_batch_command_reports_rejected_payments_and_keeps_going() {
    paysim()
        .env("PAYSIM_SUCCESS_PROBABILITY", "1")
        .env("PAYSIM_MAX_AMOUNT", "50")
        .args(["batch", "tests/fixtures/requests.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(",completed,true,10,USD,"))
        .stdout(predicate::str::contains(",completed,true,2.5,EUR,"))
        .stdout(predicate::str::contains("GBP").not())
        .stderr(predicate::str::contains("Error processing payment").count(1));
}

#[test]
fn test_batch_command_with_generated_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("requests.csv");
    common::generate_request_csv(
        &path,
        &[["1", "USD", "a"], ["2", "USD", "b"], ["3", "USD", "c"]],
    )
    .unwrap();

    let output = paysim()
        .env("PAYSIM_SUCCESS_PROBABILITY", "0")
        .arg("batch")
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // Header plus one row per request.
    assert_eq!(stdout.lines().count(), 4);
    assert_eq!(stdout.matches(",failed,false,").count(), 3);
}

#[test]
fn test_simulate_command_is_reproducible_with_seed() {
    let run = || {
        let output = paysim()
            .env("PAYSIM_SEED", "99")
            .args(["simulate", "--count", "200"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        report
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert_eq!(first["submitted"], 200);
    assert_eq!(
        first["completed"].as_u64().unwrap() + first["failed"].as_u64().unwrap(),
        200
    );
}
