//! Logging and verbosity tests.
//!
//! These tests verify that verbose flags and logging environment variables
//! control debug output, and that secrets never reach the log.

#![cfg(feature = "openpgp")]

mod support;
use support::*;

#[test]
fn test_default_no_log_output() {
    let t = Test::new();
    t.copy_fixture("owner.pub.asc");

    let output = t.cmd().args(["fingerprint", "owner.pub.asc"]).output().unwrap();
    assert_success(&output);

    let err = stderr(&output);
    assert!(
        !err.contains("DEBUG") && !err.contains("TRACE"),
        "Default mode should not show debug/trace output"
    );
}

#[test]
fn test_verbose_flag_shows_debug_output() {
    let t = Test::with_identity("env.key.asc", &[("owner", "owner.pub.asc")]);
    t.copy_fixture("sealed.asc");

    let output = t
        .cmd_with_passphrase(ENV_PASSPHRASE)
        .args(["--verbose", "open", "sealed.asc"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "DEBUG");
    assert_stderr_contains(&output, "private key unlocked");
}

#[test]
fn test_envring_log_env_var() {
    let t = Test::with_identity("owner.key.asc", &[("me", "owner.pub.asc")]);
    t.write("app.env", "TOKEN=do-not-log-me\n");

    let output = t
        .cmd_with_passphrase(OWNER_PASSPHRASE)
        .env("ENVRING_LOG", "envring=trace")
        .args(["seal", "app.env"])
        .output()
        .unwrap();
    assert_success(&output);

    let err = stderr(&output);
    assert!(err.contains("TRACE"), "trace filter should apply: {}", err);
    assert!(!err.contains("do-not-log-me"), "plaintext leaked into logs");
    assert!(!err.contains(OWNER_PASSPHRASE), "passphrase leaked into logs");
}
