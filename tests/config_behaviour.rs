// tests/config_behaviour.rs

//! Config defaults, TOML loading, and validation failures.

use std::error::Error;
use std::fs;

use runcap::RuncapError;
use runcap::config::{EngineConfig, load_and_validate};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn defaults_are_sensible() {
    let cfg = EngineConfig::default();

    assert_eq!(cfg.mask, "******");
    assert!(!cfg.redact_captured);
    assert!(cfg.sensitive_env_vars.contains(&"PASSWORD".to_string()));
    assert!(cfg.sensitive_env_vars.contains(&"GITHUB_TOKEN".to_string()));
}

#[test]
fn toml_overrides_are_applied() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Runcap.toml");
    fs::write(
        &path,
        r#"
[redaction]
mask = "[redacted]"
sensitive_env_vars = ["DEPLOY_KEY"]
redact_captured = true
"#,
    )?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.mask, "[redacted]");
    assert_eq!(cfg.sensitive_env_vars, vec!["DEPLOY_KEY".to_string()]);
    assert!(cfg.redact_captured);
    Ok(())
}

#[test]
fn empty_file_falls_back_to_defaults() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Runcap.toml");
    fs::write(&path, "")?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.mask, "******");
    Ok(())
}

#[test]
fn empty_mask_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Runcap.toml");
    fs::write(&path, "[redaction]\nmask = \"\"\n")?;

    let err = load_and_validate(&path).expect_err("empty mask must be rejected");
    assert!(matches!(err, RuncapError::ConfigError(_)));
    Ok(())
}

#[test]
fn invalid_sensitive_env_var_name_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Runcap.toml");
    fs::write(
        &path,
        "[redaction]\nsensitive_env_vars = [\"1NOT-A-NAME\"]\n",
    )?;

    let err = load_and_validate(&path).expect_err("bad allow-list entry must be rejected");
    match err {
        RuncapError::ConfigError(msg) => assert!(msg.contains("1NOT-A-NAME")),
        other => panic!("expected ConfigError, got: {other}"),
    }
    Ok(())
}

#[test]
fn malformed_toml_is_a_toml_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Runcap.toml");
    fs::write(&path, "[redaction\nmask = 3")?;

    let err = load_and_validate(&path).expect_err("malformed TOML must fail");
    assert!(matches!(err, RuncapError::TomlError(_)));
    Ok(())
}
