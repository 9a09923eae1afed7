// tests/argv_resolution.rs

//! Argv construction: env-name validation, executable resolution, wrapper
//! layout, and spawn-failure reporting.

use std::error::Error;

use runcap::{CommandSpec, ProcessStatus, RuncapError, argv};
use runcap_test_utils::fixture::write_script;
use runcap_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn invalid_env_name_fails_construction() {
    let spec = CommandSpec::new("true").env("1BAD", "x");

    let err = argv::build(&spec).expect_err("digit-leading name must be rejected");
    match err {
        RuncapError::InvalidEnvName(name) => assert_eq!(name, "1BAD"),
        other => panic!("expected InvalidEnvName, got: {other}"),
    }

    let spec = CommandSpec::new("true").env("BAD-NAME", "x");
    assert!(matches!(
        argv::build(&spec),
        Err(RuncapError::InvalidEnvName(_))
    ));
}

#[tokio::test]
async fn invalid_env_name_raises_before_any_spawn() -> TestResult {
    init_tracing();

    // The program does not exist; if a process were spawned the status would
    // be 127, but construction must fail first.
    let spec = CommandSpec::new("definitely-not-a-real-program-xyz").env("2LEGIT", "no");

    let err = with_timeout(runcap::run(spec))
        .await
        .expect_err("construction error expected");
    assert!(matches!(err, RuncapError::InvalidEnvName(_)));
    Ok(())
}

#[test]
fn present_vars_ride_on_the_env_wrapper_and_absent_vars_are_omitted() {
    let spec = CommandSpec::new("true")
        .arg("--flag")
        .env("ALPHA", "1")
        .unset_env("BETA");

    let argv = argv::build(&spec).expect("valid spec");
    let line = argv.display_line();

    assert!(argv.program().ends_with("env"));
    assert!(argv.args().contains(&"ALPHA=1".to_string()));
    assert!(!line.contains("BETA"));
    assert_eq!(argv.args().last(), Some(&"--flag".to_string()));
}

#[test]
fn sudo_wraps_the_full_command_with_env_forwarding() {
    let spec = CommandSpec::new("true").env("ALPHA", "1").sudo(true);

    let argv = argv::build(&spec).expect("valid spec");
    let entries = argv.as_slice();

    assert!(entries[0].ends_with("sudo"));
    assert_eq!(entries[1], "-E");
    assert_eq!(entries[2], "--");
    assert!(entries[3].ends_with("env"));
    assert_eq!(entries[4], "ALPHA=1");
}

#[test]
fn bare_command_gets_no_wrappers() {
    let spec = CommandSpec::new("true").arg("x");
    let argv = argv::build(&spec).expect("valid spec");

    assert!(!argv.program().ends_with("env"));
    assert_eq!(argv.args(), ["x".to_string()]);
}

#[tokio::test]
async fn executable_is_found_through_a_custom_search_path() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    write_script(dir.path(), "runcap-fixture-prog", "echo custom path hit");

    let spec = CommandSpec::new("runcap-fixture-prog")
        .env("PATH", dir.path().to_str().expect("utf-8 tempdir"))
        .print_stderr(false);

    let result = with_timeout(runcap::run(spec)).await?;

    assert!(result.success());
    assert_eq!(result.stdout_str(), "custom path hit\n");
    Ok(())
}

#[tokio::test]
async fn executable_path_with_spaces_is_invoked_directly() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let path = write_script(dir.path(), "spaced program", "echo spaces ok");

    let spec = CommandSpec::new(path.to_str().expect("utf-8 tempdir")).print_stderr(false);

    let result = with_timeout(runcap::run(spec)).await?;

    assert!(result.success());
    assert_eq!(result.stdout_str(), "spaces ok\n");
    Ok(())
}

#[tokio::test]
async fn nonexistent_program_reports_not_found_instead_of_raising() -> TestResult {
    init_tracing();

    let spec = CommandSpec::new("definitely-not-a-real-program-xyz").print_stderr(false);

    let result = with_timeout(runcap::run(spec)).await?;

    assert!(!result.success());
    assert_eq!(result.status, ProcessStatus::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn nonexistent_path_is_used_verbatim_and_reports_not_found() -> TestResult {
    init_tracing();

    let spec = CommandSpec::new("./does/not/exist").print_stderr(false);

    let result = with_timeout(runcap::run(spec)).await?;

    assert!(!result.success());
    assert_eq!(result.status, ProcessStatus::Exited(127));
    Ok(())
}

#[tokio::test]
async fn run_checked_promotes_spawn_failure_like_any_other() -> TestResult {
    init_tracing();

    let spec = CommandSpec::new("definitely-not-a-real-program-xyz").print_stderr(false);

    let err = with_timeout(runcap::run_checked(spec))
        .await
        .expect_err("spawn failure must raise from run_checked");

    match err {
        RuncapError::CommandFailed { status, .. } => {
            assert_eq!(status, ProcessStatus::NOT_FOUND);
        }
        other => panic!("expected CommandFailed, got: {other}"),
    }
    Ok(())
}
