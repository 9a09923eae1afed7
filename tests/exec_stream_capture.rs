// tests/exec_stream_capture.rs

//! Concurrent stream capture: the deadlock stress case, the echo policy
//! matrix, and carriage-return passthrough.

use std::error::Error;
use std::sync::Arc;

use tokio::time::{Duration, timeout};

use runcap::exec::Executor;
use runcap::{CommandResult, CommandSpec};
use runcap_test_utils::capture::CaptureSink;
use runcap_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

/// Lines emitted per stream in the stress test.
const STRESS_LINES: usize = 20_000;

/// Run `sh -c <script>` through an executor wired to capturing sinks.
async fn run_captured(
    script: &str,
    print_stdout: bool,
    print_stderr: bool,
) -> (CommandResult, String, String) {
    let out_sink = CaptureSink::new();
    let err_sink = CaptureSink::new();

    let executor = Executor::default()
        .with_sinks(Arc::new(out_sink.clone()), Arc::new(err_sink.clone()));

    let spec = CommandSpec::new("sh")
        .arg("-c")
        .arg(script)
        .print_stdout(print_stdout)
        .print_stderr(print_stderr);

    let result = executor.run(spec).await.expect("run should not error");
    (result, out_sink.contents(), err_sink.contents())
}

#[tokio::test(flavor = "multi_thread")]
async fn interleaved_high_volume_output_does_not_deadlock() -> TestResult {
    init_tracing();

    // Enough volume on both streams to overrun any OS pipe buffer many times
    // over; a parent draining the pipes one at a time would hang here.
    let script = format!(
        r#"i=0; while [ "$i" -lt {STRESS_LINES} ]; do echo "out $i"; echo "err $i" >&2; i=$((i+1)); done"#
    );

    let spec = CommandSpec::new("sh")
        .arg("-c")
        .arg(script)
        .print_stderr(false);

    // Enforce an upper bound on how long this test may run.
    let result = timeout(Duration::from_secs(60), runcap::run(spec))
        .await
        .expect("stress run did not finish; likely a pipe deadlock")?;

    assert!(result.success());

    let stdout = result.stdout_str();
    let stderr = result.stderr_str();
    let out_lines: Vec<&str> = stdout.lines().collect();
    let err_lines: Vec<&str> = stderr.lines().collect();

    assert_eq!(out_lines.len(), STRESS_LINES);
    assert_eq!(err_lines.len(), STRESS_LINES);

    // Each stream keeps its own emission order.
    assert_eq!(out_lines[0], "out 0");
    assert_eq!(out_lines[STRESS_LINES - 1], format!("out {}", STRESS_LINES - 1));
    assert_eq!(err_lines[0], "err 0");
    assert_eq!(err_lines[STRESS_LINES - 1], format!("err {}", STRESS_LINES - 1));
    Ok(())
}

#[tokio::test]
async fn default_policy_echoes_only_stderr() -> TestResult {
    init_tracing();

    let (result, echoed_out, echoed_err) =
        run_captured("echo out; echo err >&2", false, true).await;

    assert!(result.success());
    assert_eq!(echoed_out, "");
    assert_eq!(echoed_err, "err\n");
    Ok(())
}

#[tokio::test]
async fn print_stdout_echoes_both_streams() -> TestResult {
    init_tracing();

    let (_result, echoed_out, echoed_err) =
        run_captured("echo out; echo err >&2", true, true).await;

    assert_eq!(echoed_out, "out\n");
    assert_eq!(echoed_err, "err\n");
    Ok(())
}

#[tokio::test]
async fn disabling_print_stderr_silences_the_echo() -> TestResult {
    init_tracing();

    let (_result, echoed_out, echoed_err) =
        run_captured("echo out; echo err >&2", false, false).await;

    assert_eq!(echoed_out, "");
    assert_eq!(echoed_err, "");
    Ok(())
}

#[tokio::test]
async fn buffers_are_identical_regardless_of_echo_settings() -> TestResult {
    init_tracing();

    let script = "echo out; echo err >&2";
    let (silent, _, _) = run_captured(script, false, false).await;
    let (echoing, _, _) = run_captured(script, true, true).await;

    assert_eq!(silent.stdout, echoing.stdout);
    assert_eq!(silent.stderr, echoing.stderr);
    assert_eq!(silent.stdout_str(), "out\n");
    assert_eq!(silent.stderr_str(), "err\n");
    Ok(())
}

#[tokio::test]
async fn carriage_return_chunks_are_echoed_unchanged() -> TestResult {
    init_tracing();

    // An in-place progress indicator: starts with \r, no trailing newline.
    let (result, _echoed_out, echoed_err) =
        run_captured(r"printf '\rdownloading 42%%' >&2", false, true).await;

    assert!(result.success());
    assert_eq!(echoed_err, "\rdownloading 42%");
    assert!(echoed_err.starts_with('\r'));
    assert_eq!(result.stderr_str(), "\rdownloading 42%");
    Ok(())
}
