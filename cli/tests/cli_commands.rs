//! Runs the `switchyard` binary with `--mock` so no network is needed.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Runs the binary in an empty directory with an empty XDG config home.
fn run_switchyard(args: &[&str], stdin: &str) -> Output {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut child = Command::new(env!("CARGO_BIN_EXE_switchyard"))
        .args(args)
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("LOG_FILE")
        .env_remove("SWITCHYARD_MOCK_REPLY")
        .env_remove("OPENAI_TEMPERATURE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run switchyard binary");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait")
}

#[test]
fn help_lists_subcommands() {
    let out = run_switchyard(&["--help"], "");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for cmd in ["echo", "chat", "direct", "simple", "plan", "agent", "task"] {
        assert!(stdout.contains(cmd), "missing {} in help:\n{}", cmd, stdout);
    }
}

#[test]
fn echo_reads_message_from_stdin() {
    let out = run_switchyard(&["echo"], "ping\n");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("AI: Echo: ping"));
}

#[test]
fn agent_single_turn_prints_reply() {
    let out = run_switchyard(&["--mock", "4", "agent", "-m", "What is 2+2?"], "");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "AI: 4");
}

#[test]
fn agent_repl_runs_until_exit() {
    let out = run_switchyard(&["agent", "--mock", "ok"], "first\nsecond\nexit\n");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.matches("AI: ok").count(), 2);
}

#[test]
fn task_with_mock_prints_reply() {
    let out = run_switchyard(
        &["--mock", "Draft ready", "task", "--task", "email", "--details", "intake Monday"],
        "",
    );
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "Draft ready");
}

#[test]
fn unknown_task_exits_with_failure() {
    let out = run_switchyard(&["--mock", "x", "task", "--task", "9"], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown task"));
}
