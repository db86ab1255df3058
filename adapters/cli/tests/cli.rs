use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

fn walkie(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_walkie"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch walkie");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write input");
    child.wait_with_output().expect("walkie runs to completion")
}

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "walkie"])
        .status()
        .expect("failed to invoke cargo check for walkie CLI binary");

    assert!(status.success(), "cargo check --bin walkie should succeed");
}

#[test]
fn list_prints_every_builtin_level() {
    let output = walkie(&["--list"], "");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("   1  First steps"));
    assert!(stdout.contains("  32  "));
}

#[test]
fn first_level_is_cleared_from_stdin() {
    let output = walkie(&["--level", "/1", "--seed", "1", "-q"], "d\nd\nquit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Welcome to Walkie."));
    assert!(stdout.contains("level 1 cleared with score 1!"));
    assert!(stdout.contains("Level 1 complete!"));
}

#[test]
fn unknown_start_level_fails() {
    let output = walkie(&["--level", "99", "-q"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to start level 99"));
}

#[test]
fn diagnostics_go_to_stderr_at_the_requested_level() {
    let normal = walkie(&["--level", "1", "--seed", "1"], "d\nquit\n");
    let stderr = String::from_utf8_lossy(&normal.stderr);
    assert!(stderr.contains("starting level 1"));
    assert!(!stderr.contains("player walks to"));
    assert!(!String::from_utf8_lossy(&normal.stdout).contains("starting level 1"));

    let verbose = walkie(&["--level", "1", "--seed", "1", "-v"], "d\nquit\n");
    assert!(String::from_utf8_lossy(&verbose.stderr).contains("player walks to (3, 3)"));

    let quiet = walkie(&["--level", "1", "--seed", "1", "-q"], "d\nquit\n");
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("starting level 1"));
}
