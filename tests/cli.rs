//! Startup behavior of the `lunchmoney-mcp` binary.

use std::process::{Command, Output, Stdio};

fn run_binary(args: &[&str], token: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lunchmoney-mcp"));
    command
        .args(args)
        .env_remove("LUNCHMONEY_API_TOKEN")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null());
    if let Some(token) = token {
        command.env("LUNCHMONEY_API_TOKEN", token);
    }
    command.output().expect("spawn lunchmoney-mcp")
}

fn assert_fatal_missing_token(output: &Output) {
    assert!(!output.status.success(), "expected a non-zero exit");
    assert!(output.stdout.is_empty(), "stdout must stay clean for the transport");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"), "stderr: {stderr}");
    assert!(
        stderr.contains(
            "Failed to get the LUNCHMONEY_API_TOKEN. Probably it wasn't added during the server configuration."
        ),
        "stderr: {stderr}"
    );
}

#[test]
fn test_missing_token_exits_before_serving() {
    assert_fatal_missing_token(&run_binary(&[], None));
    assert_fatal_missing_token(&run_binary(&["stdio"], None));
}

#[test]
fn test_blank_token_is_fatal() {
    assert_fatal_missing_token(&run_binary(&["stdio"], Some("   ")));
}

#[test]
fn test_http_mode_also_requires_token() {
    let output = run_binary(&["http", "--bind", "127.0.0.1:0"], None);
    assert_fatal_missing_token(&output);
}
