//! Exit codes of the `focus-telemetry` binary.

use std::process::Command;

fn agent() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_focus-telemetry"));
    cmd.env_remove("AUTH_TOKEN")
        .env_remove("MY_API_URL")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_config_without_token_fails() {
    let output = agent()
        .arg("config")
        .env("MY_API_URL", "https://telemetry.example.com/ingest")
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("AUTH_TOKEN is not set"), "stderr: {stderr}");
}

#[test]
fn test_config_without_url_fails() {
    let output = agent()
        .arg("config")
        .env("AUTH_TOKEN", "secret")
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_redacts_token() {
    let output = agent()
        .arg("config")
        .env("AUTH_TOKEN", "very-secret-token")
        .env("MY_API_URL", "https://telemetry.example.com/ingest")
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("https://telemetry.example.com/ingest"));
    assert!(!stdout.contains("very-secret-token"));
}

#[test]
fn test_start_without_config_fails() {
    let output = agent().arg("start").output().expect("Failed to run binary");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_privacy_succeeds() {
    let output = agent().arg("privacy").output().expect("Failed to run binary");
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("NEVER CAPTURE"));
}

#[cfg(target_os = "macos")]
#[test]
fn test_start_exits_cleanly_on_sigterm() {
    use std::thread;
    use std::time::Duration;

    let mut child = agent()
        .arg("start")
        .env("AUTH_TOKEN", "secret")
        .env("MY_API_URL", "http://127.0.0.1:9/ingest")
        .stdout(std::process::Stdio::null())
        .spawn()
        .expect("Failed to start binary");

    // Give the agent time to install its signal handler.
    thread::sleep(Duration::from_secs(1));

    let killed = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .expect("Failed to run kill");
    assert!(killed.success());

    let status = child.wait().expect("Failed to wait for binary");
    assert_eq!(status.code(), Some(0));
}
