use std::io::Write;
use std::process::{Command, Stdio};

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "oxtrail-cli-{label}-{}.json",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_exits_cleanly_when_stdin_closes() {
    let exe = env!("CARGO_BIN_EXE_oxtrail");
    let output = Command::new(exe)
        .args(["--pulse-ms", "10", "--seed", "7", "--no-color"])
        .stdin(Stdio::null())
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Oxtrail"));
    assert!(stdout.contains("wagon leader"), "{stdout}");
}

#[test]
fn cli_plays_scripted_input() {
    let exe = env!("CARGO_BIN_EXE_oxtrail");
    let mut child = Command::new(exe)
        .args(["--seed", "3", "--no-color", "--host-tick-ms", "5"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"Ada\nBen\n\nleave\nquit\n")
        .expect("write input");
    let output = child.wait_with_output().expect("wait cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("General store"), "{stdout}");
}

#[test]
fn cli_prints_merged_config() {
    let exe = env!("CARGO_BIN_EXE_oxtrail");
    let path = temp_path("config");
    std::fs::write(&path, r#"{ "trail_length": 300 }"#).expect("write config");
    let output = Command::new(exe)
        .arg("--config")
        .arg(&path)
        .args(["--seed", "11", "--print-config"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let config: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("config json");
    assert_eq!(config["trail_length"], 300);
    assert_eq!(config["seed"], 11);
}

#[test]
fn cli_rejects_an_invalid_config() {
    let exe = env!("CARGO_BIN_EXE_oxtrail");
    let output = Command::new(exe)
        .args(["--pulse-ms", "0", "--print-config"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "{stderr}");
}
