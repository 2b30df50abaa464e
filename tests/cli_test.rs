//! Integration tests for the dotnet-detect binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const WIN10_FIXTURE: &str = r#"
entries:
  - path: Software\Microsoft\NET Framework Setup\NDP\v3.5
    key: Install
    dword: 1
  - path: SOFTWARE\Microsoft\NET Framework Setup\NDP\v4\Full
    key: Install
    dword: 1
  - path: SOFTWARE\Microsoft\NET Framework Setup\NDP\v4\Full
    key: Release
    dword: 528040
"#;

const FAULTY_FIXTURE: &str = r#"
entries:
  - path: Software\Microsoft\NET Framework Setup\NDP\v2.0.50727
    key: Install
    fault: access denied
  - path: SOFTWARE\Microsoft\NET Framework Setup\NDP\v4\Full
    key: Release
    dword: 528040
"#;

fn setup_fixture(body: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("registry.yml");
    fs::write(&path, body).unwrap();
    (temp, path)
}

fn detect(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("dotnet-detect"));
    cmd.current_dir(temp.path());
    cmd.env_remove("DOTNET_DETECT_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    detect(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(".NET Framework"))
        .stdout(predicate::str::contains("installed"))
        .stdout(predicate::str::contains("catalog"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    detect(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn installed_lists_fixture_matches() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture(WIN10_FIXTURE);
    detect(&temp)
        .args(["installed", "--fixture"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains(".NET Framework 3.5"))
        .stdout(predicate::str::contains(".NET Framework 4.0 Full Profile"))
        .stdout(predicate::str::contains(".NET Framework 4.8"))
        .stdout(predicate::str::contains(".NET Framework 4.0 Client Profile").not());
    Ok(())
}

#[test]
fn installed_quiet_prints_bare_labels() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture(WIN10_FIXTURE);
    detect(&temp)
        .args(["-q", "installed", "--fixture"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout(".NET Framework 3.5\n.NET Framework 4.0 Full Profile\n.NET Framework 4.8\n");
    Ok(())
}

#[test]
fn installed_json_report() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture(FAULTY_FIXTURE);
    let output = detect(&temp)
        .args(["installed", "--format", "json", "--fixture"])
        .arg(&fixture)
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["applicable"], true);
    assert_eq!(report["aborted"], false);
    assert_eq!(report["matches"][0]["label"], ".NET Framework 4.8");
    assert_eq!(report["faults"][0]["label"], ".NET Framework 2.0");
    Ok(())
}

#[test]
fn installed_legacy_report() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture(WIN10_FIXTURE);
    detect(&temp)
        .args(["installed", "--format", "legacy", "--fixture"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout(
            "[[\".NET Framework 3.5\"],[\".NET Framework 4.0 Full Profile\"],[\".NET Framework 4.8\"]]\n",
        );
    Ok(())
}

#[test]
fn installed_legacy_abort_ends_with_error() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture(FAULTY_FIXTURE);
    let output = detect(&temp)
        .args([
            "installed",
            "--format",
            "legacy",
            "--policy",
            "abort",
            "--fixture",
        ])
        .arg(&fixture)
        .output()?;
    assert!(output.status.success());

    let legacy: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let entries = legacy.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].as_str().unwrap().contains("access denied"));
    Ok(())
}

#[test]
fn installed_faults_go_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture(FAULTY_FIXTURE);
    detect(&temp)
        .args(["installed", "--fixture"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains(".NET Framework 4.8"))
        .stderr(predicate::str::contains(".NET Framework 2.0"));
    Ok(())
}

#[test]
fn non_windows_fixture_is_not_applicable() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture("windows: false\n");
    detect(&temp)
        .args(["installed", "--format", "legacy", "--fixture"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout("[]\n");
    Ok(())
}

#[cfg(not(windows))]
#[test]
fn no_args_off_windows_reports_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    detect(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Not a Windows host"));
    Ok(())
}

#[cfg(not(windows))]
#[test]
fn check_off_windows_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    detect(&temp)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not a Windows host"));
    Ok(())
}

#[test]
fn check_with_fixture_is_available() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture("entries: []\n");
    detect(&temp)
        .args(["check", "--fixture"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("Registry access available"));
    Ok(())
}

#[test]
fn config_file_sets_format() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture(WIN10_FIXTURE);
    fs::write(
        temp.path().join("dotnet-detect.yml"),
        "settings:\n  format: legacy\n",
    )?;
    detect(&temp)
        .args(["installed", "--fixture"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[[\".NET Framework 3.5\"]"));
    Ok(())
}

#[test]
fn cli_flag_beats_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture(WIN10_FIXTURE);
    fs::write(
        temp.path().join("dotnet-detect.yml"),
        "settings:\n  format: legacy\n",
    )?;
    let output = detect(&temp)
        .args(["installed", "--format", "json", "--fixture"])
        .arg(&fixture)
        .output()?;
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["matches"].as_array().unwrap().len(), 3);
    Ok(())
}

#[test]
fn verbose_json_keeps_stdout_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture(WIN10_FIXTURE);
    fs::write(
        temp.path().join("dotnet-detect.yml"),
        "settings:\n  format: json\n",
    )?;
    let output = detect(&temp)
        .args(["-v", "installed", "--fixture"])
        .arg(&fixture)
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["matches"].as_array().unwrap().len(), 3);
    assert!(String::from_utf8(output.stderr)?.contains("# config:"));
    Ok(())
}

#[test]
fn unavailable_registry_exits_2() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture("unavailable: reg.exe missing\n");
    detect(&temp)
        .args(["installed", "--fixture"])
        .arg(&fixture)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Registry access unavailable"));
    detect(&temp)
        .args(["check", "--fixture"])
        .arg(&fixture)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("reg.exe missing"));
    Ok(())
}

#[test]
fn config_from_env_var() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture(WIN10_FIXTURE);
    let config = temp.path().join("custom.yml");
    fs::write(&config, "settings:\n  format: legacy\n")?;
    detect(&temp)
        .env("DOTNET_DETECT_CONFIG", &config)
        .args(["installed", "--fixture"])
        .arg(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[["));
    Ok(())
}

#[test]
fn missing_explicit_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    detect(&temp)
        .args(["--config", "nope.yml", "installed"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn invalid_config_value_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(
        temp.path().join("dotnet-detect.yml"),
        "settings:\n  policy: retry\n",
    )?;
    detect(&temp)
        .arg("installed")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn invalid_fixture_fails() -> Result<(), Box<dyn std::error::Error>> {
    let (temp, fixture) = setup_fixture("entries:\n  - path: X\n    key: Y\n");
    detect(&temp)
        .args(["installed", "--fixture"])
        .arg(&fixture)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid registry fixture"));
    Ok(())
}

#[test]
fn catalog_json_lists_table() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = detect(&temp).args(["catalog", "--json"]).output()?;
    assert!(output.status.success());
    let table: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(table.as_array().unwrap().len(), 26);
    Ok(())
}

#[test]
fn catalog_unknown_label_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    detect(&temp)
        .args(["catalog", "--label", "4.9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown version label"));
    Ok(())
}

#[test]
fn completions_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    detect(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dotnet-detect"));
    Ok(())
}

#[test]
fn unknown_policy_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    detect(&temp)
        .args(["installed", "--policy", "retry"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("retry"));
    Ok(())
}
