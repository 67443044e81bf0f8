use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ANGLE_DEFINITION: &str = r#"
name = "rotate"

[[parameters]]
name = "angle"
kind = "angle"
bounding = "soft"
min = -100.0
max = 100.0

[[parameters]]
name = "visible"
kind = "toggle"
"#;

fn paramgraph(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("paramgraph").unwrap();
    cmd.env("PARAMGRAPH_CONFIG", config_dir.join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_definition(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("rotate.toml");
    std::fs::write(&path, ANGLE_DEFINITION).unwrap();
    path
}

#[test]
fn test_names_command() {
    let dir = TempDir::new().unwrap();
    paramgraph(dir.path())
        .args(["names", "radius", "UPPERCASE", "_1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok       radius"));

    paramgraph(dir.path())
        .args(["names", "radius", "1234", "network"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("cannot start with a digit"))
        .stdout(predicate::str::contains("reserved word"))
        .stderr(predicate::str::contains("2 of 3 names are invalid"));
}

#[test]
fn test_check_soft_accepts_out_of_range() {
    let dir = TempDir::new().unwrap();
    let def = write_definition(&dir);
    paramgraph(dir.path())
        .arg("check")
        .arg(&def)
        .args(["--set", "angle=1000", "--set", "visible=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1000.0"));
}

#[test]
fn test_check_hard_switch_clamps() {
    let dir = TempDir::new().unwrap();
    let def = write_definition(&dir);
    paramgraph(dir.path())
        .arg("check")
        .arg(&def)
        .args(["--set", "angle=-1000", "--bound", "angle=hard", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-100.0"));
}

#[test]
fn test_check_rejects_toggle_out_of_range() {
    let dir = TempDir::new().unwrap();
    let def = write_definition(&dir);
    paramgraph(dir.path())
        .arg("check")
        .arg(&def)
        .args(["--set", "visible=100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to apply 'visible=100'"));

    paramgraph(dir.path())
        .arg("check")
        .arg(&def)
        .args(["--clamp", "--set", "visible=100"])
        .assert()
        .success();
}

#[test]
fn test_check_unknown_parameter() {
    let dir = TempDir::new().unwrap();
    let def = write_definition(&dir);
    paramgraph(dir.path())
        .arg("check")
        .arg(&def)
        .args(["--set", "radius=3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown parameter"));
}

#[test]
fn test_kinds_command() {
    let dir = TempDir::new().unwrap();
    paramgraph(dir.path())
        .arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("toggle"))
        .stdout(predicate::str::contains("[0, 1]"));
}

#[test]
fn test_config_roundtrip() {
    let dir = TempDir::new().unwrap();
    paramgraph(dir.path())
        .args(["config", "set", "output_format", "json"])
        .assert()
        .success();

    paramgraph(dir.path())
        .args(["config", "get", "output_format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("json"));

    paramgraph(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
