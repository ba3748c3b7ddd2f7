use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/draft3")
        .join(relative)
}

/// Binary run from an empty directory so no stray config file is picked up.
fn upgrader(workdir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cwl-upgrader"));
    cmd.current_dir(workdir)
        .env_remove("RUST_LOG")
        .env_remove("CWL_UPGRADER_EXTENSION")
        .env_remove("CWL_UPGRADER_FAIL_FAST")
        .env_remove("CWL_UPGRADER_LOG_LEVEL");
    cmd
}

#[test]
fn test_help_lists_options() {
    let dir = TempDir::new().unwrap();
    upgrader(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--outdir"))
        .stdout(predicate::str::contains("--cwl-extension"))
        .stdout(predicate::str::contains("--fail-fast"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    upgrader(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_single_file_written_to_stdout() {
    let dir = TempDir::new().unwrap();
    upgrader(dir.path())
        .arg(fixture("tools/wc-tool.cwl"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "class: CommandLineTool\ncwlVersion: v1.0\n",
        ))
        .stdout(predicate::str::contains("  file1:\n    type: File\n"));
}

#[test]
fn test_stdin_target() {
    let dir = TempDir::new().unwrap();
    upgrader(dir.path())
        .arg("-")
        .write_stdin("class: CommandLineTool\ninputs:\n  - id: \"#x\"\n    type: [\"null\", int]\noutputs: []\n")
        .assert()
        .success()
        .stdout(
            "class: CommandLineTool\ncwlVersion: v1.0\ninputs:\n  x:\n    type: int?\noutputs: {}\n",
        );
}

#[test]
fn test_verbose_logs_stay_off_stdout() {
    let dir = TempDir::new().unwrap();
    let output = upgrader(dir.path())
        .arg(fixture("count-lines.cwl"))
        .arg("--verbose")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("class: Workflow\n"));
    assert!(!stdout.contains("DEBUG"));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("upgrading document"));
}

#[test]
fn test_directory_without_outdir_is_usage_error() {
    let dir = TempDir::new().unwrap();
    upgrader(dir.path())
        .arg(fixture(""))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--outdir"));
}

#[test]
fn test_missing_class_fails() {
    let dir = TempDir::new().unwrap();
    upgrader(dir.path())
        .arg("-")
        .write_stdin("inputs: []\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CWL-SHAPE-001"));
}

#[test]
fn test_unreadable_target_fails() {
    let dir = TempDir::new().unwrap();
    upgrader(dir.path())
        .arg("does-not-exist.cwl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CWL-IO-001"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cwl-upgrader.toml"),
        "[logging]\nconsole_output = \"printer\"\n",
    )
    .unwrap();
    upgrader(dir.path())
        .arg(fixture("tools/wc-tool.cwl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("CWL-CONFIG-001"));
}
