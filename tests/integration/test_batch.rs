use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/draft3")
}

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
fn test_directory_tree_is_mirrored_and_upgraded() {
    let work = TempDir::new().unwrap();
    let outdir = work.path().join("v1");

    upgrader(work.path())
        .arg(fixtures())
        .arg("--outdir")
        .arg(&outdir)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 document(s) upgraded, 0 failed"));

    let workflow = fs::read_to_string(outdir.join("count-lines.cwl")).unwrap();
    assert!(workflow.starts_with("class: Workflow\ncwlVersion: v1.0\n"));
    let tool = fs::read_to_string(outdir.join("tools/wc-tool.cwl")).unwrap();
    assert!(tool.contains("doc: |-\n"));
    assert_eq!(
        fs::read_to_string(outdir.join("README.txt")).unwrap(),
        "Sample draft-3 documents.\n"
    );
}

#[test]
fn test_existing_outdir_is_replaced() {
    let work = TempDir::new().unwrap();
    let outdir = work.path().join("v1");
    fs::create_dir_all(&outdir).unwrap();
    fs::write(outdir.join("stale.cwl"), "old").unwrap();

    upgrader(work.path())
        .arg(fixtures())
        .arg("--outdir")
        .arg(&outdir)
        .assert()
        .success();

    assert!(!outdir.join("stale.cwl").exists());
    assert!(outdir.join("tools/parseInt-tool.cwl").exists());
}

#[test]
fn test_failures_are_reported_and_exit_nonzero() {
    let work = TempDir::new().unwrap();
    let src = work.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::copy(fixtures().join("tools/wc-tool.cwl"), src.join("good.cwl")).unwrap();
    fs::write(src.join("broken.cwl"), "inputs: []\n").unwrap();
    let outdir = work.path().join("out");

    upgrader(work.path())
        .arg(&src)
        .arg("--outdir")
        .arg(&outdir)
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 document(s) upgraded, 1 failed"))
        .stderr(predicate::str::contains("CWL-SHAPE-001"));

    let good = fs::read_to_string(outdir.join("good.cwl")).unwrap();
    assert!(good.contains("cwlVersion: v1.0"));
}

#[test]
fn test_fail_fast_stops_the_run() {
    let work = TempDir::new().unwrap();
    let src = work.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("a-broken.cwl"), "- not\n- a document\n").unwrap();
    fs::copy(fixtures().join("tools/wc-tool.cwl"), src.join("b-good.cwl")).unwrap();
    let outdir = work.path().join("out");

    upgrader(work.path())
        .arg(&src)
        .arg("--outdir")
        .arg(&outdir)
        .arg("--fail-fast")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("a-broken.cwl"));

    let untouched = fs::read_to_string(outdir.join("b-good.cwl")).unwrap();
    assert!(untouched.contains("cwlVersion: draft-3"));
}

#[test]
fn test_extension_from_flag_and_config() {
    let work = TempDir::new().unwrap();
    let src = work.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::copy(fixtures().join("tools/wc-tool.cwl"), src.join("tool.yml")).unwrap();
    fs::copy(fixtures().join("tools/wc-tool.cwl"), src.join("tool.cwl")).unwrap();

    upgrader(work.path())
        .arg(&src)
        .arg("--outdir")
        .arg(work.path().join("by-flag"))
        .arg("--cwl-extension")
        .arg("yml")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 document(s) upgraded"));
    let by_flag = work.path().join("by-flag");
    assert!(fs::read_to_string(by_flag.join("tool.yml"))
        .unwrap()
        .contains("cwlVersion: v1.0"));
    assert!(fs::read_to_string(by_flag.join("tool.cwl"))
        .unwrap()
        .contains("cwlVersion: draft-3"));

    fs::write(
        work.path().join("cwl-upgrader.toml"),
        "[upgrade]\nextension = \"yml\"\n",
    )
    .unwrap();
    upgrader(work.path())
        .arg(&src)
        .arg("--outdir")
        .arg(work.path().join("by-config"))
        .assert()
        .success();
    assert!(fs::read_to_string(work.path().join("by-config/tool.yml"))
        .unwrap()
        .contains("cwlVersion: v1.0"));
}
