/*!
 * Integration tests for the repo2wc binary
 */

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut file = File::create(path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

fn setup_repo(root: &Path) -> std::path::PathBuf {
    let repo = root.join("repo");
    write_file(&repo.join("src").join("a.ts"), "x");
    write_file(&repo.join("package.json"), "{}");
    write_file(&repo.join("node_modules").join("lib").join("index.js"), "nope");
    write_file(&repo.join(".env.local"), "SECRET=1");
    repo
}

#[test]
fn test_stdout_snippet() {
    let temp_dir = tempdir().unwrap();
    let repo = setup_repo(temp_dir.path());

    Command::cargo_bin("repo2wc")
        .unwrap()
        .arg("--stdout")
        .arg(&repo)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("const files = {\n  \"package.json\""))
        .stdout(predicate::str::contains("\"a.ts\": {\n        \"file\": {\n          \"contents\": \"x\""))
        .stdout(predicate::str::contains("// Mount to webcontainer \nawait webcontainerInstance.mount(files);"))
        .stdout(predicate::str::contains("node_modules").not())
        .stdout(predicate::str::contains("SECRET").not())
        .stderr(predicate::str::contains("PROCESSED FILES (2)"));
}

#[test]
fn test_writes_download_file_by_default() {
    let temp_dir = tempdir().unwrap();
    let repo = setup_repo(temp_dir.path());

    Command::cargo_bin("repo2wc")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg(&repo)
        .assert()
        .success();

    let written = fs::read_to_string(temp_dir.path().join("webcontainer-files.js")).unwrap();
    assert!(written.starts_with("const files = {"));
    assert!(written.ends_with("await webcontainerInstance.mount(files);"));
}

#[test]
fn test_picker_mode_with_output_path() {
    let temp_dir = tempdir().unwrap();
    let repo = setup_repo(temp_dir.path());
    let output = temp_dir.path().join("out.js");

    Command::cargo_bin("repo2wc")
        .unwrap()
        .args(["--mode", "picker", "-o"])
        .arg(&output)
        .arg(&repo)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("\"src\": {\n    \"directory\""));
    assert!(!written.contains("index.js"));
}

#[test]
fn test_empty_directory_renders_undefined() {
    let temp_dir = tempdir().unwrap();
    let empty = temp_dir.path().join("empty");
    fs::create_dir(&empty).unwrap();

    Command::cargo_bin("repo2wc")
        .unwrap()
        .arg("--stdout")
        .arg(&empty)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("const files = undefined;"));
}

#[test]
fn test_missing_input_fails() {
    Command::cargo_bin("repo2wc")
        .unwrap()
        .args(["--stdout", "/definitely/not/here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_generate_completions() {
    Command::cargo_bin("repo2wc")
        .unwrap()
        .args(["--generate", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("repo2wc"));
}

#[test]
fn test_rerun_in_place_ignores_previous_output() {
    let temp_dir = tempdir().unwrap();
    let repo = setup_repo(temp_dir.path());
    let output = repo.join("webcontainer-files.js");

    for mode in ["entries", "picker"] {
        for _ in 0..2 {
            Command::cargo_bin("repo2wc")
                .unwrap()
                .current_dir(&repo)
                .args(["--mode", mode])
                .assert()
                .success()
                .stderr(predicate::str::contains("PROCESSED FILES (2)"));
        }

        let written = fs::read_to_string(&output).unwrap();
        assert!(!written.contains("webcontainer-files.js"), "{} mode", mode);
        assert!(!written.contains("const files = {\\n"), "{} mode", mode);
    }
}
