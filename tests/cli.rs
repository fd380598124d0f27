//! CLI integration tests using assert_cmd.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn practicum(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("practicum").unwrap();
    cmd.current_dir(dir).env("RUST_LOG", "off");
    cmd
}

const AUTHOR: &str = "6f1c2a9e-3b4d-4c5e-8f70-112233445566";

fn saved_id(output: &std::process::Output) -> String {
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    stdout
        .trim()
        .rsplit_once('(')
        .and_then(|(_, rest)| rest.strip_suffix(')'))
        .unwrap()
        .to_string()
}

fn block(n: usize) -> String {
    format!("+++++ Question {n}\n==== a{n}\n====# b{n}\n==== c{n}\n==== d{n}")
}

fn write_test(dir: &Path, blocks: &[String]) -> std::path::PathBuf {
    let path = dir.join("test.txt");
    fs::write(&path, blocks.join("\n\n")).unwrap();
    path
}

#[test]
fn check_accepts_complete_test() {
    let dir = TempDir::new().unwrap();
    let blocks: Vec<String> = (1..=10).map(block).collect();
    let file = write_test(dir.path(), &blocks);

    practicum(dir.path())
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("block 10: question 10 - Question 10"))
        .stdout(predicate::str::contains("10 question(s) accepted, 0 block(s) dropped"))
        .stdout(predicate::str::contains("Test is ready to save"));
}

#[test]
fn check_rejects_incomplete_test() {
    let dir = TempDir::new().unwrap();
    let mut blocks: Vec<String> = (1..=9).map(block).collect();
    blocks.push("+++++ Question 10\n==== a\n====# b\n==== c".to_string());
    let file = write_test(dir.path(), &blocks);

    practicum(dir.path())
        .arg("check")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "block 10: DROPPED (only 3 of 4 answer choices)",
        ))
        .stderr(predicate::str::contains("fill in all 10 test questions"));
}

#[test]
fn check_strict_marks_drops_double_mark() {
    let dir = TempDir::new().unwrap();
    let mut blocks: Vec<String> = (1..=9).map(block).collect();
    blocks.push("+++++ Question 10\n====# a\n==== b\n====# c\n==== d".to_string());
    let file = write_test(dir.path(), &blocks);

    practicum(dir.path())
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("the last one wins"));

    practicum(dir.path())
        .arg("check")
        .arg(&file)
        .arg("--strict-marks")
        .assert()
        .failure()
        .stdout(predicate::str::contains("2 choices are marked correct"));
}

#[test]
fn check_uses_config_question_count() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("practicum.toml"),
        "required_questions = 2\npass_score = 1\n",
    )
    .unwrap();
    let blocks: Vec<String> = (1..=2).map(block).collect();
    let file = write_test(dir.path(), &blocks);

    practicum(dir.path())
        .arg("check")
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn check_missing_file() {
    let dir = TempDir::new().unwrap();

    practicum(dir.path())
        .arg("check")
        .arg("nonexistent.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn format_json_rows() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("rows.json");
    fs::write(
        &file,
        r#"[
            {"question": "Q2", "option_a": "e", "option_b": "f", "option_c": "g", "option_d": "h", "correct_answer": "A", "order_number": 2},
            {"question": "Q1", "option_a": "a", "option_b": "b", "option_c": "c", "option_d": "d", "correct_answer": "C", "order_number": 1}
        ]"#,
    )
    .unwrap();

    practicum(dir.path())
        .arg("format")
        .arg(&file)
        .assert()
        .success()
        .stdout(
            "+++++ Q1\n==== a\n==== b\n====# c\n==== d\n\n+++++ Q2\n====# e\n==== f\n==== g\n==== h\n",
        );
}

#[test]
fn demo_stats() {
    let dir = TempDir::new().unwrap();

    practicum(dir.path())
        .args(["--demo", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Students:          2"))
        .stdout(predicate::str::contains("Practicals:        1"));
}

#[test]
fn save_list_and_edit_practical() {
    let dir = TempDir::new().unwrap();
    let blocks: Vec<String> = (1..=10).map(block).collect();
    let file = write_test(dir.path(), &blocks);

    let output = practicum(dir.path())
        .args(["--data", "course.json", "practical", "save"])
        .arg(&file)
        .args(["--title", "Ownership", "--order", "1", "--status", "published"])
        .args(["--created-by", AUTHOR])
        .output()
        .unwrap();
    let id = saved_id(&output);

    assert!(dir.path().join("course.json").exists());

    practicum(dir.path())
        .args(["--data", "course.json", "practical", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ownership  [published, 10 question(s)]"));

    practicum(dir.path())
        .args(["--data", "course.json", "practical", "edit-text", &id])
        .assert()
        .success()
        .stdout(format!("{}\n", blocks.join("\n\n")));

    practicum(dir.path())
        .args(["--data", "course.json", "practical", "delete", &id])
        .assert()
        .success();

    practicum(dir.path())
        .args(["--data", "course.json", "practical", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No practicals yet"));
}

#[test]
fn rejected_save_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let blocks: Vec<String> = (1..=3).map(block).collect();
    let file = write_test(dir.path(), &blocks);

    practicum(dir.path())
        .args(["--data", "course.json", "practical", "save"])
        .arg(&file)
        .args(["--title", "Ownership", "--order", "1", "--created-by", AUTHOR])
        .assert()
        .failure()
        .stderr(predicate::str::contains("test was not saved"));

    assert!(!dir.path().join("course.json").exists());
}

#[test]
fn edit_keeps_status_and_description() {
    let dir = TempDir::new().unwrap();
    let blocks: Vec<String> = (1..=10).map(block).collect();
    let file = write_test(dir.path(), &blocks);

    let output = practicum(dir.path())
        .args(["--data", "course.json", "practical", "save"])
        .arg(&file)
        .args(["--title", "Ownership", "--order", "1", "--status", "published"])
        .args(["--description", "Moves and borrows", "--created-by", AUTHOR])
        .output()
        .unwrap();
    let id = saved_id(&output);

    practicum(dir.path())
        .args(["--data", "course.json", "practical", "save"])
        .arg(&file)
        .args(["--title", "Ownership, revised", "--order", "1", "--id", &id])
        .assert()
        .success();

    practicum(dir.path())
        .args(["--data", "course.json", "practical", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Ownership, revised  [published, 10 question(s)]",
        ))
        .stdout(predicate::str::contains("Moves and borrows"));
}

#[test]
fn save_without_author_needs_an_admin() {
    let dir = TempDir::new().unwrap();
    let blocks: Vec<String> = (1..=10).map(block).collect();
    let file = write_test(dir.path(), &blocks);

    practicum(dir.path())
        .args(["--data", "course.json", "practical", "save"])
        .arg(&file)
        .args(["--title", "Ownership", "--order", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --created-by"));

    practicum(dir.path())
        .args(["--demo", "practical", "save"])
        .arg(&file)
        .args(["--title", "Ownership", "--order", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved \"Ownership\""));
}
