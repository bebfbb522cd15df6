//! Grade report workflow end-to-end: save with `grade --report`, then
//! compare two attempts with `compare`.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use quizwidget_core::report::GradeReport;
use tempfile::TempDir;

fn quizwidget() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizwidget").unwrap();
    cmd.env_remove("QUIZWIDGET_LOCALE").env("RUST_LOG", "off");
    cmd
}

fn grade_to(path: &Path, answers: &str) {
    quizwidget()
        .args(["grade", "--topic", "quiz-basics", "--answers", answers, "--report"])
        .arg(path)
        .assert()
        .success();
}

#[test]
fn saved_report_matches_grade() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("attempt.json");
    grade_to(&path, "2,1,1");

    let report = GradeReport::load_json(&path).unwrap();
    assert_eq!(report.topic_id, "quiz-basics");
    assert_eq!((report.score, report.total, report.percent), (2, 3, 67));
    let correct: Vec<bool> = report.results.iter().map(|r| r.is_correct).collect();
    assert_eq!(correct, vec![true, false, true]);
}

#[test]
fn incomplete_attempt_writes_no_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("attempt.json");
    grade_to(&path, "2,_,1");
    assert!(!path.exists());
}

#[test]
fn compare_shows_improvement() {
    let dir = TempDir::new().unwrap();
    let before = dir.path().join("before.json");
    let after = dir.path().join("after.json");
    grade_to(&before, "2,1,1");
    grade_to(&after, "2,3,1");

    quizwidget()
        .arg("compare")
        .arg("--baseline")
        .arg(&before)
        .arg("--current")
        .arg(&after)
        .assert()
        .success()
        .stdout(predicate::str::contains("67% -> 100% (+33 points)"))
        .stdout(predicate::str::contains("1 improved, 0 regressed, 2 unchanged"));
}

#[test]
fn compare_fails_on_regression_when_asked() {
    let dir = TempDir::new().unwrap();
    let before = dir.path().join("before.json");
    let after = dir.path().join("after.json");
    grade_to(&before, "2,3,1");
    grade_to(&after, "1,3,1");

    quizwidget()
        .arg("compare")
        .arg("--baseline")
        .arg(&before)
        .arg("--current")
        .arg(&after)
        .arg("--fail-on-regression")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Now incorrect:"));
}

#[test]
fn compare_markdown_and_json() {
    let dir = TempDir::new().unwrap();
    let before = dir.path().join("before.json");
    let after = dir.path().join("after.json");
    grade_to(&before, "1,1,2");
    grade_to(&after, "2,3,1");

    quizwidget()
        .arg("compare")
        .arg("--baseline")
        .arg(&before)
        .arg("--current")
        .arg(&after)
        .args(["--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Progress:** 0% → 100%"));

    let output = quizwidget()
        .arg("compare")
        .arg("--baseline")
        .arg(&before)
        .arg("--current")
        .arg(&after)
        .args(["--format", "json"])
        .output()
        .unwrap();
    let progress: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(progress["delta"], 100);
    assert_eq!(progress["improved"], serde_json::json!([0, 1, 2]));
}

#[test]
fn compare_nonexistent_report() {
    quizwidget()
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}
