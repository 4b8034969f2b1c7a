//! CLI integration tests for the learnstyle binary.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fmt::Write as _;
use tempfile::TempDir;

fn learnstyle() -> Command {
    Command::cargo_bin("learnstyle").expect("Failed to find learnstyle binary")
}

fn write_dataset(dir: &TempDir) -> std::path::PathBuf {
    let mut csv = String::from(
        "StudentID,AcademicScore,CourseParticipation,AttendanceRate,PhysicalActivity,EmotionalEngagement,LearningStyle\n",
    );
    for i in 0..30 {
        let low = 0.1 + (i % 10) as f64 * 0.01;
        let high = 0.8 + (i % 10) as f64 * 0.01;
        let (values, label) = match i % 3 {
            0 => ([high, low, low, low, low], "Visual"),
            1 => ([low, high, low, low, high], "Auditory"),
            _ => ([low, low, low, high, low], "Kinesthetic"),
        };
        let cells: Vec<String> = values.iter().map(|v| format!("{v:.2}")).collect();
        writeln!(csv, "S{i},{},{label}", cells.join(",")).unwrap();
    }
    let path = dir.path().join("students.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

const ANSWERS: [&str; 22] = [
    "--catatan", "5", "--diagram", "5", "--baca", "4", "--mendengarkan", "1", "--diskusi", "tidak",
    "--rekaman", "1", "--praktik", "tidak", "--mencoba", "2", "--bosan", "1", "--hadir", "4",
    "--aktif", "2",
];

#[test]
fn test_help_lists_subcommands() {
    learnstyle()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("predict"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("versions"));
}

#[test]
fn test_predict_without_artifacts_suggests_train() {
    let dir = TempDir::new().unwrap();
    learnstyle()
        .args(["--quiet", "predict", "--artifacts"])
        .arg(dir.path().join("models"))
        .args(ANSWERS)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("learnstyle train"));
}

#[test]
fn test_invalid_answer_exit_code() {
    let dir = TempDir::new().unwrap();
    let mut args = ANSWERS.to_vec();
    args[1] = "9";
    learnstyle()
        .args(["--quiet", "predict", "--artifacts"])
        .arg(dir.path())
        .args(args)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("catatan"));
}

#[test]
fn test_train_then_predict_and_list() {
    let dir = TempDir::new().unwrap();
    let data = write_dataset(&dir);
    let models = dir.path().join("models");

    let out = learnstyle()
        .args(["--quiet", "--json", "train", "--data"])
        .arg(&data)
        .arg("--out-dir")
        .arg(&models)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let trained: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(trained["n_test"], 9);
    let version = trained["version"].as_str().unwrap().to_string();

    let log = dir.path().join("log.csv");
    let out = learnstyle()
        .args(["--quiet", "--json", "predict", "--artifacts"])
        .arg(&models)
        .args(["--version", &version])
        .args(ANSWERS)
        .arg("--log")
        .arg(&log)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let predicted: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(predicted["version"], version.as_str());
    assert_eq!(predicted["ranked"].as_array().unwrap().len(), 3);
    assert_eq!(std::fs::read_to_string(&log).unwrap().lines().count(), 2);

    learnstyle()
        .args(["--quiet", "versions", "--artifacts"])
        .arg(&models)
        .assert()
        .success()
        .stdout(predicate::str::contains(version.as_str()))
        .stdout(predicate::str::contains("(latest)"));
}
