//! End-to-end workflows: dataset file to persisted artifacts to predictions.

use learnstyle::artifacts::ArtifactRegistry;
use learnstyle::features::{AnswerKind, AnswerSet, RawAnswers, QUESTIONS};
use learnstyle::logbook::PredictionLog;
use learnstyle::prelude::*;
use learnstyle::tree::{Leaf, Node, TreeNode};
use std::fmt::Write as _;
use tempfile::TempDir;

/// Writes a 45-row dataset where each style has one dominant feature.
fn write_dataset(dir: &TempDir) -> std::path::PathBuf {
    let mut csv = String::from(
        "StudentID,AcademicScore,CourseParticipation,AttendanceRate,PhysicalActivity,EmotionalEngagement,LearningStyle\n",
    );
    for i in 0..45 {
        let jitter = (i % 15) as f64 * 0.01;
        let low = 0.15 + jitter;
        let high = 0.75 + jitter;
        let (values, label) = match i % 3 {
            0 => ([high, low, low, low, low], "Visual"),
            1 => ([low, low, low, low, high], "Auditory"),
            _ => ([low, low, low, high, low], "Kinesthetic"),
        };
        let cells: Vec<String> = values.iter().map(|v| format!("{v:.3}")).collect();
        writeln!(csv, "S{i:03},{},{label}", cells.join(",")).expect("write to string");
    }
    let path = dir.path().join("dataset.csv");
    std::fs::write(&path, csv).expect("write dataset");
    path
}

fn answers(likert: u8, yes_no: &str) -> AnswerSet {
    let mut raw = RawAnswers::default();
    for q in &QUESTIONS {
        let slot = raw.slot_mut(q.field).expect("known field");
        *slot = match q.kind {
            AnswerKind::Likert => likert.to_string(),
            AnswerKind::YesNo => yes_no.to_string(),
        };
    }
    raw.parse().expect("valid answers")
}

#[test]
fn test_train_persist_load_predict() {
    let dir = TempDir::new().expect("tempdir");
    let dataset = TrainingDataset::from_csv(write_dataset(&dir)).expect("load dataset");
    assert_eq!(dataset.len(), 45);
    assert!(dataset.class_distribution().values().all(|&n| n == 15));

    let run = Trainer::default().fit(&dataset).expect("training");
    assert_eq!(run.split_sizes(), (31, 14));
    assert!(run.evaluation().accuracy() >= 0.9);

    let store = ArtifactStore::new(dir.path().join("models"));
    let version = ArtifactVersion::new("20250102_030405").expect("valid tag");
    let paths = store.persist(&run, &version).expect("persist");
    assert!(paths.rules.is_file());
    assert!(paths.summary.is_file());

    let registry = ArtifactRegistry::scan(store.dir()).expect("scan");
    assert_eq!(registry.latest(), Some(&version));

    let resolved = store.resolve(None).expect("latest version");
    let predictor = Predictor::load(&store, &resolved).expect("load predictor");
    assert_eq!(predictor.version(), Some(&version));

    let visual = FeatureVector::from_array([0.85, 0.2, 0.2, 0.2, 0.2]);
    let result = predictor.predict(&visual).expect("predict");
    assert_eq!(result.dominant(), Some(LearningStyle::Visual));
    let total: f64 = result.ranked().iter().map(|s| s.probability).sum();
    assert!((total - 1.0).abs() < 1e-9);

    // Reloaded artifacts give the same answer as the in-memory run.
    let in_memory = Predictor::new(run.model().clone(), run.scaler().clone()).expect("predictor");
    assert_eq!(in_memory.predict(&visual).expect("predict"), result);
}

#[test]
fn test_second_run_gets_new_version_and_becomes_latest() {
    let dir = TempDir::new().expect("tempdir");
    let dataset = TrainingDataset::from_csv(write_dataset(&dir)).expect("load dataset");
    let store = ArtifactStore::new(dir.path());

    let first = ArtifactVersion::new("20250101_120000").expect("valid tag");
    let second = ArtifactVersion::new("20250101_120001").expect("valid tag");
    let trainer = Trainer::new(TrainingConfig::default().with_random_state(7));
    store.persist(&trainer.fit(&dataset).expect("fit"), &first).expect("persist");
    store.persist(&trainer.fit(&dataset).expect("fit"), &second).expect("persist");

    let registry = store.registry().expect("registry");
    assert_eq!(registry.versions(), &[first.clone(), second.clone()]);
    assert_eq!(store.resolve(None).expect("latest"), second);
    assert_eq!(store.resolve(Some(&first)).expect("pinned"), first);
}

#[test]
fn test_missing_artifacts_reported() {
    let dir = TempDir::new().expect("tempdir");
    let store = ArtifactStore::new(dir.path().join("models"));
    assert!(matches!(
        store.resolve(None),
        Err(LearnStyleError::ArtifactNotFound { .. })
    ));
}

#[test]
fn test_neutral_answers_through_fixture_tree() {
    let answers = answers(3, "tidak");
    let features = FeatureVector::from_answers(&answers);
    assert!((features.academic_score - 0.5).abs() < 1e-12);
    assert!((features.course_participation - 0.25).abs() < 1e-12);
    assert!((features.attendance_rate - 0.5).abs() < 1e-12);
    assert!((features.physical_activity - 1.0 / 3.0).abs() < 1e-12);
    assert!((features.emotional_engagement - 0.5).abs() < 1e-12);

    // CourseParticipation <= 0.3, then PhysicalActivity <= 0.4.
    let root = TreeNode::Internal(Node {
        feature_idx: 1,
        threshold: 0.3,
        n_samples: 13,
        impurity: 0.5,
        left: Box::new(TreeNode::Internal(Node {
            feature_idx: 3,
            threshold: 0.4,
            n_samples: 8,
            impurity: 0.4,
            left: Box::new(TreeNode::Leaf(Leaf::new(vec![2, 1, 1]))),
            right: Box::new(TreeNode::Leaf(Leaf::new(vec![0, 4, 0]))),
        })),
        right: Box::new(TreeNode::Leaf(Leaf::new(vec![0, 0, 5]))),
    });
    let model = DecisionTreeClassifier::from_tree(root, 5, 3).expect("valid tree");

    // Identity scaling: every column spans [0, 1].
    let mut scaler = MinMaxScaler::new();
    scaler
        .fit(&Matrix::from_vec(2, 5, vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0]).expect("2x5"))
        .expect("fit scaler");

    let path = model.decision_path(&features.to_array()).expect("path");
    assert_eq!(path.len(), 2);
    assert_eq!((path[0].feature_idx, path[0].went_left), (1, true));
    assert_eq!((path[1].feature_idx, path[1].went_left), (3, true));

    let predictor = Predictor::new(model, scaler).expect("predictor");
    let result = predictor.predict_answers(&answers).expect("predict");
    assert_eq!(result.probability(LearningStyle::Auditory), 0.5);
    assert_eq!(result.probability(LearningStyle::Kinesthetic), 0.25);
    assert_eq!(result.probability(LearningStyle::Visual), 0.25);
    assert_eq!(result.top_styles(), &[LearningStyle::Auditory]);
    assert!(!result.is_tie());
}

#[test]
fn test_prediction_log_accumulates_rows() {
    let dir = TempDir::new().expect("tempdir");
    let dataset = TrainingDataset::from_csv(write_dataset(&dir)).expect("load dataset");
    let run = Trainer::default().fit(&dataset).expect("training");
    let predictor = Predictor::new(run.model().clone(), run.scaler().clone()).expect("predictor");

    let log = PredictionLog::new(dir.path().join("logs").join("predictions.csv"));
    for (likert, yes_no) in [(1, "tidak"), (3, "ya"), (5, "ya")] {
        let answers = answers(likert, yes_no);
        let result = predictor.predict_answers(&answers).expect("predict");
        log.append(&answers, &result).expect("append");
    }
    assert_eq!(log.count_rows().expect("rows"), 3);
}
