//! Train command: fit, evaluate and persist a new artifact version.

use crate::error::{CliError, Result};
use crate::output;
use learnstyle::artifacts::{ArtifactPaths, ArtifactStore};
use learnstyle::config::TrainingConfig;
use learnstyle::data::TrainingDataset;
use learnstyle::preprocessing::DegeneratePolicy;
use learnstyle::training::Trainer;
use std::path::{Path, PathBuf};

/// Options of the train command after parsing.
#[derive(Debug, Clone)]
pub(crate) struct TrainOptions {
    pub data: PathBuf,
    pub out_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub max_depth: Option<usize>,
    pub test_size: Option<f64>,
    pub seed: Option<u64>,
    pub strict_scaling: bool,
}

impl TrainOptions {
    /// File config (or defaults) with command-line overrides applied.
    fn training_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::load_from_file(path)?,
            None => TrainingConfig::default(),
        };
        if let Some(depth) = self.max_depth {
            config = config.with_max_depth(depth);
        }
        if let Some(test_size) = self.test_size {
            config = config.with_test_size(test_size);
        }
        if let Some(seed) = self.seed {
            config = config.with_random_state(seed);
        }
        if self.strict_scaling {
            config = config.with_degenerate_policy(DegeneratePolicy::Reject);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Run the train command
pub(crate) fn run(opts: &TrainOptions, json: bool) -> Result<()> {
    if !opts.data.is_file() {
        return Err(CliError::FileNotFound(opts.data.clone()));
    }
    let config = opts.training_config()?;
    let dataset = TrainingDataset::from_csv(&opts.data)?;
    let run = Trainer::new(config).fit(&dataset)?;

    let store = ArtifactStore::new(&opts.out_dir);
    let version = store.next_version()?;
    let paths = store.persist(&run, &version)?;
    let (n_train, n_test) = run.split_sizes();

    if json {
        let report = serde_json::json!({
            "version": version,
            "accuracy": run.evaluation().accuracy(),
            "n_train": n_train,
            "n_test": n_test,
            "depth": run.model().depth(),
            "n_leaves": run.model().n_leaves(),
            "artifacts": {
                "model": paths.model,
                "scaler": paths.scaler,
                "rules": paths.rules,
                "metrics": paths.metrics,
                "summary": paths.summary,
            },
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::section("Dataset");
    output::kv("Source", opts.data.display());
    output::kv("Rows", dataset.len());
    for (style, count) in dataset.class_distribution() {
        output::kv(style.name(), count);
    }
    output::kv("Train / test", format!("{n_train} / {n_test}"));

    output::section("Evaluation");
    print!("{}", run.metrics_text());

    output::section("Decision rules (scaled features)");
    print!("{}", run.rules());

    output::section("Artifacts");
    print_paths(&paths);
    output::success(&format!(
        "Saved version {version} (accuracy {:.2}%)",
        run.evaluation().accuracy() * 100.0
    ));
    Ok(())
}

fn print_paths(paths: &ArtifactPaths) {
    let rows: [(&str, &Path); 5] = [
        ("Model", &paths.model),
        ("Scaler", &paths.scaler),
        ("Rules", &paths.rules),
        ("Metrics", &paths.metrics),
        ("Summary", &paths.summary),
    ];
    for (label, path) in rows {
        output::kv(label, path.display());
    }
}
