//! Subcommand implementations.

pub(crate) mod ask;
pub(crate) mod predict;
pub(crate) mod train;
pub(crate) mod versions;

use crate::error::Result;
use learnstyle::artifacts::{ArtifactStore, ArtifactVersion};
use learnstyle::features::AnswerSet;
use learnstyle::logbook::PredictionLog;
use learnstyle::predict::{PredictionResult, Predictor};
use std::path::Path;

/// Loads the pinned version, or the latest one in `dir`.
pub(crate) fn open_predictor(dir: &Path, pinned: Option<&str>) -> Result<Predictor> {
    let store = ArtifactStore::new(dir);
    let pinned = pinned.map(ArtifactVersion::new).transpose()?;
    let version = store.resolve(pinned.as_ref())?;
    tracing::debug!(version = %version, dir = %dir.display(), "using artifacts");
    Ok(Predictor::load(&store, &version)?)
}

/// Appends the prediction to the log file when one was requested.
pub(crate) fn maybe_log(log: Option<&Path>, answers: &AnswerSet, result: &PredictionResult) -> Result<()> {
    if let Some(path) = log {
        PredictionLog::new(path).append(answers, result)?;
    }
    Ok(())
}
