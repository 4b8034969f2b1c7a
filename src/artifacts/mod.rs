//! Versioned persistence of training runs.
//!
//! Every run is stored under one version tag `T` (local time,
//! `%Y%m%d_%H%M%S`) as five files:
//!
//! | File                          | Content                              |
//! |-------------------------------|--------------------------------------|
//! | `learning_style_model_<T>.bin`| fitted tree (bincode)                |
//! | `scaler_<T>.bin`              | fitted scaler (bincode)              |
//! | `learning_rules_<T>.txt`      | rule dump                            |
//! | `model_metrics_<T>.txt`       | accuracy, report, confusion matrix   |
//! | `model_summary_<T>.csv`       | one-row manifest                     |
//!
//! Versions are never overwritten. Selection goes through an
//! [`ArtifactRegistry`], an ordered list of complete versions whose last
//! entry is the latest.

use crate::error::{LearnStyleError, Result};
use crate::preprocessing::MinMaxScaler;
use crate::training::TrainingRun;
use crate::tree::DecisionTreeClassifier;
use chrono::{Local, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// `chrono` layout of version tags.
pub const VERSION_FORMAT: &str = "%Y%m%d_%H%M%S";

const MODEL_PREFIX: &str = "learning_style_model_";
const SCALER_PREFIX: &str = "scaler_";
const RULES_PREFIX: &str = "learning_rules_";
const METRICS_PREFIX: &str = "model_metrics_";
const SUMMARY_PREFIX: &str = "model_summary_";
const BINARY_EXT: &str = ".bin";

/// Version tag shared by all artifacts of one training run.
///
/// Ordering is lexicographic on the tag, which for this layout is also
/// chronological.
///
/// ```
/// use learnstyle::artifacts::ArtifactVersion;
///
/// let older: ArtifactVersion = "20240101_090000".parse().expect("valid tag");
/// let newer: ArtifactVersion = "20240315_142501".parse().expect("valid tag");
/// assert!(older < newer);
/// assert!("2024-01-01".parse::<ArtifactVersion>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactVersion(String);

impl ArtifactVersion {
    /// Tag for the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self(Local::now().format(VERSION_FORMAT).to_string())
    }

    /// Tag for a given timestamp; sub-second precision is dropped.
    #[must_use]
    pub fn from_timestamp(at: NaiveDateTime) -> Self {
        Self(at.format(VERSION_FORMAT).to_string())
    }

    /// The tag one second later.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.timestamp()
            .and_then(|t| t.checked_add_signed(TimeDelta::seconds(1)))
            .map(Self::from_timestamp)
    }

    /// Validates a tag.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::InvalidVersion`] unless `tag` is a valid
    /// `%Y%m%d_%H%M%S` timestamp.
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        // Length check rejects single-digit fields that chrono would accept.
        if tag.len() != 15 || NaiveDateTime::parse_from_str(&tag, VERSION_FORMAT).is_err() {
            return Err(LearnStyleError::InvalidVersion { tag });
        }
        Ok(Self(tag))
    }

    /// The raw tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The timestamp the tag encodes.
    #[must_use]
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.0, VERSION_FORMAT).ok()
    }
}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ArtifactVersion {
    type Err = LearnStyleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ArtifactVersion {
    type Error = LearnStyleError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<ArtifactVersion> for String {
    fn from(v: ArtifactVersion) -> Self {
        v.0
    }
}

/// Paths of the five files of one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Fitted tree
    pub model: PathBuf,
    /// Fitted scaler
    pub scaler: PathBuf,
    /// Rule dump
    pub rules: PathBuf,
    /// Metrics report
    pub metrics: PathBuf,
    /// One-row manifest
    pub summary: PathBuf,
}

impl ArtifactPaths {
    fn all(&self) -> [&Path; 5] {
        [
            &self.model,
            &self.scaler,
            &self.rules,
            &self.metrics,
            &self.summary,
        ]
    }
}

/// One-row manifest written next to each version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Model file name
    pub model_file: String,
    /// Scaler file name
    pub scaler_file: String,
    /// Rule dump file name
    pub rules_file: String,
    /// Metrics file name
    pub metrics_file: String,
    /// Test-set accuracy
    pub accuracy: f64,
    /// Version tag
    pub created_at: String,
}

/// Directory holding versioned artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Store rooted at `dir`; the directory is created on first persist.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File paths of `version`.
    #[must_use]
    pub fn paths(&self, version: &ArtifactVersion) -> ArtifactPaths {
        let tag = version.as_str();
        ArtifactPaths {
            model: self.dir.join(format!("{MODEL_PREFIX}{tag}{BINARY_EXT}")),
            scaler: self.dir.join(format!("{SCALER_PREFIX}{tag}{BINARY_EXT}")),
            rules: self.dir.join(format!("{RULES_PREFIX}{tag}.txt")),
            metrics: self.dir.join(format!("{METRICS_PREFIX}{tag}.txt")),
            summary: self.dir.join(format!("{SUMMARY_PREFIX}{tag}.csv")),
        }
    }

    /// A fresh tag for a new run: the current time, moved forward one
    /// second at a time past the latest registered version and past any tag
    /// with leftover files.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be listed.
    pub fn next_version(&self) -> Result<ArtifactVersion> {
        self.next_version_from(ArtifactVersion::now())
    }

    fn next_version_from(&self, start: ArtifactVersion) -> Result<ArtifactVersion> {
        let registry = self.registry()?;
        let mut candidate = match registry.latest() {
            Some(latest) if *latest >= start => latest.clone(),
            _ => start,
        };
        while registry.contains(&candidate) || self.is_occupied(&candidate) {
            candidate = candidate.next().ok_or_else(|| LearnStyleError::InvalidVersion {
                tag: candidate.to_string(),
            })?;
        }
        Ok(candidate)
    }

    fn is_occupied(&self, version: &ArtifactVersion) -> bool {
        self.paths(version).all().into_iter().any(occupied)
    }

    /// Writes all artifacts of `run` under `version`.
    ///
    /// Nothing is written if any target path is already taken, and files
    /// written before a failure are removed again. The model goes last, so
    /// [`ArtifactRegistry::scan`] never sees a version before it is complete.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::ArtifactExists`] for an existing target,
    /// or an I/O or serialization error.
    pub fn persist(&self, run: &TrainingRun, version: &ArtifactVersion) -> Result<ArtifactPaths> {
        let paths = self.paths(version);
        if let Some(existing) = paths.all().into_iter().find(|p| occupied(p)) {
            return Err(LearnStyleError::ArtifactExists {
                path: existing.to_path_buf(),
            });
        }

        let summary = SummaryRecord {
            model_file: file_name(&paths.model),
            scaler_file: file_name(&paths.scaler),
            rules_file: file_name(&paths.rules),
            metrics_file: file_name(&paths.metrics),
            accuracy: run.evaluation().accuracy(),
            created_at: version.to_string(),
        };
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&summary)?;
        let summary_bytes = writer
            .into_inner()
            .map_err(|e| LearnStyleError::Io(e.into_error()))?;
        let model_bytes = bincode::serialize(run.model())?;
        let scaler_bytes = bincode::serialize(run.scaler())?;
        let rules = run.rules();
        let metrics = run.metrics_text();

        fs::create_dir_all(&self.dir)?;
        write_all_or_none(&[
            (paths.rules.as_path(), rules.as_bytes()),
            (paths.metrics.as_path(), metrics.as_bytes()),
            (paths.summary.as_path(), summary_bytes.as_slice()),
            (paths.scaler.as_path(), scaler_bytes.as_slice()),
            (paths.model.as_path(), model_bytes.as_slice()),
        ])?;

        tracing::info!(
            version = %version,
            dir = %self.dir.display(),
            accuracy = summary.accuracy,
            "artifacts persisted"
        );
        Ok(paths)
    }

    /// Loads the fitted tree of `version`.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::ArtifactNotFound`] if the file is absent,
    /// or an error if it does not decode to a consistent tree.
    pub fn load_model(&self, version: &ArtifactVersion) -> Result<DecisionTreeClassifier> {
        let path = self.paths(version).model;
        let bytes = self.read_artifact(&path)?;
        let model: DecisionTreeClassifier = bincode::deserialize(&bytes)?;
        model.validate()?;
        Ok(model)
    }

    /// Loads the fitted scaler of `version`.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::ArtifactNotFound`] if the file is absent.
    pub fn load_scaler(&self, version: &ArtifactVersion) -> Result<MinMaxScaler> {
        let path = self.paths(version).scaler;
        let bytes = self.read_artifact(&path)?;
        Ok(bincode::deserialize(&bytes)?)
    }

    /// Reads the manifest of `version`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is absent or malformed.
    pub fn load_summary(&self, version: &ArtifactVersion) -> Result<SummaryRecord> {
        let path = self.paths(version).summary;
        let bytes = self.read_artifact(&path)?;
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        match reader.deserialize::<SummaryRecord>().next() {
            Some(record) => Ok(record?),
            None => Err(LearnStyleError::ArtifactNotFound { dir: path }),
        }
    }

    /// Registry of the complete versions in this store.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory exists but cannot be listed.
    pub fn registry(&self) -> Result<ArtifactRegistry> {
        ArtifactRegistry::scan(&self.dir)
    }

    /// The version to bind: `pinned` if given and complete, else the latest.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::ArtifactNotFound`] when there is no
    /// matching complete version.
    pub fn resolve(&self, pinned: Option<&ArtifactVersion>) -> Result<ArtifactVersion> {
        let registry = self.registry()?;
        let found = match pinned {
            Some(v) => registry.contains(v).then(|| v.clone()),
            None => registry.latest().cloned(),
        };
        found.ok_or_else(|| LearnStyleError::ArtifactNotFound {
            dir: self.dir.clone(),
        })
    }

    fn read_artifact(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LearnStyleError::ArtifactNotFound {
                dir: path.to_path_buf(),
            },
            _ => LearnStyleError::Io(e),
        })
    }
}

/// Whether anything, even a dangling symlink, sits at `path`.
fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Creates every file or, on the first failure, removes the ones already
/// created and returns that failure.
fn write_all_or_none(files: &[(&Path, &[u8])]) -> Result<()> {
    for (done, (path, bytes)) in files.iter().enumerate() {
        if let Err(e) = write_new(path, bytes) {
            for (written, _) in &files[..done] {
                if let Err(cleanup) = fs::remove_file(written) {
                    tracing::warn!(path = %written.display(), error = %cleanup, "could not remove partial artifact");
                }
            }
            return Err(e);
        }
    }
    Ok(())
}

fn write_new(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => LearnStyleError::ArtifactExists {
                path: path.to_path_buf(),
            },
            _ => LearnStyleError::Io(e),
        })?;
    if let Err(e) = file.write_all(bytes) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e.into());
    }
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "artifact written");
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Ordered set of complete artifact versions.
///
/// ```
/// use learnstyle::artifacts::{ArtifactRegistry, ArtifactVersion};
///
/// let registry = ArtifactRegistry::from_versions([
///     "20240315_142501".parse::<ArtifactVersion>().expect("valid"),
///     "20240101_090000".parse().expect("valid"),
/// ]);
/// assert_eq!(registry.latest().map(|v| v.as_str()), Some("20240315_142501"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactRegistry {
    versions: Vec<ArtifactVersion>,
}

impl ArtifactRegistry {
    /// Registry from an explicit list; duplicates are dropped.
    pub fn from_versions<I: IntoIterator<Item = ArtifactVersion>>(versions: I) -> Self {
        let mut versions: Vec<ArtifactVersion> = versions.into_iter().collect();
        versions.sort();
        versions.dedup();
        Self { versions }
    }

    /// Collects the versions in `dir` that have both a model and a scaler.
    ///
    /// A missing directory yields an empty registry. Files whose tag is not
    /// a valid version are skipped.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be listed.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        let mut versions = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            let Some(tag) = name
                .to_str()
                .and_then(|n| n.strip_prefix(MODEL_PREFIX))
                .and_then(|n| n.strip_suffix(BINARY_EXT))
            else {
                continue;
            };
            let Ok(version) = ArtifactVersion::new(tag) else {
                tracing::debug!(file = ?name, "skipping model file with malformed tag");
                continue;
            };
            if dir.join(format!("{SCALER_PREFIX}{tag}{BINARY_EXT}")).is_file() {
                versions.push(version);
            } else {
                tracing::warn!(version = %version, "model without matching scaler; skipped");
            }
        }
        Ok(Self::from_versions(versions))
    }

    /// Most recent version.
    #[must_use]
    pub fn latest(&self) -> Option<&ArtifactVersion> {
        self.versions.last()
    }

    /// All versions, oldest first.
    #[must_use]
    pub fn versions(&self) -> &[ArtifactVersion] {
        &self.versions
    }

    /// Whether `version` is registered.
    #[must_use]
    pub fn contains(&self, version: &ArtifactVersion) -> bool {
        self.versions.binary_search(version).is_ok()
    }

    /// Number of versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether no version is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
