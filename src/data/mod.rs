//! Training dataset loading.
//!
//! The dataset is a CSV file with a header row holding a `StudentID`
//! column, a `LearningStyle` label column and the five feature columns of
//! [`FEATURE_NAMES`]. Column order does not matter; columns outside that
//! set are ignored with a warning.

use crate::error::{LearnStyleError, Result};
use crate::features::{FeatureVector, FEATURE_NAMES, N_FEATURES};
use crate::primitives::Matrix;
use crate::style::LearningStyle;
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Name of the identifier column.
pub const ID_COLUMN: &str = "StudentID";

/// Name of the label column.
pub const LABEL_COLUMN: &str = "LearningStyle";

/// One labelled row of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique student identifier
    pub student_id: String,
    /// Pre-scaling feature values
    pub features: FeatureVector,
    /// Target label
    pub label: LearningStyle,
}

/// Labelled feature rows keyed by student identifier.
///
/// # Examples
///
/// ```
/// use learnstyle::data::TrainingDataset;
///
/// let csv = "\
/// StudentID,AcademicScore,CourseParticipation,AttendanceRate,PhysicalActivity,EmotionalEngagement,LearningStyle
/// S1,0.9,0.2,0.8,0.1,0.3,Visual
/// S2,0.1,0.4,0.6,0.9,0.2,Kinesthetic
/// ";
/// let ds = TrainingDataset::from_reader(csv.as_bytes(), "inline.csv").expect("valid csv");
/// assert_eq!(ds.len(), 2);
/// assert_eq!(ds.feature_matrix().shape(), (2, 5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingDataset {
    records: Vec<Record>,
    source: PathBuf,
}

impl TrainingDataset {
    /// Builds a dataset from records already in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no records, an identifier repeats, or a
    /// feature value is not finite.
    pub fn new(records: Vec<Record>) -> Result<Self> {
        let source = PathBuf::from("<memory>");
        Self::validate(&records, &source)?;
        Ok(Self { records, source })
    }

    /// Loads a dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::Dataset`] naming the file when it cannot
    /// be opened, a required column is missing, or a row is malformed.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            LearnStyleError::dataset(path, format!("failed to open dataset: {e}"))
        })?;
        Self::from_reader(file, path)
    }

    /// Loads a dataset from any CSV source; `source` is used in messages.
    ///
    /// # Errors
    ///
    /// Same as [`TrainingDataset::from_csv`].
    pub fn from_reader<R: Read>(reader: R, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| LearnStyleError::dataset(&source, format!("failed to read header: {e}")))?
            .clone();
        let layout = ColumnLayout::resolve(&headers, &source)?;

        let mut records = Vec::new();
        for (row_idx, row) in reader.records().enumerate() {
            // Header is line 1.
            let line = row_idx + 2;
            let row = row.map_err(|e| {
                LearnStyleError::dataset(&source, format!("line {line}: {e}"))
            })?;
            records.push(layout.parse_row(&row, line, &source)?);
        }

        Self::validate(&records, &source)?;
        tracing::info!(
            rows = records.len(),
            source = %source.display(),
            "dataset loaded"
        );
        Ok(Self { records, source })
    }

    fn validate(records: &[Record], source: &Path) -> Result<()> {
        if records.is_empty() {
            return Err(LearnStyleError::dataset(source, "dataset has no rows"));
        }
        let mut seen = HashSet::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.student_id.as_str()) {
                return Err(LearnStyleError::dataset(
                    source,
                    format!("duplicate {ID_COLUMN} '{}'", record.student_id),
                ));
            }
            if let Some((name, value)) = FEATURE_NAMES
                .iter()
                .zip(record.features.to_array())
                .find(|(_, v)| !v.is_finite())
            {
                return Err(LearnStyleError::dataset(
                    source,
                    format!("{ID_COLUMN} '{}': {name} is not finite ({value})", record.student_id),
                ));
            }
        }
        Ok(())
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows. Always false for a loaded dataset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Where the rows came from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// All rows in file order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Feature matrix in canonical column order, one row per record.
    #[must_use]
    pub fn feature_matrix(&self) -> Matrix<f64> {
        let mut m = Matrix::zeros(self.records.len(), N_FEATURES);
        for (i, record) in self.records.iter().enumerate() {
            for (j, v) in record.features.to_array().into_iter().enumerate() {
                m.set(i, j, v);
            }
        }
        m
    }

    /// Class index of every row (see [`LearningStyle::index`]).
    #[must_use]
    pub fn label_indices(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.label.index()).collect()
    }

    /// Number of rows per label.
    #[must_use]
    pub fn class_distribution(&self) -> BTreeMap<LearningStyle, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.label).or_insert(0) += 1;
        }
        counts
    }
}

/// Positions of the known columns in the header.
struct ColumnLayout {
    id: Option<usize>,
    label: usize,
    features: [usize; N_FEATURES],
}

impl ColumnLayout {
    fn resolve(headers: &csv::StringRecord, source: &Path) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let mut missing = Vec::new();
        let label = position(LABEL_COLUMN);
        if label.is_none() {
            missing.push(LABEL_COLUMN);
        }
        let mut features = [0usize; N_FEATURES];
        for (slot, name) in features.iter_mut().zip(FEATURE_NAMES) {
            match position(name) {
                Some(idx) => *slot = idx,
                None => missing.push(name),
            }
        }
        let Some(label) = label.filter(|_| missing.is_empty()) else {
            return Err(LearnStyleError::dataset(
                source,
                format!("missing required column(s): {}", missing.join(", ")),
            ));
        };

        let id = position(ID_COLUMN);
        if id.is_none() {
            tracing::warn!(
                source = %source.display(),
                "no {ID_COLUMN} column; using row numbers as identifiers"
            );
        }

        let ignored: Vec<&str> = headers
            .iter()
            .filter(|h| *h != ID_COLUMN && *h != LABEL_COLUMN && !FEATURE_NAMES.contains(h))
            .collect();
        if !ignored.is_empty() {
            tracing::warn!(
                source = %source.display(),
                columns = %ignored.join(", "),
                "ignoring columns outside the feature set"
            );
        }

        Ok(Self { id, label, features })
    }

    fn parse_row(&self, row: &csv::StringRecord, line: usize, source: &Path) -> Result<Record> {
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let student_id = match self.id {
            Some(idx) if !field(idx).is_empty() => field(idx).to_string(),
            Some(_) => {
                return Err(LearnStyleError::dataset(
                    source,
                    format!("line {line}: empty {ID_COLUMN}"),
                ))
            }
            None => (line - 1).to_string(),
        };

        let label = field(self.label).parse::<LearningStyle>().map_err(|_| {
            LearnStyleError::dataset(
                source,
                format!(
                    "line {line}: unknown {LABEL_COLUMN} '{}' (expected Visual, Auditory or Kinesthetic)",
                    field(self.label)
                ),
            )
        })?;

        let mut values = [0.0; N_FEATURES];
        for ((value, &idx), name) in values.iter_mut().zip(&self.features).zip(FEATURE_NAMES) {
            let raw = field(idx);
            *value = raw.parse::<f64>().map_err(|_| {
                LearnStyleError::dataset(
                    source,
                    format!("line {line}: {name} is not a number ('{raw}')"),
                )
            })?;
        }

        Ok(Record {
            student_id,
            features: FeatureVector::from_array(values),
            label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "StudentID,AcademicScore,CourseParticipation,AttendanceRate,PhysicalActivity,EmotionalEngagement,LearningStyle";

    fn load(body: &str) -> Result<TrainingDataset> {
        let text = format!("{HEADER}\n{body}");
        TrainingDataset::from_reader(text.as_bytes(), "test.csv")
    }

    #[test]
    fn test_load_rows_in_order() {
        let ds = load("S1,0.9,0.2,0.8,0.1,0.3,Visual\nS2,0.1,0.4,0.6,0.9,0.2,kinesthetic\n")
            .expect("valid");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].student_id, "S1");
        assert_eq!(ds.records()[1].label, LearningStyle::Kinesthetic);
        assert_eq!(ds.label_indices(), vec![2, 1]);

        let x = ds.feature_matrix();
        assert_eq!(x.row(0), &[0.9, 0.2, 0.8, 0.1, 0.3]);
    }

    #[test]
    fn test_column_order_is_free() {
        let text = "LearningStyle,EmotionalEngagement,PhysicalActivity,AttendanceRate,CourseParticipation,AcademicScore,StudentID\n\
                    Auditory,0.5,0.4,0.3,0.2,0.1,A7\n";
        let ds = TrainingDataset::from_reader(text.as_bytes(), "t.csv").expect("valid");
        assert_eq!(ds.feature_matrix().row(0), &[0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(ds.records()[0].student_id, "A7");
    }

    #[test]
    fn test_missing_columns_are_named() {
        let text = "StudentID,AcademicScore,AttendanceRate\nS1,0.1,0.2\n";
        let err = TrainingDataset::from_reader(text.as_bytes(), "gaya.csv").unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, LearnStyleError::Dataset { .. }));
        assert!(msg.contains("gaya.csv"));
        assert!(msg.contains("LearningStyle"));
        assert!(msg.contains("CourseParticipation"));
        assert!(msg.contains("EmotionalEngagement"));
        assert!(!msg.contains("AcademicScore"));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let text = format!("{HEADER},Notes\nS1,0.1,0.2,0.3,0.4,0.5,Visual,likes maps\n");
        let ds = TrainingDataset::from_reader(text.as_bytes(), "t.csv").expect("valid");
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_missing_id_column_uses_row_numbers() {
        let text = "AcademicScore,CourseParticipation,AttendanceRate,PhysicalActivity,EmotionalEngagement,LearningStyle\n\
                    0.1,0.2,0.3,0.4,0.5,Visual\n0.5,0.4,0.3,0.2,0.1,Auditory\n";
        let ds = TrainingDataset::from_reader(text.as_bytes(), "t.csv").expect("valid");
        assert_eq!(ds.records()[0].student_id, "1");
        assert_eq!(ds.records()[1].student_id, "2");
    }

    #[test]
    fn test_bad_values_report_line() {
        let err = load("S1,0.1,0.2,0.3,0.4,0.5,Visual\nS2,abc,0.2,0.3,0.4,0.5,Visual\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 3"), "{msg}");
        assert!(msg.contains("AcademicScore"));

        let err = load("S1,0.1,0.2,0.3,0.4,0.5,Reading\n").unwrap_err();
        assert!(err.to_string().contains("Reading"));

        let err = load("S1,NaN,0.2,0.3,0.4,0.5,Visual\n").unwrap_err();
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = load("S1,0.1,0.2,0.3,0.4,0.5,Visual\nS1,0.2,0.2,0.3,0.4,0.5,Auditory\n").unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert!(load("").is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = TrainingDataset::from_csv("/nonexistent/gaya_belajar.csv").unwrap_err();
        assert!(err.to_string().contains("gaya_belajar.csv"));
    }

    #[test]
    fn test_class_distribution() {
        let ds = load(
            "S1,0.1,0.2,0.3,0.4,0.5,Visual\nS2,0.1,0.2,0.3,0.4,0.5,Visual\nS3,0.1,0.2,0.3,0.4,0.5,Auditory\n",
        )
        .expect("valid");
        let dist = ds.class_distribution();
        assert_eq!(dist[&LearningStyle::Visual], 2);
        assert_eq!(dist[&LearningStyle::Auditory], 1);
        assert!(!dist.contains_key(&LearningStyle::Kinesthetic));
    }

    #[test]
    fn test_new_validates_records() {
        let rec = Record {
            student_id: "X".into(),
            features: FeatureVector::from_array([0.5; N_FEATURES]),
            label: LearningStyle::Visual,
        };
        assert!(TrainingDataset::new(vec![rec.clone()]).is_ok());
        assert!(TrainingDataset::new(vec![rec.clone(), rec]).is_err());
        assert!(TrainingDataset::new(Vec::new()).is_err());
    }
}
