//! Append-only CSV log of predictions.
//!
//! One row per prediction: local timestamp, the eleven answers normalized
//! to `[0, 1]`, the five features and the predicted style(s). The header is
//! written only when the file is created.

use crate::error::Result;
use crate::features::AnswerSet;
use crate::predict::PredictionResult;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Timestamp layout of log rows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the prediction log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
    /// Note-taking, normalized
    pub catatan: f64,
    /// Diagrams and pictures, normalized
    pub diagram: f64,
    /// Reading, normalized
    pub baca: f64,
    /// Listening, normalized
    pub mendengarkan: f64,
    /// Discussion, 1.0 for yes
    pub diskusi: f64,
    /// Recordings, normalized
    pub rekaman: f64,
    /// Hands-on practice, 1.0 for yes
    pub praktik: f64,
    /// Trying it yourself, normalized
    pub mencoba: f64,
    /// Boredom sitting still, normalized
    pub bosan: f64,
    /// Attendance, normalized
    pub hadir: f64,
    /// Class participation, normalized
    pub aktif: f64,
    /// Derived `AcademicScore`
    #[serde(rename = "AcademicScore")]
    pub academic_score: f64,
    /// Derived `CourseParticipation`
    #[serde(rename = "CourseParticipation")]
    pub course_participation: f64,
    /// Derived `AttendanceRate`
    #[serde(rename = "AttendanceRate")]
    pub attendance_rate: f64,
    /// Derived `PhysicalActivity`
    #[serde(rename = "PhysicalActivity")]
    pub physical_activity: f64,
    /// Derived `EmotionalEngagement`
    #[serde(rename = "EmotionalEngagement")]
    pub emotional_engagement: f64,
    /// Top styles joined by ", "
    pub predicted: String,
}

impl LogRecord {
    /// Builds the row for one answered questionnaire.
    #[must_use]
    pub fn new(at: DateTime<Local>, answers: &AnswerSet, result: &PredictionResult) -> Self {
        let f = result.features();
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            catatan: answers.catatan.normalized(),
            diagram: answers.diagram.normalized(),
            baca: answers.baca.normalized(),
            mendengarkan: answers.mendengarkan.normalized(),
            diskusi: answers.diskusi.as_f64(),
            rekaman: answers.rekaman.normalized(),
            praktik: answers.praktik.as_f64(),
            mencoba: answers.mencoba.normalized(),
            bosan: answers.bosan.normalized(),
            hadir: answers.hadir.normalized(),
            aktif: answers.aktif.normalized(),
            academic_score: f.academic_score,
            course_participation: f.course_participation,
            attendance_rate: f.attendance_rate,
            physical_activity: f.physical_activity,
            emotional_engagement: f.emotional_engagement,
            predicted: result.top_styles_label(),
        }
    }
}

/// CSV file that prediction rows are appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionLog {
    path: PathBuf,
}

impl PredictionLog {
    /// Log at `path`; the file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns an I/O or CSV error if the file cannot be written.
    pub fn append(&self, answers: &AnswerSet, result: &PredictionResult) -> Result<()> {
        self.append_record(&LogRecord::new(Local::now(), answers, result))
    }

    /// Appends a prepared row.
    ///
    /// # Errors
    ///
    /// Returns an I/O or CSV error if the file cannot be written.
    pub fn append_record(&self, record: &LogRecord) -> Result<()> {
        let is_new = self.path.metadata().map_or(true, |m| m.len() == 0);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        tracing::debug!(path = %self.path.display(), predicted = %record.predicted, "prediction logged");
        Ok(())
    }

    /// Number of rows logged so far (header excluded).
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn count_rows(&self) -> Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut n = 0;
        for row in reader.records() {
            row?;
            n += 1;
        }
        Ok(n)
    }
}
