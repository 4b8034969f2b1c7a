//! Feature construction from raw questionnaire answers.
//!
//! Eleven answers (Likert 1–5 or yes/no) are folded into five
//! non-overlapping features, each in `[0, 1]`:
//!
//! | Feature               | Sources                                   |
//! |-----------------------|-------------------------------------------|
//! | `AcademicScore`       | catatan, diagram, baca                    |
//! | `CourseParticipation` | diskusi (yes/no), aktif                   |
//! | `AttendanceRate`      | hadir                                     |
//! | `PhysicalActivity`    | praktik (yes/no), mencoba, bosan          |
//! | `EmotionalEngagement` | mendengarkan, rekaman, aktif              |
//!
//! # Example
//!
//! ```
//! use learnstyle::features::{AnswerSet, FeatureVector, Likert, YesNo};
//!
//! let three = Likert::new(3).unwrap();
//! let answers = AnswerSet {
//!     catatan: three, diagram: three, baca: three,
//!     mendengarkan: three, diskusi: YesNo::No, rekaman: three,
//!     praktik: YesNo::No, mencoba: three, bosan: three,
//!     hadir: three, aktif: three,
//! };
//! let features = FeatureVector::from_answers(&answers);
//! assert_eq!(features.academic_score, 0.5);
//! assert_eq!(features.course_participation, 0.25);
//! ```

use crate::error::{LearnStyleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of the five features in canonical column order.
pub const FEATURE_NAMES: [&str; 5] = [
    "AcademicScore",
    "CourseParticipation",
    "AttendanceRate",
    "PhysicalActivity",
    "EmotionalEngagement",
];

/// Number of features.
pub const N_FEATURES: usize = FEATURE_NAMES.len();

/// A Likert rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Likert(u8);

impl Likert {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating.
    pub const MAX: u8 = 5;

    /// Validates a rating.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::InvalidInput`] if `value` is outside `1..=5`.
    pub fn new(value: u8) -> Result<Self> {
        Self::for_field("likert", value)
    }

    /// Validates a rating, naming `field` in the error.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::InvalidInput`] if `value` is outside `1..=5`.
    pub fn for_field(field: &str, value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LearnStyleError::invalid_input(
                field,
                value.to_string(),
                "Likert answer must be between 1 and 5",
            ))
        }
    }

    /// Parses a textual rating such as `" 4 "`.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::InvalidInput`] for non-integers or
    /// out-of-range values.
    pub fn parse(field: &str, raw: &str) -> Result<Self> {
        let value: i64 = raw.trim().parse().map_err(|_| {
            LearnStyleError::invalid_input(field, raw, "Likert answer must be an integer 1-5")
        })?;
        u8::try_from(value)
            .map_err(|_| {
                LearnStyleError::invalid_input(field, raw, "Likert answer must be between 1 and 5")
            })
            .and_then(|v| Self::for_field(field, v))
    }

    /// Raw rating.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Rating mapped onto `[0, 1]` as `(value - 1) / 4`.
    #[must_use]
    pub fn normalized(self) -> f64 {
        f64::from(self.0 - Self::MIN) / f64::from(Self::MAX - Self::MIN)
    }
}

impl TryFrom<u8> for Likert {
    type Error = LearnStyleError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Likert> for u8 {
    fn from(value: Likert) -> Self {
        value.0
    }
}

impl fmt::Display for Likert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    /// "ya"
    Yes,
    /// "tidak"
    No,
}

impl YesNo {
    /// Parses a yes/no token, case-insensitively.
    ///
    /// Accepts `ya`, `y`, `yes` and `tidak`, `t`, `no`, `n`.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::InvalidInput`] for any other token.
    pub fn parse(field: &str, raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "ya" | "y" | "yes" => Ok(Self::Yes),
            "tidak" | "t" | "no" | "n" => Ok(Self::No),
            _ => Err(LearnStyleError::invalid_input(
                field,
                raw,
                "answer 'ya' or 'tidak'",
            )),
        }
    }

    /// `1.0` for yes, `0.0` for no.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Yes => 1.0,
            Self::No => 0.0,
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yes => "ya",
            Self::No => "tidak",
        })
    }
}

/// The eleven questionnaire answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    /// How often notes or mind-maps are made.
    pub catatan: Likert,
    /// Ease of understanding diagrams, pictures and colours.
    pub diagram: Likert,
    /// How often reading is the main study source.
    pub baca: Likert,
    /// Ease of understanding spoken explanations.
    pub mendengarkan: Likert,
    /// Enjoys discussing or speaking up in class.
    pub diskusi: YesNo,
    /// How often recordings or podcasts are used.
    pub rekaman: Likert,
    /// Enjoys hands-on practice or experiments.
    pub praktik: YesNo,
    /// Understands better after trying things out.
    pub mencoba: Likert,
    /// Gets bored sitting still while studying.
    pub bosan: Likert,
    /// Class attendance.
    pub hadir: Likert,
    /// Active participation in class or group work.
    pub aktif: Likert,
}

/// The five derived features, pre-scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// mean(catatan, diagram, baca)
    #[serde(rename = "AcademicScore")]
    pub academic_score: f64,
    /// mean(diskusi, aktif)
    #[serde(rename = "CourseParticipation")]
    pub course_participation: f64,
    /// hadir
    #[serde(rename = "AttendanceRate")]
    pub attendance_rate: f64,
    /// mean(praktik, mencoba, bosan)
    #[serde(rename = "PhysicalActivity")]
    pub physical_activity: f64,
    /// mean(mendengarkan, rekaman, aktif)
    #[serde(rename = "EmotionalEngagement")]
    pub emotional_engagement: f64,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

impl FeatureVector {
    /// Derives the feature vector from a complete answer set.
    #[must_use]
    pub fn from_answers(a: &AnswerSet) -> Self {
        Self {
            academic_score: mean(&[
                a.catatan.normalized(),
                a.diagram.normalized(),
                a.baca.normalized(),
            ]),
            course_participation: mean(&[a.diskusi.as_f64(), a.aktif.normalized()]),
            attendance_rate: a.hadir.normalized(),
            physical_activity: mean(&[
                a.praktik.as_f64(),
                a.mencoba.normalized(),
                a.bosan.normalized(),
            ]),
            emotional_engagement: mean(&[
                a.mendengarkan.normalized(),
                a.rekaman.normalized(),
                a.aktif.normalized(),
            ]),
        }
    }

    /// Builds a vector from values in [`FEATURE_NAMES`] order.
    #[must_use]
    pub fn from_array(values: [f64; N_FEATURES]) -> Self {
        let [academic_score, course_participation, attendance_rate, physical_activity, emotional_engagement] =
            values;
        Self {
            academic_score,
            course_participation,
            attendance_rate,
            physical_activity,
            emotional_engagement,
        }
    }

    /// Values in [`FEATURE_NAMES`] order.
    #[must_use]
    pub fn to_array(&self) -> [f64; N_FEATURES] {
        [
            self.academic_score,
            self.course_participation,
            self.attendance_rate,
            self.physical_activity,
            self.emotional_engagement,
        ]
    }
}

/// Kind of answer a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    /// Integer 1–5.
    Likert,
    /// ya/tidak.
    YesNo,
}

/// One questionnaire item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Field name in [`AnswerSet`].
    pub field: &'static str,
    /// Prompt shown to the learner.
    pub prompt: &'static str,
    /// Expected answer kind.
    pub kind: AnswerKind,
}

/// The questionnaire, in the order it is asked.
pub const QUESTIONS: [Question; 11] = [
    Question {
        field: "catatan",
        prompt: "Seberapa sering kamu membuat catatan atau mind-map saat belajar?",
        kind: AnswerKind::Likert,
    },
    Question {
        field: "diagram",
        prompt: "Seberapa mudah kamu memahami materi dari diagram/gambar/warna?",
        kind: AnswerKind::Likert,
    },
    Question {
        field: "baca",
        prompt: "Seberapa sering kamu belajar dengan membaca teks atau buku sebagai sumber utama?",
        kind: AnswerKind::Likert,
    },
    Question {
        field: "mendengarkan",
        prompt: "Seberapa mudah kamu memahami penjelasan guru/dosen saat mendengarkan?",
        kind: AnswerKind::Likert,
    },
    Question {
        field: "diskusi",
        prompt: "Apakah kamu suka berdiskusi atau aktif berbicara di kelas?",
        kind: AnswerKind::YesNo,
    },
    Question {
        field: "rekaman",
        prompt: "Seberapa sering kamu memanfaatkan rekaman suara/podcast untuk belajar?",
        kind: AnswerKind::Likert,
    },
    Question {
        field: "praktik",
        prompt: "Apakah kamu suka belajar dengan praktik langsung/eksperimen?",
        kind: AnswerKind::YesNo,
    },
    Question {
        field: "mencoba",
        prompt: "Seberapa sering kamu merasa lebih paham setelah mencoba sendiri/praktik?",
        kind: AnswerKind::Likert,
    },
    Question {
        field: "bosan",
        prompt: "Seberapa sering kamu merasa bosan duduk diam saat belajar?",
        kind: AnswerKind::Likert,
    },
    Question {
        field: "hadir",
        prompt: "Seberapa sering kamu hadir di kelas atau pertemuan belajar?",
        kind: AnswerKind::Likert,
    },
    Question {
        field: "aktif",
        prompt: "Seberapa aktif kamu berpartisipasi dalam kegiatan kelas/kelompok?",
        kind: AnswerKind::Likert,
    },
];

/// Raw textual answers keyed by question, as collected by a front-end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnswers {
    /// catatan
    pub catatan: String,
    /// diagram
    pub diagram: String,
    /// baca
    pub baca: String,
    /// mendengarkan
    pub mendengarkan: String,
    /// diskusi
    pub diskusi: String,
    /// rekaman
    pub rekaman: String,
    /// praktik
    pub praktik: String,
    /// mencoba
    pub mencoba: String,
    /// bosan
    pub bosan: String,
    /// hadir
    pub hadir: String,
    /// aktif
    pub aktif: String,
}

impl RawAnswers {
    /// Validates every answer.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::InvalidInput`] for the first answer that
    /// fails to parse, naming its field.
    pub fn parse(&self) -> Result<AnswerSet> {
        Ok(AnswerSet {
            catatan: Likert::parse("catatan", &self.catatan)?,
            diagram: Likert::parse("diagram", &self.diagram)?,
            baca: Likert::parse("baca", &self.baca)?,
            mendengarkan: Likert::parse("mendengarkan", &self.mendengarkan)?,
            diskusi: YesNo::parse("diskusi", &self.diskusi)?,
            rekaman: Likert::parse("rekaman", &self.rekaman)?,
            praktik: YesNo::parse("praktik", &self.praktik)?,
            mencoba: Likert::parse("mencoba", &self.mencoba)?,
            bosan: Likert::parse("bosan", &self.bosan)?,
            hadir: Likert::parse("hadir", &self.hadir)?,
            aktif: Likert::parse("aktif", &self.aktif)?,
        })
    }

    /// Mutable slot for a question's answer, by field name.
    pub fn slot_mut(&mut self, field: &str) -> Option<&mut String> {
        Some(match field {
            "catatan" => &mut self.catatan,
            "diagram" => &mut self.diagram,
            "baca" => &mut self.baca,
            "mendengarkan" => &mut self.mendengarkan,
            "diskusi" => &mut self.diskusi,
            "rekaman" => &mut self.rekaman,
            "praktik" => &mut self.praktik,
            "mencoba" => &mut self.mencoba,
            "bosan" => &mut self.bosan,
            "hadir" => &mut self.hadir,
            "aktif" => &mut self.aktif,
            _ => return None,
        })
    }
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod tests;
