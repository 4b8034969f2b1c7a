//! Learning-style labels.
//!
//! Class indices follow the lexicographic order of the label names, which is
//! also the column order of every probability row and confusion matrix.

use crate::error::{LearnStyleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three learning styles the classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LearningStyle {
    /// Learns best by listening and discussion.
    Auditory,
    /// Learns best by doing.
    Kinesthetic,
    /// Learns best from pictures, diagrams and written notes.
    Visual,
}

impl LearningStyle {
    /// All styles in class-index order.
    pub const ALL: [LearningStyle; 3] = [Self::Auditory, Self::Kinesthetic, Self::Visual];

    /// Number of classes.
    pub const COUNT: usize = Self::ALL.len();

    /// Class index of this style.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Auditory => 0,
            Self::Kinesthetic => 1,
            Self::Visual => 2,
        }
    }

    /// Style for a class index, if in range.
    #[must_use]
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Label as written in datasets and reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Auditory => "Auditory",
            Self::Kinesthetic => "Kinesthetic",
            Self::Visual => "Visual",
        }
    }

    /// Explanation shown to the learner when this style is dominant.
    #[must_use]
    pub fn explanation(self) -> &'static str {
        match self {
            Self::Visual => "Kamu lebih cepat memahami informasi melalui gambar, diagram, peta konsep, dan catatan tertulis.",
            Self::Auditory => "Kamu lebih cepat belajar dengan mendengar penjelasan, diskusi, dan mendengarkan rekaman.",
            Self::Kinesthetic => "Kamu lebih cepat memahami lewat praktik, eksperimen, atau gerakan fisik.",
        }
    }

    /// One-line description of how the style learns effectively.
    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::Visual => "Belajar efektif lewat gambar, diagram, warna, dan catatan.",
            Self::Auditory => "Belajar efektif lewat mendengarkan, diskusi, dan rekaman.",
            Self::Kinesthetic => "Belajar efektif lewat praktik langsung dan pengalaman.",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LearningStyle {
    type Err = LearnStyleError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                LearnStyleError::invalid_input(
                    "LearningStyle",
                    s,
                    "expected one of Visual, Auditory, Kinesthetic",
                )
            })
    }
}
