//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use learnstyle::prelude::*;
//! ```

pub use crate::artifacts::{ArtifactRegistry, ArtifactStore, ArtifactVersion};
pub use crate::config::TrainingConfig;
pub use crate::data::{Record, TrainingDataset};
pub use crate::error::{LearnStyleError, Result};
pub use crate::features::{AnswerSet, FeatureVector, Likert, YesNo, FEATURE_NAMES};
pub use crate::predict::{PredictionResult, Predictor, TIE_TOLERANCE};
pub use crate::preprocessing::{DegeneratePolicy, MinMaxScaler};
pub use crate::primitives::Matrix;
pub use crate::style::LearningStyle;
pub use crate::traits::{Classifier, Transformer};
pub use crate::training::{Trainer, TrainingRun};
pub use crate::tree::DecisionTreeClassifier;
