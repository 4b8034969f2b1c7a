//! Learnstyle: learning-style prediction from a short questionnaire.
//!
//! A small supervised pipeline in pure Rust: eleven Likert and yes/no
//! answers become five features, a min-max scaler and a CART decision tree
//! are fitted on a labelled dataset, every training run is persisted as a
//! versioned artifact set, and predictions report a ranked distribution
//! over Visual, Auditory and Kinesthetic with tie detection.
//!
//! # Quick Start
//!
//! ```
//! use learnstyle::prelude::*;
//!
//! // Toy training data: one dominant feature per style
//! let mut records = Vec::new();
//! for i in 0..12 {
//!     let style = LearningStyle::ALL[i % 3];
//!     let mut values = [0.1 + (i / 3) as f64 * 0.01; 5];
//!     values[style.index()] = 0.9;
//!     records.push(Record {
//!         student_id: format!("S{i}"),
//!         features: FeatureVector::from_array(values),
//!         label: style,
//!     });
//! }
//! let dataset = TrainingDataset::new(records).unwrap();
//!
//! // Train and evaluate on a stratified hold-out split
//! let run = Trainer::new(TrainingConfig::default().with_test_size(0.25))
//!     .fit(&dataset)
//!     .unwrap();
//! assert!(run.evaluation().accuracy() > 0.5);
//!
//! // Predict a new learner
//! let predictor = Predictor::new(run.model().clone(), run.scaler().clone()).unwrap();
//! let result = predictor
//!     .predict(&FeatureVector::from_array([0.9, 0.1, 0.1, 0.1, 0.1]))
//!     .unwrap();
//! assert_eq!(result.dominant(), Some(LearningStyle::Auditory));
//! ```
//!
//! # Modules
//!
//! - [`features`]: Answers, Likert/yes-no parsing and the five features
//! - [`style`]: The three learning-style labels and their explanations
//! - [`primitives`]: Row-major `Matrix`
//! - [`preprocessing`]: Min-max scaler with a degenerate-column policy
//! - [`tree`]: CART decision tree classifier and rule export
//! - [`model_selection`]: Stratified train/test split
//! - [`metrics`]: Accuracy, classification report, confusion matrix
//! - [`data`]: CSV training dataset
//! - [`config`]: Training hyperparameters (TOML)
//! - [`training`]: Train/evaluate pipeline
//! - [`artifacts`]: Versioned artifact store and registry
//! - [`predict`]: Predictor and ranked, tie-aware results
//! - [`logbook`]: Append-only CSV log of predictions

pub mod artifacts;
pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod logbook;
pub mod metrics;
pub mod model_selection;
pub mod predict;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod style;
pub mod traits;
pub mod training;
pub mod tree;

pub use error::{LearnStyleError, Result};
pub use primitives::Matrix;
pub use traits::{Classifier, Transformer};
