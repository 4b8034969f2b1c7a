//! Inference on a single learner.
//!
//! A [`Predictor`] binds one fitted tree and the scaler it was trained
//! with. Each prediction scales the raw feature vector, reads the class
//! distribution of the reached leaf and ranks the styles. Styles whose
//! probability is within [`TIE_TOLERANCE`] of the maximum are reported
//! together as the top styles.
//!
//! ```
//! use learnstyle::features::FeatureVector;
//! use learnstyle::predict::PredictionResult;
//! use learnstyle::style::LearningStyle;
//!
//! let features = FeatureVector::from_array([0.5; 5]);
//! let result = PredictionResult::from_probabilities(features, &[0.5, 0.5, 0.0])
//!     .expect("three classes");
//! assert!(result.is_tie());
//! assert_eq!(
//!     result.top_styles(),
//!     &[LearningStyle::Auditory, LearningStyle::Kinesthetic]
//! );
//! ```

use crate::artifacts::{ArtifactStore, ArtifactVersion};
use crate::error::{LearnStyleError, Result};
use crate::features::{AnswerSet, FeatureVector, N_FEATURES};
use crate::preprocessing::MinMaxScaler;
use crate::style::LearningStyle;
use crate::traits::Classifier;
use crate::tree::DecisionTreeClassifier;
use serde::Serialize;

/// Absolute tolerance for treating a probability as equal to the maximum.
///
/// Used both for deciding whether a single style dominates and for listing
/// tied styles.
pub const TIE_TOLERANCE: f64 = 1e-6;

/// A style with its predicted probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleProbability {
    /// The style
    pub style: LearningStyle,
    /// Probability in `[0, 1]`
    pub probability: f64,
}

impl StyleProbability {
    /// Probability as a percentage.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }
}

/// Ranked outcome of one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    features: FeatureVector,
    ranked: Vec<StyleProbability>,
    top_styles: Vec<LearningStyle>,
}

impl PredictionResult {
    /// Ranks a class-probability row indexed like [`LearningStyle::ALL`].
    ///
    /// Sorting is stable, so equal probabilities keep class order.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::DimensionMismatch`] unless `proba` has one
    /// entry per style.
    pub fn from_probabilities(features: FeatureVector, proba: &[f64]) -> Result<Self> {
        if proba.len() != LearningStyle::COUNT {
            return Err(LearnStyleError::dimension_mismatch(
                format!("{} class probabilities", LearningStyle::COUNT),
                format!("{} class probabilities", proba.len()),
            ));
        }

        let max = proba.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let top_styles = LearningStyle::ALL
            .iter()
            .zip(proba)
            .filter(|&(_, &p)| (p - max).abs() <= TIE_TOLERANCE)
            .map(|(&s, _)| s)
            .collect();

        let mut ranked: Vec<StyleProbability> = LearningStyle::ALL
            .iter()
            .zip(proba)
            .map(|(&style, &probability)| StyleProbability { style, probability })
            .collect();
        ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        Ok(Self {
            features,
            ranked,
            top_styles,
        })
    }

    /// The unscaled features the prediction was made from.
    #[must_use]
    pub fn features(&self) -> &FeatureVector {
        &self.features
    }

    /// All styles by descending probability.
    #[must_use]
    pub fn ranked(&self) -> &[StyleProbability] {
        &self.ranked
    }

    /// Styles within [`TIE_TOLERANCE`] of the maximum, in class order.
    #[must_use]
    pub fn top_styles(&self) -> &[LearningStyle] {
        &self.top_styles
    }

    /// Whether more than one style shares the maximum.
    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.top_styles.len() > 1
    }

    /// The single dominant style, if there is no tie.
    #[must_use]
    pub fn dominant(&self) -> Option<LearningStyle> {
        match self.top_styles.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Probability of `style`.
    #[must_use]
    pub fn probability(&self, style: LearningStyle) -> f64 {
        self.ranked
            .iter()
            .find(|r| r.style == style)
            .map_or(0.0, |r| r.probability)
    }

    /// Top styles joined by ", ", as written to the prediction log.
    #[must_use]
    pub fn top_styles_label(&self) -> String {
        self.top_styles
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A fitted model bound to its scaler.
///
/// Read-only after construction; share it freely between threads.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: DecisionTreeClassifier,
    scaler: MinMaxScaler,
    version: Option<ArtifactVersion>,
}

impl Predictor {
    /// Binds a model and a scaler.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::NotFitted`] if either part is unfitted,
    /// or [`LearnStyleError::DimensionMismatch`] if they disagree with the
    /// five-feature, three-class layout or the tree is inconsistent.
    pub fn new(model: DecisionTreeClassifier, scaler: MinMaxScaler) -> Result<Self> {
        let Some(scaler_width) = scaler.n_features() else {
            return Err(LearnStyleError::NotFitted {
                component: "MinMaxScaler",
            });
        };
        let Some(model_width) = model.n_features() else {
            return Err(LearnStyleError::NotFitted {
                component: "DecisionTreeClassifier",
            });
        };
        if scaler_width != N_FEATURES || model_width != N_FEATURES {
            return Err(LearnStyleError::dimension_mismatch(
                format!("{N_FEATURES} features in model and scaler"),
                format!("model {model_width}, scaler {scaler_width}"),
            ));
        }
        if model.n_classes() != LearningStyle::COUNT {
            return Err(LearnStyleError::dimension_mismatch(
                format!("{} classes", LearningStyle::COUNT),
                format!("{} classes", model.n_classes()),
            ));
        }
        model.validate()?;
        Ok(Self {
            model,
            scaler,
            version: None,
        })
    }

    /// Loads the model and scaler of `version` from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::ArtifactNotFound`] if either file is
    /// missing, or any error of [`Predictor::new`].
    pub fn load(store: &ArtifactStore, version: &ArtifactVersion) -> Result<Self> {
        let model = store.load_model(version)?;
        let scaler = store.load_scaler(version)?;
        let mut predictor = Self::new(model, scaler)?;
        predictor.version = Some(version.clone());
        tracing::info!(version = %version, dir = %store.dir().display(), "model loaded");
        Ok(predictor)
    }

    /// Version the predictor was loaded from.
    #[must_use]
    pub fn version(&self) -> Option<&ArtifactVersion> {
        self.version.as_ref()
    }

    /// The bound tree.
    #[must_use]
    pub fn model(&self) -> &DecisionTreeClassifier {
        &self.model
    }

    /// The bound scaler.
    #[must_use]
    pub fn scaler(&self) -> &MinMaxScaler {
        &self.scaler
    }

    /// Predicts from an unscaled feature vector.
    ///
    /// # Errors
    ///
    /// Propagates scaler and model errors; none occur for a predictor built
    /// through [`Predictor::new`].
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult> {
        let scaled = self.scaler.transform_one(&features.to_array())?;
        let proba = self.model.predict_proba_one(&scaled)?;
        let result = PredictionResult::from_probabilities(*features, &proba)?;
        tracing::debug!(
            top = %result.top_styles_label(),
            tie = result.is_tie(),
            "prediction"
        );
        Ok(result)
    }

    /// Predicts from questionnaire answers.
    ///
    /// # Errors
    ///
    /// Same as [`Predictor::predict`].
    pub fn predict_answers(&self, answers: &AnswerSet) -> Result<PredictionResult> {
        self.predict(&FeatureVector::from_answers(answers))
    }
}
