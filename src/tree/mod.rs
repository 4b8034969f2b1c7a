//! Decision tree classifier.
//!
//! CART (Classification and Regression Trees) induction with Gini impurity.
//! Leaves keep the class counts of the training samples that reached them,
//! so [`DecisionTreeClassifier::predict_proba`] returns empirical class
//! frequencies.
//!
//! # Example
//!
//! ```
//! use learnstyle::prelude::*;
//! use learnstyle::tree::DecisionTreeClassifier;
//!
//! let x = Matrix::from_vec(4, 2, vec![
//!     0.0, 0.0,  // class 0
//!     0.0, 1.0,  // class 1
//!     1.0, 0.0,  // class 1
//!     1.0, 1.0,  // class 0
//! ]).expect("valid matrix dimensions");
//! let y = vec![0, 1, 1, 0];
//!
//! let mut tree = DecisionTreeClassifier::new().with_max_depth(3);
//! tree.fit(&x, &y).expect("fit should succeed");
//!
//! assert_eq!(tree.predict(&x).expect("fitted"), y);
//! ```

mod export;
mod helpers;

pub use export::export_text;

use crate::error::{LearnStyleError, Result};
use crate::primitives::Matrix;
use crate::traits::{argmax, Classifier};
use helpers::{class_counts, find_best_split, gini_impurity, partition};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default maximum depth (root has depth 0).
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Default seed for the per-node feature permutation.
pub const DEFAULT_RANDOM_STATE: u64 = 42;

/// Internal node in a decision tree.
///
/// Contains a split condition (feature and threshold) and the two subtrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f64,
    /// Number of training samples that reached this node
    pub n_samples: usize,
    /// Gini impurity of the node before splitting
    pub impurity: f64,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<TreeNode>,
}

/// Leaf node in a decision tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    /// Training samples per class that reached this leaf
    pub class_counts: Vec<usize>,
}

impl Leaf {
    /// Creates a leaf from per-class sample counts.
    #[must_use]
    pub fn new(class_counts: Vec<usize>) -> Self {
        Self { class_counts }
    }

    /// Number of training samples in this leaf.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.class_counts.iter().sum()
    }

    /// Fraction of each class among the leaf's samples.
    #[must_use]
    pub fn distribution(&self) -> Vec<f64> {
        let n = self.n_samples();
        if n == 0 {
            let k = self.class_counts.len().max(1) as f64;
            return vec![1.0 / k; self.class_counts.len()];
        }
        self.class_counts
            .iter()
            .map(|&c| c as f64 / n as f64)
            .collect()
    }

    /// Most frequent class; ties go to the lowest index.
    #[must_use]
    pub fn majority_class(&self) -> usize {
        let mut best = 0;
        for (i, &c) in self.class_counts.iter().enumerate() {
            if c > self.class_counts[best] {
                best = i;
            }
        }
        best
    }
}

/// A node in a decision tree (either internal node or leaf).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal decision node with split condition
    Internal(Node),
    /// Leaf node with class distribution
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaf nodes have depth 0, internal nodes have depth 1 + max(left, right).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Internal(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }

    /// Number of leaves under this node.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Internal(node) => node.left.n_leaves() + node.right.n_leaves(),
        }
    }

    /// Number of nodes (internal and leaf) under this node, itself included.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 1,
            TreeNode::Internal(node) => 1 + node.left.n_nodes() + node.right.n_nodes(),
        }
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<()> {
        match self {
            TreeNode::Leaf(leaf) => {
                if leaf.class_counts.len() != n_classes {
                    return Err(LearnStyleError::dimension_mismatch(
                        format!("{n_classes} class counts per leaf"),
                        format!("{} class counts", leaf.class_counts.len()),
                    ));
                }
                Ok(())
            }
            TreeNode::Internal(node) => {
                if node.feature_idx >= n_features {
                    return Err(LearnStyleError::dimension_mismatch(
                        format!("feature index < {n_features}"),
                        format!("feature index {}", node.feature_idx),
                    ));
                }
                node.left.validate(n_features, n_classes)?;
                node.right.validate(n_features, n_classes)
            }
        }
    }
}

/// One comparison made while descending the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    /// Feature compared at this node
    pub feature_idx: usize,
    /// Threshold of the node
    pub threshold: f64,
    /// Whether the sample went left (`value <= threshold`)
    pub went_left: bool,
}

/// Decision tree classifier using the CART algorithm.
///
/// Uses Gini impurity as the splitting criterion. At each node the features
/// are visited in an order drawn from a generator seeded with
/// `random_state`; a later feature replaces the current best only with a
/// strictly larger impurity decrease, which makes training reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    tree: Option<TreeNode>,
    max_depth: Option<usize>,
    min_samples_split: usize,
    random_state: u64,
    /// Number of features the model was trained on (for validation)
    n_features: Option<usize>,
    n_classes: usize,
    feature_importances: Option<Vec<f64>>,
}

impl DecisionTreeClassifier {
    /// Creates a new decision tree classifier with default parameters
    /// (max depth 6, seed 42).
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: None,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            min_samples_split: 2,
            random_state: DEFAULT_RANDOM_STATE,
            n_features: None,
            n_classes: 0,
            feature_importances: None,
        }
    }

    /// Sets the maximum depth of the tree.
    ///
    /// # Arguments
    ///
    /// * `depth` - Maximum depth (root has depth 0)
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Removes the depth limit.
    #[must_use]
    pub fn without_max_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Sets the minimum number of samples required to split a node.
    #[must_use]
    pub fn with_min_samples_split(mut self, n: usize) -> Self {
        self.min_samples_split = n.max(2);
        self
    }

    /// Sets the seed of the per-node feature permutation.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Fixes the number of classes, so classes absent from a training
    /// partition still get a (zero) probability column.
    #[must_use]
    pub fn with_n_classes(mut self, n_classes: usize) -> Self {
        self.n_classes = n_classes;
        self
    }

    /// Wraps an already-built tree, e.g. one loaded from elsewhere or a
    /// hand-written fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if a node references a feature `>= n_features` or a
    /// leaf does not hold exactly `n_classes` counts.
    pub fn from_tree(root: TreeNode, n_features: usize, n_classes: usize) -> Result<Self> {
        root.validate(n_features, n_classes)?;
        let mut model = Self::new().with_n_classes(n_classes);
        model.max_depth = None;
        model.n_features = Some(n_features);
        model.tree = Some(root);
        Ok(model)
    }

    /// Root of the fitted tree.
    #[must_use]
    pub fn tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    /// Configured maximum depth.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Seed of the feature permutation.
    #[must_use]
    pub fn random_state(&self) -> u64 {
        self.random_state
    }

    /// Number of features seen during fit.
    #[must_use]
    pub fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    /// Depth of the fitted tree.
    #[must_use]
    pub fn depth(&self) -> Option<usize> {
        self.tree.as_ref().map(TreeNode::depth)
    }

    /// Number of leaves of the fitted tree.
    #[must_use]
    pub fn n_leaves(&self) -> Option<usize> {
        self.tree.as_ref().map(TreeNode::n_leaves)
    }

    /// Normalized total Gini decrease contributed by each feature.
    ///
    /// Sums to 1.0 unless no split lowered impurity (all zeros).
    #[must_use]
    pub fn feature_importances(&self) -> Option<&[f64]> {
        self.feature_importances.as_deref()
    }

    /// Checks that a fitted tree is consistent with its recorded shape:
    /// every node references a feature `< n_features`, every leaf holds
    /// `n_classes` counts and the importances cover every feature.
    /// An unfitted model is trivially valid.
    ///
    /// # Errors
    ///
    /// Returns [`LearnStyleError::DimensionMismatch`] on the first
    /// inconsistency.
    pub fn validate(&self) -> Result<()> {
        let Some(root) = &self.tree else {
            return Ok(());
        };
        let n_features = self.n_features.ok_or_else(|| {
            LearnStyleError::dimension_mismatch("a recorded feature count", "none")
        })?;
        root.validate(n_features, self.n_classes)?;
        match &self.feature_importances {
            Some(imp) if imp.len() != n_features => Err(LearnStyleError::dimension_mismatch(
                format!("{n_features} feature importances"),
                format!("{} feature importances", imp.len()),
            )),
            _ => Ok(()),
        }
    }

    fn root(&self) -> Result<&TreeNode> {
        self.tree.as_ref().ok_or(LearnStyleError::NotFitted {
            component: "DecisionTreeClassifier",
        })
    }

    fn check_width(&self, width: usize) -> Result<()> {
        match self.n_features {
            Some(expected) if expected != width => Err(LearnStyleError::dimension_mismatch(
                format!("{expected} features"),
                format!("{width} features"),
            )),
            _ => Ok(()),
        }
    }

    fn leaf_for<'a>(root: &'a TreeNode, sample: &[f64]) -> &'a Leaf {
        let mut node = root;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf,
                TreeNode::Internal(internal) => {
                    node = if sample[internal.feature_idx] <= internal.threshold {
                        &internal.left
                    } else {
                        &internal.right
                    };
                }
            }
        }
    }

    /// Class probabilities for a single sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the sample width
    /// differs from the training data.
    pub fn predict_proba_one(&self, sample: &[f64]) -> Result<Vec<f64>> {
        let root = self.root()?;
        self.check_width(sample.len())?;
        Ok(Self::leaf_for(root, sample).distribution())
    }

    /// Comparisons made while routing `sample` from the root to its leaf.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the sample width
    /// differs from the training data.
    pub fn decision_path(&self, sample: &[f64]) -> Result<Vec<PathStep>> {
        let mut node = self.root()?;
        self.check_width(sample.len())?;
        let mut path = Vec::new();
        while let TreeNode::Internal(internal) = node {
            let went_left = sample[internal.feature_idx] <= internal.threshold;
            path.push(PathStep {
                feature_idx: internal.feature_idx,
                threshold: internal.threshold,
                went_left,
            });
            node = if went_left {
                &internal.left
            } else {
                &internal.right
            };
        }
        Ok(path)
    }

    /// Computes the accuracy score on test data.
    ///
    /// # Errors
    ///
    /// Returns an error if prediction fails or lengths differ.
    pub fn score(&self, x: &Matrix<f64>, y: &[usize]) -> Result<f64> {
        let predictions = self.predict(x)?;
        if predictions.len() != y.len() {
            return Err(LearnStyleError::dimension_mismatch(
                format!("{} labels", predictions.len()),
                format!("{} labels", y.len()),
            ));
        }
        if y.is_empty() {
            return Ok(0.0);
        }
        let correct = predictions
            .iter()
            .zip(y)
            .filter(|(pred, truth)| pred == truth)
            .count();
        Ok(correct as f64 / y.len() as f64)
    }

    /// Saves the model to a binary file using bincode.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = bincode::serialize(self)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Loads a model from a binary file.
    ///
    /// # Errors
    ///
    /// Returns an error if file reading or deserialization fails, or if the
    /// decoded tree does not pass [`DecisionTreeClassifier::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        let model: Self = bincode::deserialize(&bytes)?;
        model.validate()?;
        Ok(model)
    }
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for DecisionTreeClassifier {
    /// Fits the decision tree to training data.
    ///
    /// `y` holds class indices; the class count is the larger of the value
    /// set with [`DecisionTreeClassifier::with_n_classes`] and `max(y) + 1`.
    fn fit(&mut self, x: &Matrix<f64>, y: &[usize]) -> Result<()> {
        let (n_rows, n_cols) = x.shape();
        if n_rows != y.len() {
            return Err(LearnStyleError::dimension_mismatch(
                format!("{n_rows} labels"),
                format!("{} labels", y.len()),
            ));
        }
        if n_rows == 0 {
            return Err(LearnStyleError::invalid_hyperparameter(
                "n_samples",
                0,
                "at least one training sample",
            ));
        }

        let n_classes = y
            .iter()
            .max()
            .map_or(0, |&m| m + 1)
            .max(self.n_classes);

        let mut builder = TreeBuilder {
            x,
            y,
            n_classes,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            rng: StdRng::seed_from_u64(self.random_state),
            importances: vec![0.0; n_cols],
        };
        let indices: Vec<usize> = (0..n_rows).collect();
        let root = builder.build(&indices, 0);

        let total: f64 = builder.importances.iter().sum();
        if total > 0.0 {
            for imp in &mut builder.importances {
                *imp /= total;
            }
        }

        tracing::debug!(
            n_samples = n_rows,
            depth = root.depth(),
            leaves = root.n_leaves(),
            "decision tree fitted"
        );

        self.n_classes = n_classes;
        self.n_features = Some(n_cols);
        self.feature_importances = Some(builder.importances);
        self.tree = Some(root);
        Ok(())
    }

    fn predict_proba(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let root = self.root()?;
        self.check_width(x.n_cols())?;

        let mut proba = Vec::with_capacity(x.n_rows() * self.n_classes);
        for sample in x.rows() {
            proba.extend(Self::leaf_for(root, sample).distribution());
        }
        Matrix::from_vec(x.n_rows(), self.n_classes, proba)
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict(&self, x: &Matrix<f64>) -> Result<Vec<usize>> {
        let root = self.root()?;
        self.check_width(x.n_cols())?;
        Ok(x
            .rows()
            .map(|sample| argmax(&Self::leaf_for(root, sample).distribution()))
            .collect())
    }
}

/// Recursive CART builder over index subsets.
struct TreeBuilder<'a> {
    x: &'a Matrix<f64>,
    y: &'a [usize],
    n_classes: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
    rng: StdRng,
    importances: Vec<f64>,
}

impl TreeBuilder<'_> {
    fn build(&mut self, indices: &[usize], depth: usize) -> TreeNode {
        let counts = class_counts(self.y, indices, self.n_classes);
        let impurity = gini_impurity(&counts);

        let at_max_depth = self.max_depth.is_some_and(|max| depth >= max);
        if impurity == 0.0 || at_max_depth || indices.len() < self.min_samples_split {
            return TreeNode::Leaf(Leaf::new(counts));
        }

        let mut feature_order: Vec<usize> = (0..self.x.n_cols()).collect();
        feature_order.shuffle(&mut self.rng);

        let Some(split) = find_best_split(self.x, self.y, indices, &feature_order, &counts) else {
            return TreeNode::Leaf(Leaf::new(counts));
        };

        let (left_idx, right_idx) = partition(self.x, indices, split.feature_idx, split.threshold);
        if left_idx.is_empty() || right_idx.is_empty() {
            return TreeNode::Leaf(Leaf::new(counts));
        }

        self.importances[split.feature_idx] += indices.len() as f64 * split.gain.max(0.0);

        let left = self.build(&left_idx, depth + 1);
        let right = self.build(&right_idx, depth + 1);

        TreeNode::Internal(Node {
            feature_idx: split.feature_idx,
            threshold: split.threshold,
            n_samples: indices.len(),
            impurity,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}
