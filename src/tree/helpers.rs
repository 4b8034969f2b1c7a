//! Split search for CART induction.
//!
//! All helpers work on index subsets of the full training matrix so that no
//! node copies its samples.

use crate::primitives::Matrix;

/// Minimum gap between two sorted values for a threshold to sit between them.
const VALUE_EPSILON: f64 = 1e-12;

/// Best split found for a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Split {
    pub feature_idx: usize,
    pub threshold: f64,
    /// Parent impurity minus weighted child impurity.
    pub gain: f64,
}

/// Counts class occurrences among `indices`.
pub(crate) fn class_counts(y: &[usize], indices: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &i in indices {
        counts[y[i]] += 1;
    }
    counts
}

/// Gini impurity `1 - Σ p_i²` of a class-count vector.
///
/// Returns 0.0 for an empty node.
pub(crate) fn gini_impurity(counts: &[usize]) -> f64 {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Weighted Gini impurity of a two-way partition.
pub(crate) fn gini_split(left: &[usize], right: &[usize]) -> f64 {
    let n_left: usize = left.iter().sum();
    let n_right: usize = right.iter().sum();
    let n_total = (n_left + n_right) as f64;
    if n_total == 0.0 {
        return 0.0;
    }
    (n_left as f64 / n_total) * gini_impurity(left)
        + (n_right as f64 / n_total) * gini_impurity(right)
}

/// Midpoint threshold between two consecutive distinct values.
///
/// Falls back to `lo` when rounding would put the midpoint on `hi`, so that
/// `hi` still goes right under the `<=` rule.
fn midpoint(lo: f64, hi: f64) -> f64 {
    let mid = lo + (hi - lo) / 2.0;
    if mid >= hi {
        lo
    } else {
        mid
    }
}

/// Best threshold on one feature, sweeping samples in sorted order.
///
/// `parent` holds the class counts of `indices`. An impure node gets its
/// best threshold even at zero gain; a pure node gets `None`.
pub(crate) fn best_split_for_feature(
    x: &Matrix<f64>,
    y: &[usize],
    indices: &[usize],
    feature_idx: usize,
    parent: &[usize],
) -> Option<Split> {
    if indices.len() < 2 {
        return None;
    }

    let mut sorted: Vec<(f64, usize)> = indices
        .iter()
        .map(|&i| (x.get(i, feature_idx), y[i]))
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let parent_impurity = gini_impurity(parent);
    if parent_impurity == 0.0 {
        return None;
    }
    let mut left = vec![0usize; parent.len()];
    let mut right = parent.to_vec();
    let mut best: Option<Split> = None;

    for pos in 0..sorted.len() - 1 {
        let (value, label) = sorted[pos];
        left[label] += 1;
        right[label] -= 1;

        let next = sorted[pos + 1].0;
        if next - value <= VALUE_EPSILON {
            continue;
        }

        let gain = parent_impurity - gini_split(&left, &right);
        if best.map_or(true, |s| gain > s.gain) {
            best = Some(Split {
                feature_idx,
                threshold: midpoint(value, next),
                gain,
            });
        }
    }

    best
}

/// Best split over features visited in `feature_order`.
///
/// A later feature only wins with a strictly larger gain, so ties go to the
/// feature visited first.
pub(crate) fn find_best_split(
    x: &Matrix<f64>,
    y: &[usize],
    indices: &[usize],
    feature_order: &[usize],
    parent: &[usize],
) -> Option<Split> {
    let mut best: Option<Split> = None;
    for &feature_idx in feature_order {
        if let Some(candidate) = best_split_for_feature(x, y, indices, feature_idx, parent) {
            if best.map_or(true, |s| candidate.gain > s.gain) {
                best = Some(candidate);
            }
        }
    }
    best
}

/// Splits `indices` by `x[i, feature] <= threshold`.
pub(crate) fn partition(
    x: &Matrix<f64>,
    indices: &[usize],
    feature_idx: usize,
    threshold: f64,
) -> (Vec<usize>, Vec<usize>) {
    indices
        .iter()
        .partition(|&&i| x.get(i, feature_idx) <= threshold)
}

#[cfg(test)]
#[path = "helpers_tests.rs"]
mod tests;
