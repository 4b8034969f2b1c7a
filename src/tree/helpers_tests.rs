use super::*;

#[test]
fn test_gini_pure_node() {
    assert_eq!(gini_impurity(&[4, 0, 0]), 0.0);
    assert_eq!(gini_impurity(&[0, 0, 0]), 0.0);
}

#[test]
fn test_gini_balanced_classes() {
    assert!((gini_impurity(&[5, 5]) - 0.5).abs() < 1e-12);
    assert!((gini_impurity(&[2, 2, 2]) - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_gini_split_weighting() {
    // Left pure (3), right 50/50 (2): 3/5 * 0 + 2/5 * 0.5
    let weighted = gini_split(&[3, 0], &[1, 1]);
    assert!((weighted - 0.2).abs() < 1e-12);
    assert_eq!(gini_split(&[0, 0], &[0, 0]), 0.0);
}

#[test]
fn test_class_counts_subset() {
    let y = [0, 1, 2, 2, 1];
    assert_eq!(class_counts(&y, &[1, 2, 3], 3), vec![0, 1, 2]);
    assert_eq!(class_counts(&y, &[], 3), vec![0, 0, 0]);
}

#[test]
fn test_best_split_for_feature_midpoint() {
    let x = Matrix::from_vec(4, 1, vec![0.1, 0.2, 0.8, 0.9]).expect("valid");
    let y = [0, 0, 1, 1];
    let indices = [0, 1, 2, 3];
    let parent = class_counts(&y, &indices, 2);

    let split = best_split_for_feature(&x, &y, &indices, 0, &parent).expect("separable");
    assert_eq!(split.feature_idx, 0);
    assert!((split.threshold - 0.5).abs() < 1e-12);
    assert!((split.gain - 0.5).abs() < 1e-12);
}

#[test]
fn test_best_split_constant_feature() {
    let x = Matrix::from_vec(3, 1, vec![0.4, 0.4, 0.4]).expect("valid");
    let y = [0, 1, 0];
    let indices = [0, 1, 2];
    let parent = class_counts(&y, &indices, 2);
    assert!(best_split_for_feature(&x, &y, &indices, 0, &parent).is_none());
}

#[test]
fn test_best_split_pure_node_has_no_gain() {
    let x = Matrix::from_vec(3, 1, vec![0.1, 0.5, 0.9]).expect("valid");
    let y = [1, 1, 1];
    let indices = [0, 1, 2];
    let parent = class_counts(&y, &indices, 2);
    assert!(best_split_for_feature(&x, &y, &indices, 0, &parent).is_none());
}

#[test]
fn test_best_split_keeps_zero_gain_threshold() {
    // XOR: neither feature alone lowers impurity
    let x = Matrix::from_vec(4, 2, vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]).expect("valid");
    let y = [0, 1, 1, 0];
    let indices = [0, 1, 2, 3];
    let parent = class_counts(&y, &indices, 2);

    let split = best_split_for_feature(&x, &y, &indices, 0, &parent).expect("impure node splits");
    assert!((split.threshold - 0.5).abs() < 1e-12);
    assert!(split.gain.abs() < 1e-12);

    let split = find_best_split(&x, &y, &indices, &[1, 0], &parent).expect("split");
    assert_eq!(split.feature_idx, 1);
}

#[test]
fn test_find_best_split_prefers_informative_feature() {
    // Feature 0 is noise, feature 1 separates the classes
    let x = Matrix::from_vec(4, 2, vec![0.5, 0.0, 0.1, 0.1, 0.5, 0.9, 0.1, 1.0]).expect("valid");
    let y = [0, 0, 1, 1];
    let indices = [0, 1, 2, 3];
    let parent = class_counts(&y, &indices, 2);

    let split = find_best_split(&x, &y, &indices, &[0, 1], &parent).expect("split exists");
    assert_eq!(split.feature_idx, 1);
    assert!((split.threshold - 0.5).abs() < 1e-12);
}

#[test]
fn test_find_best_split_tie_goes_to_first_visited() {
    // Both features separate the classes perfectly
    let x = Matrix::from_vec(2, 2, vec![0.0, 0.0, 1.0, 1.0]).expect("valid");
    let y = [0, 1];
    let indices = [0, 1];
    let parent = class_counts(&y, &indices, 2);

    let first = find_best_split(&x, &y, &indices, &[1, 0], &parent).expect("split");
    assert_eq!(first.feature_idx, 1);
    let first = find_best_split(&x, &y, &indices, &[0, 1], &parent).expect("split");
    assert_eq!(first.feature_idx, 0);
}

#[test]
fn test_partition_uses_less_or_equal() {
    let x = Matrix::from_vec(3, 1, vec![0.25, 0.5, 0.75]).expect("valid");
    let (left, right) = partition(&x, &[0, 1, 2], 0, 0.5);
    assert_eq!(left, vec![0, 1]);
    assert_eq!(right, vec![2]);
}

#[test]
fn test_midpoint_never_reaches_upper_value() {
    let lo: f64 = 1.0;
    let hi = f64::from_bits(lo.to_bits() + 1);
    let t = midpoint(lo, hi);
    assert!(t < hi);
    assert!((midpoint(0.0, 1.0) - 0.5).abs() < 1e-12);
}
