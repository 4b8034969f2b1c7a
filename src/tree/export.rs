//! Text rendering of a fitted tree.

use super::TreeNode;
use std::fmt::Write;

/// Renders every root-to-leaf path as nested threshold conditions.
///
/// Thresholds are printed with two decimals; each leaf shows its majority
/// class.
///
/// ```text
/// |--- AcademicScore <= 0.50
/// |   |--- class: Visual
/// |--- AcademicScore >  0.50
/// |   |--- class: Auditory
/// ```
///
/// Features or classes without a name are rendered as `feature_<i>` and
/// `class_<i>`.
#[must_use]
pub fn export_text<F, C>(root: &TreeNode, feature_names: &[F], class_names: &[C]) -> String
where
    F: AsRef<str>,
    C: AsRef<str>,
{
    let mut out = String::new();
    write_node(&mut out, root, 0, feature_names, class_names);
    out
}

fn write_node<F, C>(out: &mut String, node: &TreeNode, depth: usize, features: &[F], classes: &[C])
where
    F: AsRef<str>,
    C: AsRef<str>,
{
    let indent = "|   ".repeat(depth);
    match node {
        TreeNode::Leaf(leaf) => {
            let idx = leaf.majority_class();
            let name = classes
                .get(idx)
                .map_or_else(|| format!("class_{idx}"), |c| c.as_ref().to_string());
            let _ = writeln!(out, "{indent}|--- class: {name}");
        }
        TreeNode::Internal(internal) => {
            let feature = features.get(internal.feature_idx).map_or_else(
                || format!("feature_{}", internal.feature_idx),
                |f| f.as_ref().to_string(),
            );
            let _ = writeln!(
                out,
                "{indent}|--- {feature} <= {:.2}",
                internal.threshold
            );
            write_node(out, &internal.left, depth + 1, features, classes);
            let _ = writeln!(out, "{indent}|--- {feature} >  {:.2}", internal.threshold);
            write_node(out, &internal.right, depth + 1, features, classes);
        }
    }
}
