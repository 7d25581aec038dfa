//! Array-encoded decision tree classifier.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::{argmax, check_width, Classifier, Label, ModelError};

/// One node of a flattened tree. Leaves have no `feature`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub feature: Option<usize>,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub left: Option<usize>,
    #[serde(default)]
    pub right: Option<usize>,
    /// Per-class sample counts (or probabilities) at this node.
    #[serde(default)]
    pub value: Vec<f64>,
}

/// Binary decision tree; node 0 is the root.
///
/// Children always sit at a higher index than their parent, so traversal
/// terminates without cycle detection.
#[derive(Debug)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
    n_features: usize,
    classes: Vec<Label>,
}

impl DecisionTree {
    pub fn new(
        nodes: Vec<TreeNode>,
        n_features: usize,
        classes: Vec<Label>,
    ) -> Result<Self, ModelError> {
        if nodes.is_empty() {
            return Err(ModelError::Invalid("decision tree has no nodes".into()));
        }

        for (idx, node) in nodes.iter().enumerate() {
            match node.feature {
                Some(feature) => {
                    if feature >= n_features {
                        return Err(ModelError::Invalid(format!(
                            "node {idx} splits on feature {feature}, model has {n_features}"
                        )));
                    }
                    for child in [node.left, node.right] {
                        match child {
                            Some(c) if c > idx && c < nodes.len() => {}
                            Some(c) => {
                                return Err(ModelError::Invalid(format!(
                                    "node {idx} has out-of-order child {c}"
                                )))
                            }
                            None => {
                                return Err(ModelError::Invalid(format!(
                                    "split node {idx} is missing a child"
                                )))
                            }
                        }
                    }
                }
                None => {
                    if node.value.len() != classes.len() {
                        return Err(ModelError::Invalid(format!(
                            "leaf {idx} has {} class values, model has {} classes",
                            node.value.len(),
                            classes.len()
                        )));
                    }
                }
            }
        }

        Ok(Self {
            nodes,
            n_features,
            classes,
        })
    }

    fn leaf_for(&self, row: ArrayView1<'_, f64>) -> &TreeNode {
        let mut node = &self.nodes[0];
        while let (Some(feature), Some(left), Some(right)) = (node.feature, node.left, node.right) {
            // NaN compares false and falls to the right branch.
            let next = if row[feature] <= node.threshold { left } else { right };
            node = &self.nodes[next];
        }
        node
    }
}

impl Classifier for DecisionTree {
    fn kind(&self) -> &'static str {
        "decision_tree"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn predict(&self, features: &Array2<f64>) -> Result<Vec<Label>, ModelError> {
        check_width(features, self.n_features)?;

        features
            .rows()
            .into_iter()
            .map(|row| {
                let leaf = self.leaf_for(row);
                argmax(leaf.value.iter().copied())
                    .map(|idx| self.classes[idx].clone())
                    .ok_or(ModelError::Empty)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn leaf(value: Vec<f64>) -> TreeNode {
        TreeNode {
            feature: None,
            threshold: 0.0,
            left: None,
            right: None,
            value,
        }
    }

    fn split(feature: usize, threshold: f64, left: usize, right: usize) -> TreeNode {
        TreeNode {
            feature: Some(feature),
            threshold,
            left: Some(left),
            right: Some(right),
            value: Vec::new(),
        }
    }

    fn stump() -> DecisionTree {
        DecisionTree::new(
            vec![split(2, 2.45, 1, 2), leaf(vec![50.0, 0.0]), leaf(vec![0.0, 100.0])],
            4,
            vec!["setosa".into(), "other".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_threshold_is_inclusive_on_the_left() {
        let tree = stump();
        let preds = tree
            .predict(&array![[5.1, 3.5, 2.45, 0.2], [6.0, 3.0, 2.46, 1.5]])
            .unwrap();
        assert_eq!(preds, vec![Label::from("setosa"), Label::from("other")]);
    }

    #[test]
    fn test_nan_goes_right() {
        let tree = stump();
        let preds = tree.predict(&array![[5.1, 3.5, f64::NAN, 0.2]]).unwrap();
        assert_eq!(preds, vec![Label::from("other")]);
    }

    #[test]
    fn test_wrong_width_rejected() {
        let err = stump().predict(&array![[1.0, 2.0, 3.0]]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::FeatureMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_rejects_backward_child() {
        let err = DecisionTree::new(
            vec![split(0, 1.0, 1, 2), split(0, 1.0, 0, 2), leaf(vec![1.0])],
            4,
            vec!["a".into()],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
    }

    #[test]
    fn test_rejects_leaf_class_mismatch() {
        let err = DecisionTree::new(vec![leaf(vec![1.0, 2.0])], 4, vec!["a".into()]).unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
    }
}
