use super::Predictor;
use crate::{Error, Result, features::FeatureVector};
use serde::{Deserialize, Serialize};

/// A single node of a fitted decision tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Rows with `x[feature] <= threshold` go to `left`, the rest to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class_index: usize,
    },
}

/// Decision tree classifier in its serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub n_features: usize,
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(n_features: usize, nodes: Vec<TreeNode>) -> Self {
        Self { n_features, nodes }
    }

    /// Checks the structure so that prediction always terminates on a leaf.
    ///
    /// Children must point strictly forward, which rules out cycles.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("decision tree has no nodes".to_string());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } = node
            {
                if *feature >= self.n_features {
                    return Err(format!(
                        "node {} splits on feature {} but the tree has {} features",
                        index, feature, self.n_features
                    ));
                }
                if threshold.is_nan() {
                    return Err(format!("node {} has a NaN threshold", index));
                }
                for child in [*left, *right] {
                    if child <= index || child >= self.nodes.len() {
                        return Err(format!(
                            "node {} has invalid child index {}",
                            index, child
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Every class index a leaf of this tree can emit.
    pub fn class_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .nodes
            .iter()
            .filter_map(|node| match node {
                TreeNode::Leaf { class_index } => Some(*class_index),
                TreeNode::Split { .. } => None,
            })
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    fn predict_row(&self, row: &FeatureVector) -> Result<usize> {
        if row.len() < self.n_features {
            return Err(Error::internal(format!(
                "feature vector has {} values, tree expects {}",
                row.len(),
                self.n_features
            )));
        }

        let mut current = 0;
        loop {
            match self.nodes.get(current) {
                Some(TreeNode::Leaf { class_index }) => return Ok(*class_index),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).ok_or_else(|| {
                        Error::internal(format!("feature {} missing from vector", feature))
                    })?;
                    let next = if value <= *threshold { *left } else { *right };
                    if next <= current {
                        return Err(Error::internal(format!(
                            "node {} points backwards to {}",
                            current, next
                        )));
                    }
                    current = next;
                }
                None => {
                    return Err(Error::internal(format!(
                        "node {} does not exist",
                        current
                    )));
                }
            }
        }
    }
}

impl Predictor for DecisionTree {
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<usize>> {
        batch.iter().map(|row| self.predict_row(row)).collect()
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// length <= 9.5 -> class 0, <= 12.5 -> class 1, otherwise class 2
    fn length_tree() -> DecisionTree {
        DecisionTree::new(
            1,
            vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 9.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { class_index: 0 },
                TreeNode::Split {
                    feature: 0,
                    threshold: 12.5,
                    left: 3,
                    right: 4,
                },
                TreeNode::Leaf { class_index: 1 },
                TreeNode::Leaf { class_index: 2 },
            ],
        )
    }

    fn row(value: f64) -> FeatureVector {
        FeatureVector::new(vec![value])
    }

    #[test]
    fn test_predict_follows_thresholds() {
        let tree = length_tree();
        assert!(tree.validate().is_ok());
        let batch = vec![row(9.0), row(9.5), row(10.0), row(12.0), row(20.0)];
        assert_eq!(tree.predict(&batch).unwrap(), vec![0, 0, 1, 1, 2]);
    }

    #[test]
    fn test_single_leaf_tree() {
        let tree = DecisionTree::new(1, vec![TreeNode::Leaf { class_index: 4 }]);
        assert!(tree.validate().is_ok());
        assert_eq!(tree.predict(&[row(1.0)]).unwrap(), vec![4]);
    }

    #[test]
    fn test_class_indices() {
        assert_eq!(length_tree().class_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_validate_rejects_empty_tree() {
        let tree = DecisionTree::new(1, vec![]);
        assert!(tree.validate().unwrap_err().contains("no nodes"));
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let tree = DecisionTree::new(
            1,
            vec![
                TreeNode::Leaf { class_index: 0 },
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 0,
                },
            ],
        );
        assert!(tree.validate().unwrap_err().contains("invalid child index"));
    }

    #[test]
    fn test_validate_rejects_unknown_feature() {
        let tree = DecisionTree::new(
            1,
            vec![
                TreeNode::Split {
                    feature: 2,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { class_index: 0 },
                TreeNode::Leaf { class_index: 1 },
            ],
        );
        assert!(tree.validate().unwrap_err().contains("feature 2"));
    }

    #[test]
    fn test_predict_rejects_short_vector() {
        let tree = DecisionTree::new(2, vec![TreeNode::Leaf { class_index: 0 }]);
        assert!(tree.predict(&[row(3.0)]).is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::json!({
            "n_features": 1,
            "nodes": [
                {"split": {"feature": 0, "threshold": 9.5, "left": 1, "right": 2}},
                {"leaf": {"class_index": 0}},
                {"leaf": {"class_index": 1}}
            ]
        });
        let tree: DecisionTree = serde_json::from_value(json).unwrap();
        assert_eq!(tree.nodes.len(), 3);
        assert_eq!(tree.predict(&[row(13.0)]).unwrap(), vec![1]);
    }
}
