mod codec;
mod engine;
mod tree;

pub use codec::{LabelCodec, LabelEncoder};
pub use engine::InferenceEngine;
pub use tree::{DecisionTree, TreeNode};

use crate::{Result, features::FeatureVector};

/// Opaque classifier: maps a batch of feature rows to class indices.
pub trait Predictor: Send + Sync {
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<usize>>;

    /// Number of features each row must carry.
    fn n_features(&self) -> usize;
}
