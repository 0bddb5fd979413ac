use super::{LabelCodec, Predictor};
use crate::{Error, Result, features::FeatureVector};
use std::sync::Arc;
use tracing::debug;

/// Thin adapter over an opaque classifier and its label codec.
///
/// Holds no mutable state; one instance is shared by all requests.
#[derive(Clone)]
pub struct InferenceEngine {
    predictor: Arc<dyn Predictor>,
    codec: Arc<dyn LabelCodec>,
}

impl InferenceEngine {
    pub fn new(predictor: Arc<dyn Predictor>, codec: Arc<dyn LabelCodec>) -> Self {
        Self { predictor, codec }
    }

    /// Classifies a single row and decodes the class index to its label.
    pub fn classify(&self, features: &FeatureVector) -> Result<String> {
        let batch = std::slice::from_ref(features);
        let outputs = self
            .predictor
            .predict(batch)
            .map_err(|e| Error::decode(format!("classifier failed: {}", e)))?;

        let index = match outputs.as_slice() {
            [index] => *index,
            _ => {
                return Err(Error::decode(format!(
                    "classifier returned {} outputs for a single row",
                    outputs.len()
                )));
            }
        };

        let label = self.codec.decode(index)?;
        debug!("Class index {} decoded to '{}'", index, label);
        Ok(label.to_string())
    }

    pub fn n_features(&self) -> usize {
        self.predictor.n_features()
    }

    pub fn n_classes(&self) -> usize {
        self.codec.len()
    }
}

impl std::fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("n_features", &self.n_features())
            .field("n_classes", &self.n_classes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{DecisionTree, LabelEncoder, TreeNode};
    use pretty_assertions::assert_eq;

    struct FixedOutputs(Vec<usize>);

    impl Predictor for FixedOutputs {
        fn predict(&self, _batch: &[FeatureVector]) -> Result<Vec<usize>> {
            Ok(self.0.clone())
        }

        fn n_features(&self) -> usize {
            1
        }
    }

    fn engine_with(predictor: impl Predictor + 'static) -> InferenceEngine {
        InferenceEngine::new(
            Arc::new(predictor),
            Arc::new(LabelEncoder::fit(["DHL", "DPD", "InPost"])),
        )
    }

    #[test]
    fn test_classify_decodes_label() {
        let tree = DecisionTree::new(
            1,
            vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 10.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { class_index: 1 },
                TreeNode::Leaf { class_index: 2 },
            ],
        );
        let engine = engine_with(tree);
        let label = engine.classify(&FeatureVector::new(vec![9.0])).unwrap();
        assert_eq!(label, "DPD");
        let label = engine.classify(&FeatureVector::new(vec![24.0])).unwrap();
        assert_eq!(label, "InPost");
    }

    #[test]
    fn test_out_of_range_index_is_decode_error() {
        let engine = engine_with(FixedOutputs(vec![3]));
        let err = engine.classify(&FeatureVector::new(vec![9.0])).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_empty_output_is_decode_error() {
        let engine = engine_with(FixedOutputs(vec![]));
        let err = engine.classify(&FeatureVector::new(vec![9.0])).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.to_string().contains("0 outputs"));
    }

    #[test]
    fn test_multiple_outputs_is_decode_error() {
        let engine = engine_with(FixedOutputs(vec![0, 1]));
        let err = engine.classify(&FeatureVector::new(vec![9.0])).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_classifier_failure_is_decode_error() {
        let tree = DecisionTree::new(2, vec![TreeNode::Leaf { class_index: 0 }]);
        let engine = engine_with(tree);
        let err = engine.classify(&FeatureVector::new(vec![9.0])).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.to_string().contains("classifier failed"));
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = Arc::new(engine_with(FixedOutputs(vec![0])));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.classify(&FeatureVector::new(vec![1.0])))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), "DHL");
        }
    }
}
