use courier_predictor::{
    Result,
    features::FeatureVector,
    inference::Predictor,
};
use mockall::mock;

mock! {
    pub Classifier {}

    impl Predictor for Classifier {
        fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<usize>>;
        fn n_features(&self) -> usize;
    }
}

/// Predictor that always answers with `outputs`, whatever the batch
pub fn predictor_returning(outputs: Vec<usize>) -> MockClassifier {
    let mut predictor = MockClassifier::new();
    predictor
        .expect_predict()
        .returning(move |_| Ok(outputs.clone()));
    predictor.expect_n_features().return_const(1usize);
    predictor
}
