use axum::{Router, body::Body, http::Request, response::Response};
use courier_predictor::{artifact, lifecycle::ServiceContext, server};
use serde_json::{Value, json};
use std::path::PathBuf;
use tempfile::TempDir;

/// Training date recorded in the sample artifact
pub const SAMPLE_TRAINING_DATE: &str = "2025-03-14 09:26:53";

/// Sample artifact: length <= 9 -> DPD, 10..=13 -> DHL, longer -> InPost
pub fn sample_artifact() -> Value {
    json!({
        "format_version": 1,
        "model": {
            "n_features": 1,
            "nodes": [
                {"split": {"feature": 0, "threshold": 9.5, "left": 1, "right": 2}},
                {"leaf": {"class_index": 1}},
                {"split": {"feature": 0, "threshold": 13.5, "left": 3, "right": 4}},
                {"leaf": {"class_index": 0}},
                {"leaf": {"class_index": 2}}
            ]
        },
        "encoder": {"classes": ["DHL", "DPD", "InPost"]},
        "metadata": {
            "training_date": SAMPLE_TRAINING_DATE,
            "features": ["length"],
            "model_type": "DecisionTreeClassifier",
            "test_accuracy": 0.8125
        }
    })
}

/// Sample artifact written before metadata blocks existed
pub fn legacy_artifact() -> Value {
    let mut artifact = sample_artifact();
    let object = artifact.as_object_mut().unwrap();
    object.remove("metadata");
    object.remove("format_version");
    artifact
}

/// Artifact whose tree emits a class index the encoder does not know
pub fn inconsistent_artifact() -> Value {
    let mut artifact = sample_artifact();
    artifact["model"]["nodes"][4] = json!({"leaf": {"class_index": 7}});
    artifact
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Write an artifact into `dir` and return its path
pub fn write_artifact(dir: &TempDir, artifact: &Value) -> PathBuf {
    let path = dir.path().join("model.json");
    std::fs::write(&path, artifact.to_string()).expect("Failed to write artifact");
    path
}

/// Build a ready service context straight from an artifact value
pub fn create_test_context(artifact: &Value) -> ServiceContext {
    let artifact = artifact::parse(artifact.to_string().as_bytes()).expect("invalid test artifact");
    ServiceContext::from_artifact("courier-predictor-test", artifact)
}

pub fn create_test_app(artifact: &Value) -> Router {
    server::router(create_test_context(artifact))
}

pub fn json_request(method: &str, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
