//! Request validation and the predict pipeline, independent of HTTP.

use super::types::PredictionResponse;
use crate::{
    Error, Result,
    features::{self, TrackingNumber},
    inference::InferenceEngine,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const TRACKING_NUMBER_FIELD: &str = "tracking_number";

pub const MODEL_NOTE: &str = "Low confidence: prediction is based solely on tracking number length.";

/// Validates a raw JSON payload and extracts the tracking number.
pub fn parse_request(payload: &Value) -> Result<TrackingNumber> {
    let object = payload.as_object().ok_or_else(|| {
        Error::validation(format!(
            "Invalid input. Expected a JSON object with a '{}' field.",
            TRACKING_NUMBER_FIELD
        ))
    })?;

    match object.get(TRACKING_NUMBER_FIELD) {
        None => Err(Error::validation(format!(
            "Invalid input. '{}' field is required.",
            TRACKING_NUMBER_FIELD
        ))),
        Some(Value::Null) => Err(Error::validation(format!(
            "Invalid input. '{}' must not be null.",
            TRACKING_NUMBER_FIELD
        ))),
        Some(Value::String(s)) => Ok(TrackingNumber::Text(s.clone())),
        // Numbers keep their literal text, so integers of any length survive.
        Some(Value::Number(n)) => {
            TrackingNumber::from_integer_literal(&n.to_string()).ok_or_else(|| invalid_type(payload))
        }
        Some(_) => Err(invalid_type(payload)),
    }
}

fn invalid_type(payload: &Value) -> Error {
    Error::validation(format!(
        "Invalid input. '{}' must be a string or an integer, got {}.",
        TRACKING_NUMBER_FIELD, payload[TRACKING_NUMBER_FIELD]
    ))
}

/// Validation -> feature extraction -> inference -> response shaping.
#[derive(Debug, Clone)]
pub struct PredictionService {
    engine: Arc<InferenceEngine>,
}

impl PredictionService {
    pub fn new(engine: Arc<InferenceEngine>) -> Self {
        Self { engine }
    }

    pub fn handle(&self, payload: &Value) -> Result<PredictionResponse> {
        let tracking_number = parse_request(payload)?;
        self.predict(&tracking_number)
    }

    pub fn predict(&self, tracking_number: &TrackingNumber) -> Result<PredictionResponse> {
        let canonical = tracking_number.canonical();
        let features = features::extract(tracking_number);
        debug!("Derived features {:?} for {}", features.values(), canonical);

        let predicted_courier = self.engine.classify(&features)?;

        Ok(PredictionResponse {
            tracking_number: canonical,
            predicted_courier,
            model_note: MODEL_NOTE.to_string(),
        })
    }
}
