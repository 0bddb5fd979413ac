use super::{
    predict::PredictionService,
    types::{ErrorResponse, PredictionResponse},
};
use crate::{Error, lifecycle::ServiceContext};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AppState {
    pub context: ServiceContext,
    pub predictions: PredictionService,
}

impl AppState {
    pub fn new(context: ServiceContext) -> Self {
        let predictions = PredictionService::new(context.engine.clone());
        Self {
            context,
            predictions,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(e: &Error) -> ApiError {
    (
        e.status_code(),
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("predict", %request_id);

    span.in_scope(|| -> Result<Json<PredictionResponse>, ApiError> {
        let Json(payload) = payload.map_err(|rejection| {
            warn!("Rejected request body: {}", rejection.body_text());
            error_response(&Error::validation(format!(
                "Invalid input. Request body must be JSON with a 'tracking_number' field ({}).",
                rejection.body_text()
            )))
        })?;

        match state.predictions.handle(&payload) {
            Ok(response) => {
                info!(
                    "Predicted {} for tracking number {}",
                    response.predicted_courier, response.tracking_number
                );
                Ok(Json(response))
            }
            Err(e @ Error::Validation(_)) => {
                warn!("Validation failed: {}", e);
                Err(error_response(&e))
            }
            Err(e) => {
                error!("Prediction failed: {}", e);
                Err(error_response(&e))
            }
        }
    })
}
