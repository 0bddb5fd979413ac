//! Health endpoint.
//!
//! A running process has by construction finished startup successfully, so
//! this always answers 200.

use super::{handlers::AppState, types::StatusResponse};
use axum::{extract::State, response::Json};

/// GET /status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(snapshot(&state))
}

pub fn snapshot(state: &AppState) -> StatusResponse {
    let context = &state.context;
    StatusResponse {
        status: "OK".to_string(),
        service: context.service_name.clone(),
        model_ready: context.is_ready(),
        model_version: context.readiness.model_version.clone(),
        loaded_at: context.loaded_at,
    }
}
