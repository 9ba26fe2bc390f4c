//! Call Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::PlaceCall;
use crate::infrastructure::http::dto::{PlaceCallRequest, PlaceCallResponseDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 发起语音外呼
pub async fn place_call(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlaceCallRequest>,
) -> Result<Json<PlaceCallResponseDto>, ApiError> {
    let command = PlaceCall {
        to_number: req.to_number,
        message: req.message,
        threat_id: req.threat_id,
    };

    let result = state.place_call_handler.handle(command).await?;

    Ok(Json(result.into()))
}
