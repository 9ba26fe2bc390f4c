//! Audio Handlers

use axum::{
    body::Body,
    extract::{Path, State},
    response::Response,
};
use http::{header, StatusCode};
use std::sync::Arc;

use crate::application::GetAudioQuery;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取缓存的音频
pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Path(threat_id): Path<String>,
) -> Result<Response, ApiError> {
    let result = state.get_audio_handler.handle(GetAudioQuery { threat_id })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.audio_data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename={}", result.filename),
        )
        .body(Body::from(result.audio_data))
        .map_err(|e| ApiError::Internal(format!("Failed to build audio response: {}", e)))
}
