//! Speech Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GenerateSpeech;
use crate::infrastructure::http::dto::{GenerateSpeechRequest, GenerateSpeechResponseDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 合成语音并缓存
pub async fn generate_speech(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateSpeechRequest>,
) -> Result<Json<GenerateSpeechResponseDto>, ApiError> {
    let command = GenerateSpeech {
        message: req.message,
        language: req.language,
        threat_id: req.threat_id,
    };

    let result = state.generate_speech_handler.handle(command).await?;

    Ok(Json(result.into()))
}
