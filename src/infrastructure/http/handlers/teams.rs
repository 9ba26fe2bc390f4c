//! Teams Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::SendTeamsAlert;
use crate::infrastructure::http::dto::{SendTeamsRequest, SendTeamsResponseDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 推送 Teams 告警卡片
pub async fn send_teams_alert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendTeamsRequest>,
) -> Result<Json<SendTeamsResponseDto>, ApiError> {
    let command = SendTeamsAlert {
        message: req.message,
        threat_id: req.threat_id,
        include_audio: req.include_audio,
    };

    let result = state.send_teams_handler.handle(command).await?;

    Ok(Json(result.into()))
}
