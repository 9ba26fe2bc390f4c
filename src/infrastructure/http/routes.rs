//! HTTP Routes
//!
//! API Endpoints:
//! - /                       GET   服务信息与能力
//! - /health                 GET   健康检查
//! - /api/generate           POST  合成语音并缓存
//! - /api/audio/{threat_id}  GET   获取缓存音频（audio/mpeg）
//! - /api/call               POST  发起语音外呼
//! - /api/teams              POST  推送 Teams 告警卡片
//! - /api/alert              POST  多渠道告警（JSON 或查询参数）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::generate_speech))
        .route("/audio/:threat_id", get(handlers::get_audio))
        .route("/call", post(handlers::place_call))
        .route("/teams", post(handlers::send_teams_alert))
        .route("/alert", post(handlers::dispatch_alert))
}
