//! Service Status Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{HealthResponse, ServiceInfoResponse};
use crate::infrastructure::http::state::AppState;

/// 服务信息与能力
pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        service: "GraphSentinel Voice",
        status: "operational",
        version: env!("CARGO_PKG_VERSION"),
        capabilities: state.capabilities,
    })
}

/// 健康检查
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: state.clock.now().to_rfc3339(),
    })
}
