//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            errno: i32::from(status.as_u16()),
            error: error.into(),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    ServiceUnavailable(String),
    /// 透传上游状态码
    Upstream { status: StatusCode, message: String },
    BadGateway(String),
    GatewayTimeout(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream { status, .. } => *status,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Internal(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::BadGateway(msg)
            | ApiError::GatewayTimeout(msg) => msg,
            ApiError::Upstream { message, .. } => message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        match &self {
            ApiError::NotFound(_) => {
                tracing::warn!(status = status.as_u16(), error = %message, "Resource not found")
            }
            ApiError::BadRequest(_) => {
                tracing::warn!(status = status.as_u16(), error = %message, "Bad request")
            }
            ApiError::ServiceUnavailable(_) => {
                tracing::warn!(status = status.as_u16(), error = %message, "Provider not configured")
            }
            ApiError::Upstream { .. } | ApiError::BadGateway(_) | ApiError::GatewayTimeout(_) => {
                tracing::error!(status = status.as_u16(), error = %message, "Upstream provider failed")
            }
            ApiError::Internal(_) => {
                tracing::error!(status = status.as_u16(), error = %message, "Internal server error")
            }
        }

        (status, Json(ErrorResponse::new(status, message))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        let message = e.to_string();
        match e {
            ApplicationError::NotConfigured(_) => ApiError::ServiceUnavailable(message),
            ApplicationError::Upstream { status, .. } => {
                // 非错误状态码（如 204）不能原样作为失败响应返回
                match StatusCode::from_u16(status) {
                    Ok(status) if status.is_client_error() || status.is_server_error() => {
                        ApiError::Upstream { status, message }
                    }
                    _ => ApiError::BadGateway(message),
                }
            }
            ApplicationError::ProviderTimeout(_) => ApiError::GatewayTimeout(message),
            ApplicationError::ProviderUnavailable { .. } => ApiError::BadGateway(message),
            ApplicationError::NotFound { .. } => ApiError::NotFound(message),
            ApplicationError::ValidationError(_) => ApiError::BadRequest(message),
            ApplicationError::StorageError(_) => ApiError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Provider;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApplicationError::NotConfigured(Provider::Twilio), StatusCode::SERVICE_UNAVAILABLE),
            (
                ApplicationError::Upstream {
                    provider: Provider::ElevenLabs,
                    status: 429,
                    body: "quota".into(),
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                ApplicationError::Upstream {
                    provider: Provider::ElevenLabs,
                    status: 202,
                    body: String::new(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (ApplicationError::ProviderTimeout(Provider::Teams), StatusCode::GATEWAY_TIMEOUT),
            (ApplicationError::not_found("Audio", "x"), StatusCode::NOT_FOUND),
            (ApplicationError::validation("bad"), StatusCode::BAD_REQUEST),
        ];

        for (app_error, expected) in cases {
            assert_eq!(ApiError::from(app_error).status(), expected);
        }
    }

    #[test]
    fn test_error_response_body() {
        let body = serde_json::to_value(ErrorResponse::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Twilio not configured",
        ))
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"errno": 503, "error": "Twilio not configured"})
        );
    }
}
