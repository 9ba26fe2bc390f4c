//! Alert Handlers
//!
//! 多渠道告警入口，接受 JSON 请求体，缺省时回退到查询参数

use axum::{
    extract::{Query, State},
    Json,
};
use std::str::FromStr;
use std::sync::Arc;

use crate::application::{ApplicationError, DispatchAlert};
use crate::domain::AlertChannel;
use crate::infrastructure::http::dto::{AlertQueryParams, AlertRequest, AlertResponseDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 分发多渠道告警
pub async fn dispatch_alert(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AlertQueryParams>,
    body: Option<Json<AlertRequest>>,
) -> Result<Json<AlertResponseDto>, ApiError> {
    let command = match body {
        Some(Json(req)) => from_body(req)?,
        None => from_query(params)?,
    };

    let result = state.dispatch_alert_handler.handle(command).await;

    Ok(Json(result.into()))
}

fn from_body(req: AlertRequest) -> Result<DispatchAlert, ApiError> {
    let channels = match req.channels {
        Some(names) => parse_channels(names.iter().map(String::as_str))?,
        None => vec![AlertChannel::Teams],
    };

    Ok(DispatchAlert {
        message: req.message,
        channels,
        phone: req.phone,
        threat_id: req.threat_id,
    })
}

fn from_query(params: AlertQueryParams) -> Result<DispatchAlert, ApiError> {
    let message = params
        .message
        .ok_or_else(|| ApiError::from(ApplicationError::validation("message is required")))?;

    let channels = match params.channels.as_deref() {
        Some(raw) => parse_channels(raw.split(',').filter(|s| !s.trim().is_empty()))?,
        None => vec![AlertChannel::Teams],
    };

    Ok(DispatchAlert {
        message,
        channels,
        phone: params.phone,
        threat_id: params.threat_id,
    })
}

fn parse_channels<'a>(names: impl Iterator<Item = &'a str>) -> Result<Vec<AlertChannel>, ApiError> {
    names
        .map(|name| {
            AlertChannel::from_str(name).map_err(|e| ApiError::from(ApplicationError::from(e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_defaults_to_teams() {
        let command = from_body(AlertRequest {
            message: "m".into(),
            channels: None,
            phone: None,
            threat_id: None,
        })
        .unwrap();
        assert_eq!(command.channels, vec![AlertChannel::Teams]);
    }

    #[test]
    fn test_query_channels_are_split_and_trimmed() {
        let command = from_query(AlertQueryParams {
            message: Some("m".into()),
            channels: Some("voice, Call,".into()),
            phone: Some("+4930".into()),
            threat_id: None,
        })
        .unwrap();
        assert_eq!(command.channels, vec![AlertChannel::Voice, AlertChannel::Call]);
        assert_eq!(command.phone.as_deref(), Some("+4930"));
    }

    #[test]
    fn test_query_requires_message() {
        let err = from_query(AlertQueryParams::default()).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_unknown_channel_is_rejected() {
        let err = from_body(AlertRequest {
            message: "m".into(),
            channels: Some(vec!["sms".into()]),
            phone: None,
            threat_id: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg.contains("sms")));
    }
}
