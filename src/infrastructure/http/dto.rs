//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::{
    ChannelOutcome, ChannelReceipt, DispatchAlertResponse, GenerateSpeechResponse,
    PlaceCallResponse, SendTeamsAlertResponse, DEFAULT_LANGUAGE,
};
use crate::domain::{AlertChannel, Capabilities};

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Service DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub capabilities: Capabilities,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

// ============================================================================
// Speech DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateSpeechRequest {
    pub message: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub threat_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateSpeechResponseDto {
    pub threat_id: String,
    pub audio_url: String,
    pub duration_estimate: u64,
}

impl From<GenerateSpeechResponse> for GenerateSpeechResponseDto {
    fn from(r: GenerateSpeechResponse) -> Self {
        Self {
            threat_id: r.threat_id,
            audio_url: r.audio_url,
            duration_estimate: r.duration_estimate,
        }
    }
}

// ============================================================================
// Call DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PlaceCallRequest {
    pub to_number: String,
    pub message: String,
    #[serde(default)]
    pub threat_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlaceCallResponseDto {
    pub status: &'static str,
    pub call_sid: Option<String>,
    pub to: String,
    pub threat_id: String,
}

impl From<PlaceCallResponse> for PlaceCallResponseDto {
    fn from(r: PlaceCallResponse) -> Self {
        Self {
            status: "initiated",
            call_sid: r.call_sid,
            to: r.to,
            threat_id: r.threat_id,
        }
    }
}

// ============================================================================
// Teams DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SendTeamsRequest {
    pub message: String,
    #[serde(default)]
    pub threat_id: Option<String>,
    #[serde(default = "default_true")]
    pub include_audio: bool,
}

#[derive(Debug, Serialize)]
pub struct SendTeamsResponseDto {
    pub status: &'static str,
    pub threat_id: String,
    pub channel: &'static str,
    pub audio_generated: bool,
}

impl From<SendTeamsAlertResponse> for SendTeamsResponseDto {
    fn from(r: SendTeamsAlertResponse) -> Self {
        Self {
            status: "sent",
            threat_id: r.threat_id,
            channel: "teams",
            audio_generated: r.audio_generated,
        }
    }
}

// ============================================================================
// Alert DTOs
// ============================================================================

/// JSON 请求体
#[derive(Debug, Deserialize)]
pub struct AlertRequest {
    pub message: String,
    #[serde(default)]
    pub channels: Option<Vec<String>>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub threat_id: Option<String>,
}

/// 查询参数（channels 以逗号分隔）
#[derive(Debug, Default, Deserialize)]
pub struct AlertQueryParams {
    pub message: Option<String>,
    pub channels: Option<String>,
    pub phone: Option<String>,
    pub threat_id: Option<String>,
}

/// 单个渠道的结果：与直接调用对应接口的响应同形，失败时为 `{"error": ...}`
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChannelResultDto {
    Teams(SendTeamsResponseDto),
    Call(PlaceCallResponseDto),
    Voice(GenerateSpeechResponseDto),
    Error { error: String },
}

impl From<ChannelOutcome> for ChannelResultDto {
    fn from(outcome: ChannelOutcome) -> Self {
        match outcome {
            ChannelOutcome::Delivered(ChannelReceipt::Teams(r)) => Self::Teams(r.into()),
            ChannelOutcome::Delivered(ChannelReceipt::Call(r)) => Self::Call(r.into()),
            ChannelOutcome::Delivered(ChannelReceipt::Voice(r)) => Self::Voice(r.into()),
            ChannelOutcome::Failed(err) => Self::Error {
                error: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlertResponseDto {
    pub threat_id: String,
    pub channels: BTreeMap<AlertChannel, ChannelResultDto>,
}

impl From<DispatchAlertResponse> for AlertResponseDto {
    fn from(r: DispatchAlertResponse) -> Self {
        Self {
            threat_id: r.threat_id,
            channels: r
                .channels
                .into_iter()
                .map(|(channel, outcome)| (channel, outcome.into()))
                .collect(),
        }
    }
}
