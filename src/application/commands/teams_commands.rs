//! Teams Commands - Teams 告警通知

/// 发送 Teams 告警命令
#[derive(Debug, Clone)]
pub struct SendTeamsAlert {
    pub message: String,
    pub threat_id: Option<String>,
    /// 是否同时生成语音（仅在语音能力可用时生效）
    pub include_audio: bool,
}

/// 发送 Teams 告警响应
#[derive(Debug, Clone, PartialEq)]
pub struct SendTeamsAlertResponse {
    pub threat_id: String,
    pub audio_generated: bool,
}
