//! Speech Commands - 语音合成

/// 默认语言
pub const DEFAULT_LANGUAGE: &str = "de";

/// 生成语音命令
#[derive(Debug, Clone)]
pub struct GenerateSpeech {
    pub message: String,
    pub language: String,
    pub threat_id: Option<String>,
}

impl GenerateSpeech {
    pub fn new(message: impl Into<String>, threat_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            threat_id,
        }
    }
}

/// 生成语音响应
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSpeechResponse {
    pub threat_id: String,
    /// 取回音频的相对路径
    pub audio_url: String,
    /// 粗略估算的时长（秒）
    pub duration_estimate: u64,
}
