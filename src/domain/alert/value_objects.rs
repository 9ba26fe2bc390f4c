//! Alert Context - Value Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::AlertError;

/// 告警标识前缀
///
/// 各入口在调用方未提供标识时使用不同前缀生成
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatIdPrefix {
    /// 语音合成 (/api/generate)
    Voice,
    /// Teams 通知 (/api/teams)
    Teams,
    /// 多渠道告警 (/api/alert)
    Alert,
}

impl ThreatIdPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Voice => "VOC",
            Self::Teams => "TMS",
            Self::Alert => "ALT",
        }
    }
}

/// 告警唯一标识
///
/// 调用方提供的值原样使用，不校验格式与唯一性
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreatId(String);

impl ThreatId {
    /// 生成 `<PREFIX>-<YYYYMMDDHHMMSS>` 形式的标识
    pub fn generate(prefix: ThreatIdPrefix, at: DateTime<Utc>) -> Self {
        Self(format!("{}-{}", prefix.as_str(), at.format("%Y%m%d%H%M%S")))
    }

    /// 解析调用方输入：非空则原样使用，否则按前缀生成
    pub fn resolve(supplied: Option<String>, prefix: ThreatIdPrefix, now: DateTime<Utc>) -> Self {
        match supplied {
            Some(id) if !id.is_empty() => Self(id),
            _ => Self::generate(prefix, now),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ThreatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 投递渠道
///
/// 声明顺序即多渠道告警的执行顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertChannel {
    Teams,
    Call,
    Voice,
}

impl AlertChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teams => "teams",
            Self::Call => "call",
            Self::Voice => "voice",
        }
    }
}

impl FromStr for AlertChannel {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "teams" => Ok(Self::Teams),
            "call" => Ok(Self::Call),
            "voice" => Ok(Self::Voice),
            other => Err(AlertError::UnknownChannel(other.to_string())),
        }
    }
}

impl std::fmt::Display for AlertChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 上游提供方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    ElevenLabs,
    Twilio,
    Teams,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "ElevenLabs",
            Self::Twilio => "Twilio",
            Self::Teams => "Teams",
        }
    }

    /// 未配置时返回给调用方的提示
    pub fn not_configured_message(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "ElevenLabs not configured",
            Self::Twilio => "Twilio not configured",
            Self::Teams => "Teams webhook not configured",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 各上游能力是否可用（由配置是否齐全决定）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub elevenlabs: bool,
    pub twilio: bool,
    pub teams: bool,
}

/// 粗略估算语音时长（秒）：每 15 个字符约 1 秒
pub fn duration_estimate_secs(message: &str) -> u64 {
    (message.chars().count() / 15) as u64
}
