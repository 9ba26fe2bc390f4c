//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::Capabilities;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// ElevenLabs 语音合成配置
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    /// Twilio 外呼配置
    #[serde(default)]
    pub twilio: TwilioConfig,

    /// Teams Webhook 配置
    #[serde(default)]
    pub teams: TeamsConfig,

    /// 音频缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 各上游能力是否可用（必需项全部非空）
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            elevenlabs: self.elevenlabs.is_enabled(),
            twilio: self.twilio.is_enabled(),
            teams: self.teams.is_enabled(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// ElevenLabs 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsConfig {
    #[serde(default)]
    pub api_key: String,

    /// 音色 ID
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    #[serde(default = "default_elevenlabs_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_elevenlabs_timeout")]
    pub timeout_secs: u64,
}

fn default_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_elevenlabs_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_elevenlabs_timeout() -> u64 {
    30
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            voice_id: default_voice_id(),
            base_url: default_elevenlabs_url(),
            timeout_secs: default_elevenlabs_timeout(),
        }
    }
}

impl ElevenLabsConfig {
    pub fn is_enabled(&self) -> bool {
        !self.api_key.is_empty() && !self.voice_id.is_empty()
    }
}

/// Twilio 配置
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    #[serde(default)]
    pub account_sid: String,

    #[serde(default)]
    pub auth_token: String,

    /// 主叫号码
    #[serde(default)]
    pub from_number: String,

    #[serde(default = "default_twilio_url")]
    pub base_url: String,

    /// `<Say>` 音色
    #[serde(default = "default_twilio_voice")]
    pub voice: String,

    /// `<Say>` 语言
    #[serde(default = "default_twilio_language")]
    pub language: String,

    /// 请求超时时间（秒），未设置时使用传输层默认值
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_twilio_url() -> String {
    "https://api.twilio.com".to_string()
}

fn default_twilio_voice() -> String {
    "Polly.Vicki".to_string()
}

fn default_twilio_language() -> String {
    "de-DE".to_string()
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            base_url: default_twilio_url(),
            voice: default_twilio_voice(),
            language: default_twilio_language(),
            timeout_secs: None,
        }
    }
}

impl TwilioConfig {
    pub fn is_enabled(&self) -> bool {
        !self.account_sid.is_empty() && !self.auth_token.is_empty() && !self.from_number.is_empty()
    }
}

/// Teams 配置
#[derive(Debug, Clone, Deserialize)]
pub struct TeamsConfig {
    #[serde(default)]
    pub webhook_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_teams_timeout")]
    pub timeout_secs: u64,

    /// 卡片 "View Dashboard" 按钮指向的地址
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,
}

fn default_teams_timeout() -> u64 {
    10
}

fn default_dashboard_url() -> String {
    "https://graphsentinel.railway.app".to_string()
}

impl Default for TeamsConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_secs: default_teams_timeout(),
            dashboard_url: default_dashboard_url(),
        }
    }
}

impl TeamsConfig {
    pub fn is_enabled(&self) -> bool {
        !self.webhook_url.is_empty()
    }
}

/// 音频缓存配置（0 表示不限制）
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 最大条目数
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// 最大缓存大小（字节）
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// 条目存活时间（秒）
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

fn default_max_entries() -> usize {
    256
}

fn default_max_bytes() -> u64 {
    64 * 1024 * 1024 // 64 MB
}

fn default_ttl() -> u64 {
    3600 // 1 小时
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            max_bytes: default_max_bytes(),
            ttl_secs: default_ttl(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
