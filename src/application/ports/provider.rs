//! Provider Error - 上游调用错误
//!
//! 所有上游适配器（ElevenLabs / Twilio / Teams）共用的传输层错误

use thiserror::Error;

/// 上游提供方错误
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 上游返回了非成功状态码
    #[error("HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// 从 reqwest 错误转换（区分超时与连接失败）
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Network(format!("Cannot connect to upstream: {}", err))
        } else {
            Self::Network(err.to_string())
        }
    }
}
