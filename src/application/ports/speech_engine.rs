//! Speech Engine Port - 语音合成抽象
//!
//! 具体实现在 infrastructure/adapters/speech 层

use async_trait::async_trait;

use super::ProviderError;

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本
    pub text: String,
    /// 语言代码（多语言模型自动识别，仅用于日志和追踪）
    pub language: String,
}

/// 语音合成响应
#[derive(Debug, Clone)]
pub struct SynthesisResponse {
    /// 原始音频数据（MP3）
    pub audio_data: Vec<u8>,
}

/// Speech Engine Port
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// 合成语音，返回音频字节
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, ProviderError>;
}
