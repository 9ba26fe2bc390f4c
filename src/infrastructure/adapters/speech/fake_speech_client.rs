//! Fake Speech Client - 用于测试的语音合成客户端
//!
//! 始终返回固定的音频字节（或固定的上游错误），不实际调用 ElevenLabs

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{
    ProviderError, SpeechEnginePort, SynthesisRequest, SynthesisResponse,
};

/// 固定返回的伪 MP3 帧头
const FAKE_AUDIO: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00, 0x0F];

/// Fake Speech Client
pub struct FakeSpeechClient {
    audio_data: Vec<u8>,
    failure: Option<(u16, String)>,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl FakeSpeechClient {
    pub fn new() -> Self {
        Self {
            audio_data: FAKE_AUDIO.to_vec(),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 始终返回指定状态码的上游错误
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            failure: Some((status, body.into())),
            ..Self::new()
        }
    }

    pub fn audio(&self) -> Vec<u8> {
        self.audio_data.clone()
    }

    /// 已收到的请求
    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Default for FakeSpeechClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechEnginePort for FakeSpeechClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, ProviderError> {
        tracing::debug!(
            text_len = request.text.len(),
            language = %request.language,
            "FakeSpeechClient: returning fixed audio"
        );

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        match &self.failure {
            Some((status, body)) => Err(ProviderError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(SynthesisResponse {
                audio_data: self.audio_data.clone(),
            }),
        }
    }
}
