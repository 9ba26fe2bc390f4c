//! Audio Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::AudioCachePort;
use crate::application::queries::audio_queries::{GetAudioQuery, GetAudioResponse};

/// ElevenLabs 默认输出 MP3
const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// 下载文件名：标识中 `[A-Za-z0-9._-]` 以外的字符替换为 `_`，保证可写入响应头
fn audio_filename(threat_id: &str) -> String {
    let stem: String = threat_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.mp3", stem)
}

/// GetAudio Handler - 获取缓存中的音频数据
pub struct GetAudioHandler {
    audio_cache: Arc<dyn AudioCachePort>,
}

impl GetAudioHandler {
    pub fn new(audio_cache: Arc<dyn AudioCachePort>) -> Self {
        Self { audio_cache }
    }

    pub fn handle(&self, query: GetAudioQuery) -> Result<GetAudioResponse, ApplicationError> {
        let cached = self.audio_cache.fetch(&query.threat_id)?;

        tracing::debug!(
            threat_id = %query.threat_id,
            audio_size = cached.audio_data.len(),
            version = cached.version,
            "Audio served from cache"
        );

        Ok(GetAudioResponse {
            audio_data: cached.audio_data,
            content_type: AUDIO_CONTENT_TYPE,
            filename: audio_filename(&query.threat_id),
        })
    }
}
