//! Speech Command Handlers

use std::sync::Arc;

use crate::application::commands::{GenerateSpeech, GenerateSpeechResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioCachePort, Clock, SpeechEnginePort, SynthesisRequest};
use crate::domain::{duration_estimate_secs, Provider, ThreatId, ThreatIdPrefix};

/// 音频取回路径
pub fn audio_path(threat_id: &str) -> String {
    format!("/api/audio/{}", threat_id)
}

/// GenerateSpeech Handler
///
/// 调用语音合成引擎，并将音频写入缓存供 `/api/audio/{threat_id}` 取回
pub struct GenerateSpeechHandler {
    engine: Option<Arc<dyn SpeechEnginePort>>,
    audio_cache: Arc<dyn AudioCachePort>,
    clock: Arc<dyn Clock>,
}

impl GenerateSpeechHandler {
    pub fn new(
        engine: Option<Arc<dyn SpeechEnginePort>>,
        audio_cache: Arc<dyn AudioCachePort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            engine,
            audio_cache,
            clock,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.engine.is_some()
    }

    pub async fn handle(
        &self,
        command: GenerateSpeech,
    ) -> Result<GenerateSpeechResponse, ApplicationError> {
        let engine = self
            .engine
            .as_ref()
            .ok_or(ApplicationError::NotConfigured(Provider::ElevenLabs))?;

        let threat_id = ThreatId::resolve(command.threat_id, ThreatIdPrefix::Voice, self.clock.now());

        let response = engine
            .synthesize(SynthesisRequest {
                text: command.message.clone(),
                language: command.language,
            })
            .await
            .map_err(|e| ApplicationError::from_provider(Provider::ElevenLabs, e))?;

        let audio_size = response.audio_data.len();
        let receipt = self.audio_cache.store(threat_id.as_str(), response.audio_data)?;

        tracing::info!(
            threat_id = %threat_id,
            audio_size = audio_size,
            version = receipt.version,
            "Speech generated"
        );

        Ok(GenerateSpeechResponse {
            audio_url: audio_path(threat_id.as_str()),
            duration_estimate: duration_estimate_secs(&command.message),
            threat_id: threat_id.into_inner(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::handlers::test_support::Fixture;
    use crate::domain::Capabilities;

    #[tokio::test]
    async fn test_generate_stores_audio_under_supplied_id() {
        let fixture = Fixture::new();
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: true,
            ..Default::default()
        });

        let result = handlers
            .speech
            .handle(GenerateSpeech::new(
                "Intrusion detected on node 7",
                Some("VOC-TEST1".into()),
            ))
            .await
            .unwrap();

        assert_eq!(
            result,
            GenerateSpeechResponse {
                threat_id: "VOC-TEST1".into(),
                audio_url: "/api/audio/VOC-TEST1".into(),
                duration_estimate: 1,
            }
        );
        let cached = fixture.cache.fetch("VOC-TEST1").unwrap();
        assert_eq!(cached.audio_data, fixture.speech.audio());
        assert_eq!(fixture.speech.requests()[0].language, "de");
    }

    #[tokio::test]
    async fn test_generate_without_id_uses_voice_prefix() {
        let fixture = Fixture::new();
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: true,
            ..Default::default()
        });

        let result = handlers
            .speech
            .handle(GenerateSpeech::new("hello", None))
            .await
            .unwrap();

        assert_eq!(result.threat_id, "VOC-20240501120000");
        assert_eq!(result.duration_estimate, 0);
    }

    #[tokio::test]
    async fn test_generate_not_configured() {
        let fixture = Fixture::new();
        let handlers = fixture.handlers(Capabilities::default());

        let err = handlers
            .speech
            .handle(GenerateSpeech::new("hello", Some("VOC-X".into())))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::NotConfigured(Provider::ElevenLabs)));
        assert!(fixture.speech.requests().is_empty());
        assert_eq!(fixture.cache.stats().total_entries, 0);
    }

    #[tokio::test]
    async fn test_generate_upstream_failure_leaves_cache_untouched() {
        let fixture = Fixture::with_failing_speech(401, "invalid_api_key");
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: true,
            ..Default::default()
        });

        let err = handlers
            .speech
            .handle(GenerateSpeech::new("hello", Some("VOC-X".into())))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "ElevenLabs error: invalid_api_key");
        assert!(matches!(err, ApplicationError::Upstream { status: 401, .. }));
        assert_eq!(fixture.cache.stats().total_entries, 0);
    }
}
