//! Teams Command Handlers

use std::sync::Arc;

use super::GenerateSpeechHandler;
use crate::application::commands::{GenerateSpeech, SendTeamsAlert, SendTeamsAlertResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{ChatNotifierPort, Clock};
use crate::domain::{AlertCard, Provider, ThreatId, ThreatIdPrefix};

/// SendTeamsAlert Handler
pub struct SendTeamsAlertHandler {
    notifier: Option<Arc<dyn ChatNotifierPort>>,
    speech: Arc<GenerateSpeechHandler>,
    clock: Arc<dyn Clock>,
    dashboard_url: String,
}

impl SendTeamsAlertHandler {
    pub fn new(
        notifier: Option<Arc<dyn ChatNotifierPort>>,
        speech: Arc<GenerateSpeechHandler>,
        clock: Arc<dyn Clock>,
        dashboard_url: impl Into<String>,
    ) -> Self {
        Self {
            notifier,
            speech,
            clock,
            dashboard_url: dashboard_url.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    pub async fn handle(
        &self,
        command: SendTeamsAlert,
    ) -> Result<SendTeamsAlertResponse, ApplicationError> {
        let notifier = self
            .notifier
            .as_ref()
            .ok_or(ApplicationError::NotConfigured(Provider::Teams))?;

        let threat_id = ThreatId::resolve(command.threat_id, ThreatIdPrefix::Teams, self.clock.now());

        // 音频只写入缓存，卡片中不携带
        let audio_generated = if command.include_audio && self.speech.is_enabled() {
            self.speech
                .handle(GenerateSpeech::new(
                    command.message.clone(),
                    Some(threat_id.as_str().to_string()),
                ))
                .await?;
            true
        } else {
            false
        };

        let card = AlertCard::new(
            threat_id.clone(),
            command.message,
            self.clock.now(),
            self.dashboard_url.clone(),
        );

        notifier
            .post_card(&card)
            .await
            .map_err(|e| ApplicationError::from_provider(Provider::Teams, e))?;

        tracing::info!(
            threat_id = %threat_id,
            audio_generated = audio_generated,
            "Teams alert sent"
        );

        Ok(SendTeamsAlertResponse {
            threat_id: threat_id.into_inner(),
            audio_generated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::AudioCachePort;
    use crate::application::commands::handlers::test_support::{Fixture, DASHBOARD_URL};
    use crate::domain::Capabilities;

    fn alert(include_audio: bool) -> SendTeamsAlert {
        SendTeamsAlert {
            message: "Suspicious OAuth consent granted".into(),
            threat_id: None,
            include_audio,
        }
    }

    #[tokio::test]
    async fn test_teams_with_audio() {
        let fixture = Fixture::new();
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: true,
            twilio: false,
            teams: true,
        });

        let result = handlers.teams.handle(alert(true)).await.unwrap();

        assert_eq!(result.threat_id, "TMS-20240501120000");
        assert!(result.audio_generated);
        // 语音使用同一标识
        assert!(fixture.cache.fetch("TMS-20240501120000").is_ok());

        let cards = fixture.chat.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].threat_id.as_str(), "TMS-20240501120000");
        assert_eq!(cards[0].message, "Suspicious OAuth consent granted");
        assert_eq!(cards[0].dashboard_url, DASHBOARD_URL);
    }

    #[tokio::test]
    async fn test_teams_skips_audio_when_speech_disabled() {
        let fixture = Fixture::new();
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: false,
            twilio: false,
            teams: true,
        });

        let result = handlers.teams.handle(alert(true)).await.unwrap();

        assert!(!result.audio_generated);
        assert_eq!(fixture.cache.stats().total_entries, 0);
    }

    #[tokio::test]
    async fn test_teams_skips_audio_when_not_requested() {
        let fixture = Fixture::new();
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: true,
            twilio: false,
            teams: true,
        });

        let result = handlers.teams.handle(alert(false)).await.unwrap();

        assert!(!result.audio_generated);
        assert!(fixture.speech.requests().is_empty());
    }

    #[tokio::test]
    async fn test_teams_not_configured() {
        let fixture = Fixture::new();
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: true,
            twilio: true,
            teams: false,
        });

        let err = handlers.teams.handle(alert(true)).await.unwrap_err();

        assert_eq!(err.to_string(), "Teams webhook not configured");
        assert!(fixture.speech.requests().is_empty());
    }

    #[tokio::test]
    async fn test_teams_webhook_failure() {
        let fixture = Fixture::with_failing_chat(400, "Bad payload received by generic incoming webhook.");
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: false,
            twilio: false,
            teams: true,
        });

        let err = handlers.teams.handle(alert(true)).await.unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Upstream {
                provider: Provider::Teams,
                status: 400,
                ..
            }
        ));
    }
}
