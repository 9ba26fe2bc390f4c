//! Alert Command Handlers - 多渠道告警编排

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{GenerateSpeechHandler, PlaceCallHandler, SendTeamsAlertHandler};
use crate::application::commands::{
    ChannelOutcome, ChannelReceipt, DispatchAlert, DispatchAlertResponse, GenerateSpeech, PlaceCall,
    SendTeamsAlert,
};
use crate::application::error::ApplicationError;
use crate::application::ports::Clock;
use crate::domain::{AlertChannel, Provider, ThreatId, ThreatIdPrefix};

/// DispatchAlert Handler
///
/// 所有渠道共享同一个 `ALT-` 标识，按 teams → call → voice 顺序依次执行。
/// 每个渠道的失败被记录为该渠道的结果，不会中断其它渠道
pub struct DispatchAlertHandler {
    teams: Arc<SendTeamsAlertHandler>,
    call: Arc<PlaceCallHandler>,
    speech: Arc<GenerateSpeechHandler>,
    clock: Arc<dyn Clock>,
}

impl DispatchAlertHandler {
    pub fn new(
        teams: Arc<SendTeamsAlertHandler>,
        call: Arc<PlaceCallHandler>,
        speech: Arc<GenerateSpeechHandler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            teams,
            call,
            speech,
            clock,
        }
    }

    pub async fn handle(&self, command: DispatchAlert) -> DispatchAlertResponse {
        let threat_id = ThreatId::resolve(command.threat_id, ThreatIdPrefix::Alert, self.clock.now());

        let mut requested = command.channels;
        requested.sort();
        requested.dedup();

        let mut channels = BTreeMap::new();
        for channel in requested {
            let outcome: ChannelOutcome = self
                .dispatch_channel(channel, &command.message, command.phone.as_deref(), &threat_id)
                .await
                .into();

            if let ChannelOutcome::Failed(err) = &outcome {
                tracing::warn!(
                    threat_id = %threat_id,
                    channel = %channel,
                    error = %err,
                    "Alert channel failed"
                );
            }
            channels.insert(channel, outcome);
        }

        tracing::info!(
            threat_id = %threat_id,
            requested = channels.len(),
            delivered = channels.values().filter(|o| o.is_delivered()).count(),
            "Alert dispatched"
        );

        DispatchAlertResponse {
            threat_id: threat_id.into_inner(),
            channels,
        }
    }

    async fn dispatch_channel(
        &self,
        channel: AlertChannel,
        message: &str,
        phone: Option<&str>,
        threat_id: &ThreatId,
    ) -> Result<ChannelReceipt, ApplicationError> {
        let shared_id = Some(threat_id.as_str().to_string());

        match channel {
            AlertChannel::Teams => {
                let response = self
                    .teams
                    .handle(SendTeamsAlert {
                        message: message.to_string(),
                        threat_id: shared_id,
                        include_audio: true,
                    })
                    .await?;
                Ok(ChannelReceipt::Teams(response))
            }
            AlertChannel::Call => {
                if !self.call.is_enabled() {
                    return Err(ApplicationError::NotConfigured(Provider::Twilio));
                }
                let phone = phone
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| ApplicationError::validation("phone number required for call channel"))?;
                let response = self
                    .call
                    .handle(PlaceCall {
                        to_number: phone.to_string(),
                        message: message.to_string(),
                        threat_id: shared_id,
                    })
                    .await?;
                Ok(ChannelReceipt::Call(response))
            }
            AlertChannel::Voice => {
                let response = self
                    .speech
                    .handle(GenerateSpeech::new(message, shared_id))
                    .await?;
                Ok(ChannelReceipt::Voice(response))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::AudioCachePort;
    use crate::application::commands::handlers::test_support::Fixture;
    use crate::application::commands::GenerateSpeechResponse;
    use crate::domain::Capabilities;

    fn dispatch(channels: &[AlertChannel], phone: Option<&str>) -> DispatchAlert {
        DispatchAlert {
            message: "test".into(),
            channels: channels.to_vec(),
            phone: phone.map(String::from),
            threat_id: None,
        }
    }

    #[tokio::test]
    async fn test_disabled_channel_still_reported() {
        let fixture = Fixture::new();
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: false,
            twilio: false,
            teams: true,
        });

        let result = handlers
            .alert
            .handle(dispatch(
                &[AlertChannel::Teams, AlertChannel::Call],
                Some("+4930123456"),
            ))
            .await;

        assert_eq!(result.threat_id, "ALT-20240501120000");
        assert_eq!(result.channels.len(), 2);
        assert!(result.channels[&AlertChannel::Teams].is_delivered());
        match &result.channels[&AlertChannel::Call] {
            ChannelOutcome::Failed(err) => assert_eq!(err.to_string(), "Twilio not configured"),
            other => panic!("expected call failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_voice_uses_shared_alert_id() {
        let fixture = Fixture::new();
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: true,
            ..Default::default()
        });

        let result = handlers.alert.handle(dispatch(&[AlertChannel::Voice], None)).await;

        match &result.channels[&AlertChannel::Voice] {
            ChannelOutcome::Delivered(ChannelReceipt::Voice(voice)) => assert_eq!(
                voice,
                &GenerateSpeechResponse {
                    threat_id: "ALT-20240501120000".into(),
                    audio_url: "/api/audio/ALT-20240501120000".into(),
                    duration_estimate: 0,
                }
            ),
            other => panic!("expected voice receipt, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_call_without_phone_is_a_channel_error() {
        let fixture = Fixture::new();
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: true,
            twilio: true,
            teams: false,
        });

        let result = handlers
            .alert
            .handle(dispatch(&[AlertChannel::Call, AlertChannel::Voice], None))
            .await;

        assert!(matches!(
            result.channels[&AlertChannel::Call],
            ChannelOutcome::Failed(ApplicationError::ValidationError(_))
        ));
        assert!(result.channels[&AlertChannel::Voice].is_delivered());
        assert!(fixture.telephony.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_other_channels() {
        let fixture = Fixture::with_failing_chat(500, "webhook down");
        let handlers = fixture.handlers(Capabilities {
            elevenlabs: true,
            twilio: true,
            teams: true,
        });

        let mut command = dispatch(
            &[AlertChannel::Voice, AlertChannel::Teams, AlertChannel::Call, AlertChannel::Teams],
            Some("+4930123456"),
        );
        command.threat_id = Some("INC-42".into());

        let result = handlers.alert.handle(command).await;

        assert_eq!(result.threat_id, "INC-42");
        assert_eq!(result.channels.len(), 3);
        assert!(!result.channels[&AlertChannel::Teams].is_delivered());
        assert!(result.channels[&AlertChannel::Call].is_delivered());
        assert!(result.channels[&AlertChannel::Voice].is_delivered());

        // teams（失败前）、call、voice 各合成一次，共享同一标识
        assert_eq!(fixture.speech.requests().len(), 3);
        assert_eq!(fixture.cache.fetch("INC-42").unwrap().version, 3);
    }

    #[tokio::test]
    async fn test_no_channels_yields_empty_map() {
        let fixture = Fixture::new();
        let handlers = fixture.handlers(Capabilities::default());

        let result = handlers.alert.handle(dispatch(&[], None)).await;

        assert!(result.channels.is_empty());
        assert!(result.threat_id.starts_with("ALT-"));
    }
}
