//! Call Command Handlers

use std::sync::Arc;

use super::GenerateSpeechHandler;
use crate::application::commands::{GenerateSpeech, PlaceCall, PlaceCallResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{OutboundCall, TelephonyPort};
use crate::domain::Provider;

/// PlaceCall Handler
///
/// 先生成语音（写入缓存），再发起外呼。外呼本身由上游直接朗读文本，
/// 不引用缓存音频（没有可公开访问的音频 URL）
pub struct PlaceCallHandler {
    telephony: Option<Arc<dyn TelephonyPort>>,
    speech: Arc<GenerateSpeechHandler>,
}

impl PlaceCallHandler {
    pub fn new(telephony: Option<Arc<dyn TelephonyPort>>, speech: Arc<GenerateSpeechHandler>) -> Self {
        Self { telephony, speech }
    }

    pub fn is_enabled(&self) -> bool {
        self.telephony.is_some()
    }

    pub async fn handle(&self, command: PlaceCall) -> Result<PlaceCallResponse, ApplicationError> {
        // 在生成语音之前检查，未配置时不产生任何副作用
        let telephony = self
            .telephony
            .as_ref()
            .ok_or(ApplicationError::NotConfigured(Provider::Twilio))?;

        let speech = self
            .speech
            .handle(GenerateSpeech::new(command.message.clone(), command.threat_id))
            .await?;

        let receipt = telephony
            .place_call(OutboundCall {
                to_number: command.to_number.clone(),
                message: command.message,
            })
            .await
            .map_err(|e| ApplicationError::from_provider(Provider::Twilio, e))?;

        tracing::info!(
            threat_id = %speech.threat_id,
            call_sid = ?receipt.call_sid,
            "Call initiated"
        );

        Ok(PlaceCallResponse {
            call_sid: receipt.call_sid,
            to: command.to_number,
            threat_id: speech.threat_id,
        })
    }
}
