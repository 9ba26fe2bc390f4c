//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态。
//! 未配置的上游不注入适配器，对应能力即为关闭

use std::sync::Arc;

use crate::application::{
    // Command handlers
    DispatchAlertHandler, GenerateSpeechHandler, PlaceCallHandler, SendTeamsAlertHandler,
    // Query handlers
    GetAudioHandler,
    // Ports
    AudioCachePort, ChatNotifierPort, Clock, SpeechEnginePort, TelephonyPort,
};
use crate::domain::Capabilities;

/// 上游适配器（None 表示未配置）
#[derive(Default, Clone)]
pub struct Providers {
    pub speech: Option<Arc<dyn SpeechEnginePort>>,
    pub telephony: Option<Arc<dyn TelephonyPort>>,
    pub chat: Option<Arc<dyn ChatNotifierPort>>,
}

impl Providers {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            elevenlabs: self.speech.is_some(),
            twilio: self.telephony.is_some(),
            teams: self.chat.is_some(),
        }
    }
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub capabilities: Capabilities,
    pub audio_cache: Arc<dyn AudioCachePort>,
    pub clock: Arc<dyn Clock>,

    // ========== Command Handlers ==========
    pub generate_speech_handler: Arc<GenerateSpeechHandler>,
    pub place_call_handler: Arc<PlaceCallHandler>,
    pub send_teams_handler: Arc<SendTeamsAlertHandler>,
    pub dispatch_alert_handler: DispatchAlertHandler,

    // ========== Query Handlers ==========
    pub get_audio_handler: GetAudioHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        providers: Providers,
        audio_cache: Arc<dyn AudioCachePort>,
        clock: Arc<dyn Clock>,
        dashboard_url: impl Into<String>,
    ) -> Self {
        let capabilities = providers.capabilities();

        let generate_speech_handler = Arc::new(GenerateSpeechHandler::new(
            providers.speech,
            audio_cache.clone(),
            clock.clone(),
        ));
        let place_call_handler = Arc::new(PlaceCallHandler::new(
            providers.telephony,
            generate_speech_handler.clone(),
        ));
        let send_teams_handler = Arc::new(SendTeamsAlertHandler::new(
            providers.chat,
            generate_speech_handler.clone(),
            clock.clone(),
            dashboard_url,
        ));

        Self {
            capabilities,
            audio_cache: audio_cache.clone(),
            clock: clock.clone(),

            dispatch_alert_handler: DispatchAlertHandler::new(
                send_teams_handler.clone(),
                place_call_handler.clone(),
                generate_speech_handler.clone(),
                clock,
            ),
            generate_speech_handler,
            place_call_handler,
            send_teams_handler,

            get_audio_handler: GetAudioHandler::new(audio_cache),
        }
    }
}
