//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechEngine、Telephony、ChatNotifier、AudioCache、Clock）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    ChannelOutcome,
    ChannelReceipt,
    DispatchAlert,
    DispatchAlertResponse,
    GenerateSpeech,
    GenerateSpeechResponse,
    PlaceCall,
    PlaceCallResponse,
    SendTeamsAlert,
    SendTeamsAlertResponse,
    DEFAULT_LANGUAGE,
    // Handlers
    handlers::{
        audio_path, DispatchAlertHandler, GenerateSpeechHandler, PlaceCallHandler,
        SendTeamsAlertHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Audio cache
    AudioCachePort,
    CacheError,
    CacheStats,
    CachedAudio,
    StoreReceipt,
    // Upstream providers
    CallReceipt,
    ChatNotifierPort,
    OutboundCall,
    ProviderError,
    SpeechEnginePort,
    SynthesisRequest,
    SynthesisResponse,
    TelephonyPort,
    // Time
    Clock,
};

pub use queries::{handlers::GetAudioHandler, GetAudioQuery, GetAudioResponse};
