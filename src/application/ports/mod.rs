//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_cache;
mod chat_notifier;
mod clock;
mod provider;
mod speech_engine;
mod telephony;

pub use audio_cache::{AudioCachePort, CacheError, CacheStats, CachedAudio, StoreReceipt};
pub use chat_notifier::ChatNotifierPort;
pub use clock::Clock;
pub use provider::ProviderError;
pub use speech_engine::{SpeechEnginePort, SynthesisRequest, SynthesisResponse};
pub use telephony::{CallReceipt, OutboundCall, TelephonyPort};
