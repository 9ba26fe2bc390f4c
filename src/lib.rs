//! Sentinel Voice - GraphSentinel 安全告警通知中继
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Alert Context: 告警渠道、威胁 ID、Teams 卡片
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechEngine, Telephony, ChatNotifier, AudioCache, Clock）
//! - Commands: 语音合成、外呼、Teams 推送、多渠道告警
//! - Queries: 音频查询
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 有界 LRU + TTL 音频缓存
//! - Adapters: ElevenLabs、Twilio、Teams Webhook 客户端与时钟

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
