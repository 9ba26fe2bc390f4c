//! Domain Layer - 领域层
//!
//! 只有一个限界上下文:
//! - Alert Context: 告警标识、投递渠道、上游提供方、通知卡片

pub mod alert;

pub use alert::{
    duration_estimate_secs, AlertCard, AlertChannel, AlertError, Capabilities, Provider,
    ThreatId, ThreatIdPrefix, CARD_STATUS, CARD_SUMMARY, CARD_THEME_COLOR, CARD_TITLE,
};
