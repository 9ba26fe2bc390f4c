//! Alert Context - 告警限界上下文
//!
//! 职责:
//! - 告警标识 (ThreatId) 的生成与解析
//! - 投递渠道与上游提供方定义
//! - Teams 通知卡片的领域表示

mod card;
mod errors;
mod value_objects;

pub use card::{AlertCard, CARD_STATUS, CARD_SUMMARY, CARD_THEME_COLOR, CARD_TITLE};
pub use errors::AlertError;
pub use value_objects::{
    duration_estimate_secs, AlertChannel, Capabilities, Provider, ThreatId, ThreatIdPrefix,
};
