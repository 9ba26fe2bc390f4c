//! Alert Context - Notification Card
//!
//! 渠道无关的告警卡片内容，具体线格式由 chat 适配器负责渲染

use chrono::{DateTime, Utc};

use super::ThreatId;

/// 卡片标题
pub const CARD_TITLE: &str = "🛡️ GraphSentinel Security Alert";
/// 卡片摘要
pub const CARD_SUMMARY: &str = "Security Alert from GraphSentinel";
/// 主题色（红色）
pub const CARD_THEME_COLOR: &str = "FF4444";
/// 固定的处置状态
pub const CARD_STATUS: &str = "Auto-remediated";

/// 告警卡片
#[derive(Debug, Clone, PartialEq)]
pub struct AlertCard {
    pub threat_id: ThreatId,
    pub message: String,
    pub issued_at: DateTime<Utc>,
    pub dashboard_url: String,
}

impl AlertCard {
    pub fn new(
        threat_id: ThreatId,
        message: impl Into<String>,
        issued_at: DateTime<Utc>,
        dashboard_url: impl Into<String>,
    ) -> Self {
        Self {
            threat_id,
            message: message.into(),
            issued_at,
            dashboard_url: dashboard_url.into(),
        }
    }

    pub fn subtitle(&self) -> String {
        format!("Threat ID: {}", self.threat_id)
    }

    /// 事实表: (名称, 值)
    pub fn facts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Time", self.issued_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            ("Status", CARD_STATUS.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alert::ThreatIdPrefix;
    use chrono::TimeZone;

    #[test]
    fn test_card_facts_and_subtitle() {
        let card = AlertCard::new(
            ThreatId::resolve(Some("TMS-1".into()), ThreatIdPrefix::Teams, Utc::now()),
            "Lateral movement blocked",
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            "https://dashboard.example",
        );

        assert_eq!(card.subtitle(), "Threat ID: TMS-1");
        assert_eq!(
            card.facts(),
            vec![
                ("Time", "2024-01-02 03:04:05 UTC".to_string()),
                ("Status", "Auto-remediated".to_string()),
            ]
        );
    }
}
