//! Teams MessageCard - Office 365 Connector 卡片线格式
//!
//! 将领域层的 AlertCard 渲染为 Incoming Webhook 接受的 JSON

use serde::Serialize;

use crate::domain::{AlertCard, CARD_SUMMARY, CARD_THEME_COLOR, CARD_TITLE};

#[derive(Debug, Serialize)]
pub struct MessageCard {
    #[serde(rename = "@type")]
    card_type: &'static str,
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "themeColor")]
    theme_color: &'static str,
    summary: &'static str,
    sections: Vec<Section>,
    #[serde(rename = "potentialAction")]
    potential_action: Vec<OpenUriAction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Section {
    activity_title: &'static str,
    activity_subtitle: String,
    facts: Vec<Fact>,
    text: String,
    markdown: bool,
}

#[derive(Debug, Serialize)]
struct Fact {
    name: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct OpenUriAction {
    #[serde(rename = "@type")]
    action_type: &'static str,
    name: &'static str,
    targets: Vec<Target>,
}

#[derive(Debug, Serialize)]
struct Target {
    os: &'static str,
    uri: String,
}

impl From<&AlertCard> for MessageCard {
    fn from(card: &AlertCard) -> Self {
        Self {
            card_type: "MessageCard",
            context: "http://schema.org/extensions",
            theme_color: CARD_THEME_COLOR,
            summary: CARD_SUMMARY,
            sections: vec![Section {
                activity_title: CARD_TITLE,
                activity_subtitle: card.subtitle(),
                facts: card
                    .facts()
                    .into_iter()
                    .map(|(name, value)| Fact { name, value })
                    .collect(),
                text: card.message.clone(),
                markdown: true,
            }],
            potential_action: vec![OpenUriAction {
                action_type: "OpenUri",
                name: "View Dashboard",
                targets: vec![Target {
                    os: "default",
                    uri: card.dashboard_url.clone(),
                }],
            }],
        }
    }
}
