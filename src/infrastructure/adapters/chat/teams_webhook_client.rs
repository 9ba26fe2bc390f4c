//! Teams Webhook Client - 向 Teams Incoming Webhook 推送告警卡片
//!
//! 实现 ChatNotifierPort trait
//!
//! POST {webhook_url}
//! Request: MessageCard (JSON)
//! Response: 200/201 视为成功

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use super::MessageCard;
use crate::application::ports::{ChatNotifierPort, ProviderError};
use crate::domain::AlertCard;

/// Teams Webhook 客户端配置
#[derive(Debug, Clone)]
pub struct TeamsWebhookClientConfig {
    pub webhook_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl TeamsWebhookClientConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            timeout_secs: 10,
        }
    }
}

/// Teams Webhook 客户端
pub struct TeamsWebhookClient {
    client: Client,
    config: TeamsWebhookClientConfig,
}

impl TeamsWebhookClient {
    pub fn new(config: TeamsWebhookClientConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }
}

/// 200 或 201 视为成功
fn is_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

#[async_trait]
impl ChatNotifierPort for TeamsWebhookClient {
    async fn post_card(&self, card: &AlertCard) -> Result<(), ProviderError> {
        let payload = MessageCard::from(card);

        tracing::debug!(threat_id = %card.threat_id, "Posting Teams card");

        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        if !is_success(status) {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(threat_id = %card.threat_id, "Teams card delivered");
        Ok(())
    }
}
