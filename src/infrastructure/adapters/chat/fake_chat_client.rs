//! Fake Chat Client - 用于测试的 Teams 客户端

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{ChatNotifierPort, ProviderError};
use crate::domain::AlertCard;

/// Fake Chat Client
///
/// 记录收到的卡片，不发送任何网络请求
pub struct FakeChatClient {
    failure: Option<(u16, String)>,
    cards: Mutex<Vec<AlertCard>>,
}

impl FakeChatClient {
    pub fn new() -> Self {
        Self {
            failure: None,
            cards: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            failure: Some((status, body.into())),
            cards: Mutex::new(Vec::new()),
        }
    }

    pub fn cards(&self) -> Vec<AlertCard> {
        self.cards.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for FakeChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatNotifierPort for FakeChatClient {
    async fn post_card(&self, card: &AlertCard) -> Result<(), ProviderError> {
        if let Some((status, body)) = &self.failure {
            return Err(ProviderError::Upstream {
                status: *status,
                body: body.clone(),
            });
        }

        if let Ok(mut cards) = self.cards.lock() {
            cards.push(card.clone());
        }
        Ok(())
    }
}
