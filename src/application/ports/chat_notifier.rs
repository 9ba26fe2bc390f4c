//! Chat Notifier Port - 聊天渠道通知抽象

use async_trait::async_trait;

use super::ProviderError;
use crate::domain::AlertCard;

#[async_trait]
pub trait ChatNotifierPort: Send + Sync {
    /// 发送告警卡片
    async fn post_card(&self, card: &AlertCard) -> Result<(), ProviderError>;
}
