//! Chat Adapter - Teams Webhook 客户端实现

mod fake_chat_client;
mod message_card;
mod teams_webhook_client;

pub use fake_chat_client::FakeChatClient;
pub use message_card::MessageCard;
pub use teams_webhook_client::{TeamsWebhookClient, TeamsWebhookClientConfig};
