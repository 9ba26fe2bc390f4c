//! Telephony Port - 电话呼叫抽象

use async_trait::async_trait;

use super::ProviderError;

/// 外呼请求
///
/// 上游直接朗读 `message`，不引用缓存中的音频
#[derive(Debug, Clone)]
pub struct OutboundCall {
    pub to_number: String,
    pub message: String,
}

/// 外呼回执
#[derive(Debug, Clone)]
pub struct CallReceipt {
    /// 上游分配的呼叫 ID（响应中可能缺失）
    pub call_sid: Option<String>,
}

#[async_trait]
pub trait TelephonyPort: Send + Sync {
    async fn place_call(&self, call: OutboundCall) -> Result<CallReceipt, ProviderError>;
}
