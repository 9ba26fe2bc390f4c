//! Fake Telephony Client - 用于测试的外呼客户端

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{CallReceipt, OutboundCall, ProviderError, TelephonyPort};

/// Fake Telephony Client
///
/// 记录收到的外呼请求，按顺序返回 `CA-fake-1`、`CA-fake-2` …
pub struct FakeTelephonyClient {
    failure: Option<(u16, String)>,
    calls: Mutex<Vec<OutboundCall>>,
}

impl FakeTelephonyClient {
    pub fn new() -> Self {
        Self {
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            failure: Some((status, body.into())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<OutboundCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for FakeTelephonyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TelephonyPort for FakeTelephonyClient {
    async fn place_call(&self, call: OutboundCall) -> Result<CallReceipt, ProviderError> {
        if let Some((status, body)) = &self.failure {
            return Err(ProviderError::Upstream {
                status: *status,
                body: body.clone(),
            });
        }

        let mut calls = self
            .calls
            .lock()
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        calls.push(call);

        Ok(CallReceipt {
            call_sid: Some(format!("CA-fake-{}", calls.len())),
        })
    }
}
