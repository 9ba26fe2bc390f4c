//! Alert Commands - 多渠道告警

use std::collections::BTreeMap;

use super::{GenerateSpeechResponse, PlaceCallResponse, SendTeamsAlertResponse};
use crate::application::error::ApplicationError;
use crate::domain::AlertChannel;

/// 多渠道告警命令
#[derive(Debug, Clone)]
pub struct DispatchAlert {
    pub message: String,
    pub channels: Vec<AlertChannel>,
    /// 仅 call 渠道需要
    pub phone: Option<String>,
    pub threat_id: Option<String>,
}

/// 单个渠道的成功回执
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelReceipt {
    Teams(SendTeamsAlertResponse),
    Call(PlaceCallResponse),
    Voice(GenerateSpeechResponse),
}

/// 单个渠道的结果
///
/// 某个渠道失败不影响其它渠道的执行
#[derive(Debug)]
pub enum ChannelOutcome {
    Delivered(ChannelReceipt),
    Failed(ApplicationError),
}

impl ChannelOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

impl From<Result<ChannelReceipt, ApplicationError>> for ChannelOutcome {
    fn from(result: Result<ChannelReceipt, ApplicationError>) -> Self {
        match result {
            Ok(receipt) => Self::Delivered(receipt),
            Err(err) => Self::Failed(err),
        }
    }
}

/// 多渠道告警响应
#[derive(Debug)]
pub struct DispatchAlertResponse {
    /// 所有渠道共享的告警标识
    pub threat_id: String,
    /// 每个被请求的渠道都有一项
    pub channels: BTreeMap<AlertChannel, ChannelOutcome>,
}
