//! Call Commands - 电话外呼

/// 外呼命令
#[derive(Debug, Clone)]
pub struct PlaceCall {
    /// 目标号码，不做校验直接透传
    pub to_number: String,
    pub message: String,
    pub threat_id: Option<String>,
}

/// 外呼响应
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCallResponse {
    pub call_sid: Option<String>,
    pub to: String,
    pub threat_id: String,
}
