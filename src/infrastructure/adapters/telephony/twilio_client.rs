//! Twilio Client - 通过 Twilio 发起语音外呼
//!
//! 实现 TelephonyPort trait
//!
//! 外部 API:
//! POST https://api.twilio.com/2010-04-01/Accounts/{sid}/Calls.json
//! Auth: HTTP Basic (account_sid, auth_token)
//! Request: form {To, From, Twiml}
//! Response: JSON, 呼叫 ID 位于 `sid`
//!
//! TwiML 使用 `<Say>` 直接朗读文本；缓存中的音频没有公开可访问的 URL，不做引用

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{CallReceipt, OutboundCall, ProviderError, TelephonyPort};

/// Twilio 客户端配置
#[derive(Debug, Clone)]
pub struct TwilioClientConfig {
    /// API 基础 URL
    pub base_url: String,
    pub account_sid: String,
    pub auth_token: String,
    /// 主叫号码
    pub from_number: String,
    /// `<Say>` 使用的音色
    pub voice: String,
    /// `<Say>` 使用的语言
    pub language: String,
    /// 请求超时时间（秒），None 表示使用传输层默认值
    pub timeout_secs: Option<u64>,
}

impl Default for TwilioClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.twilio.com".to_string(),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            voice: "Polly.Vicki".to_string(),
            language: "de-DE".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateCallResponse {
    sid: Option<String>,
}

/// 构造朗读文本的 TwiML
pub fn build_say_twiml(message: &str, voice: &str, language: &str) -> String {
    format!(
        r#"<Response><Say voice="{}" language="{}">{}</Say></Response>"#,
        escape_xml(voice),
        escape_xml(language),
        escape_xml(message)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Twilio 外呼客户端
pub struct TwilioClient {
    client: Client,
    config: TwilioClientConfig,
}

impl TwilioClient {
    pub fn new(config: TwilioClientConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

/// 200 或 201 视为成功
fn is_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

#[async_trait]
impl TelephonyPort for TwilioClient {
    async fn place_call(&self, call: OutboundCall) -> Result<CallReceipt, ProviderError> {
        let twiml = build_say_twiml(&call.message, &self.config.voice, &self.config.language);

        tracing::debug!(
            to = %call.to_number,
            from = %self.config.from_number,
            twiml_len = twiml.len(),
            "Sending Twilio call request"
        );

        let form = [
            ("To", call.to_number.as_str()),
            ("From", self.config.from_number.as_str()),
            ("Twiml", twiml.as_str()),
        ];

        let response = self
            .client
            .post(self.calls_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
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

        let created: CreateCallResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse call: {}", e)))?;

        tracing::info!(call_sid = ?created.sid, to = %call.to_number, "Twilio call created");

        Ok(CallReceipt {
            call_sid: created.sid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::stub_server;

    fn client(base_url: &str) -> TwilioClient {
        TwilioClient::new(TwilioClientConfig {
            base_url: base_url.into(),
            account_sid: "AC1".into(),
            auth_token: "tok".into(),
            from_number: "+4940000000".into(),
            timeout_secs: Some(5),
            ..Default::default()
        })
        .unwrap()
    }

    fn call() -> OutboundCall {
        OutboundCall {
            to_number: "+4930000000".into(),
            message: "Angriff erkannt".into(),
        }
    }

    #[test]
    fn test_ok_and_created_are_success() {
        assert!(is_success(StatusCode::OK));
        assert!(is_success(StatusCode::CREATED));
        assert!(!is_success(StatusCode::ACCEPTED));
        assert!(!is_success(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_place_call_posts_form_with_basic_auth() {
        let (base_url, server) =
            stub_server::respond_once(201, "application/json", br#"{"sid":"CA9"}"#).await;

        let receipt = client(&base_url).place_call(call()).await.unwrap();
        assert_eq!(receipt.call_sid.as_deref(), Some("CA9"));

        let raw = server.await.unwrap();
        let lowered = raw.to_ascii_lowercase();
        assert!(raw.starts_with("POST /2010-04-01/Accounts/AC1/Calls.json HTTP/1.1"));
        // base64("AC1:tok")
        assert!(raw.contains("Basic QUMxOnRvaw=="));
        assert!(lowered.contains("content-type: application/x-www-form-urlencoded"));
        assert!(raw.contains("To=%2B4930000000"));
        assert!(raw.contains("From=%2B4940000000"));
        assert!(raw.contains("Twiml=%3CResponse%3E%3CSay"));
    }

    #[tokio::test]
    async fn test_rejected_call_is_upstream_error() {
        let (base_url, _server) =
            stub_server::respond_once(400, "application/json", br#"{"message":"bad number"}"#).await;

        let err = client(&base_url).place_call(call()).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Upstream { status: 400, ref body } if body.contains("bad number")
        ));
    }

    #[test]
    fn test_twiml_speaks_message() {
        assert_eq!(
            build_say_twiml("Angriff erkannt", "Polly.Vicki", "de-DE"),
            r#"<Response><Say voice="Polly.Vicki" language="de-DE">Angriff erkannt</Say></Response>"#
        );
    }

    #[test]
    fn test_twiml_escapes_markup() {
        let twiml = build_say_twiml("a < b & \"c\"", "Polly.Vicki", "de-DE");
        assert!(twiml.contains(">a &lt; b &amp; &quot;c&quot;</Say>"));
        assert!(!twiml.contains("a < b"));
    }

    #[test]
    fn test_calls_url() {
        let client = TwilioClient::new(TwilioClientConfig {
            account_sid: "AC123".into(),
            base_url: "http://localhost:4010/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.calls_url(),
            "http://localhost:4010/2010-04-01/Accounts/AC123/Calls.json"
        );
    }

    #[test]
    fn test_call_response_sid_is_optional() {
        let parsed: CreateCallResponse = serde_json::from_str(r#"{"status":"queued"}"#).unwrap();
        assert!(parsed.sid.is_none());
        let parsed: CreateCallResponse = serde_json::from_str(r#"{"sid":"CA42"}"#).unwrap();
        assert_eq!(parsed.sid.as_deref(), Some("CA42"));
    }
}
