//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{CacheError, ProviderError};
use crate::domain::{AlertError, Provider};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 上游能力未配置
    #[error("{}", .0.not_configured_message())]
    NotConfigured(Provider),

    /// 上游返回非成功状态码
    #[error("{provider} error: {body}")]
    Upstream {
        provider: Provider,
        status: u16,
        body: String,
    },

    /// 上游请求超时
    #[error("{0} request timed out")]
    ProviderTimeout(Provider),

    /// 上游不可达或响应无法解析
    #[error("{provider} unavailable: {reason}")]
    ProviderUnavailable { provider: Provider, reason: String },

    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 将适配器错误归属到具体提供方
    pub fn from_provider(provider: Provider, err: ProviderError) -> Self {
        match err {
            ProviderError::Upstream { status, body } => Self::Upstream {
                provider,
                status,
                body,
            },
            ProviderError::Timeout => Self::ProviderTimeout(provider),
            ProviderError::Network(reason) | ProviderError::InvalidResponse(reason) => {
                Self::ProviderUnavailable { provider, reason }
            }
        }
    }
}

impl From<CacheError> for ApplicationError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::NotFound(id) => Self::not_found("Audio", id),
            other => Self::StorageError(other.to_string()),
        }
    }
}

impl From<AlertError> for ApplicationError {
    fn from(err: AlertError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_provider() {
        assert_eq!(
            ApplicationError::NotConfigured(Provider::Teams).to_string(),
            "Teams webhook not configured"
        );

        let err = ApplicationError::from_provider(
            Provider::ElevenLabs,
            ProviderError::Upstream {
                status: 401,
                body: "invalid api key".into(),
            },
        );
        assert_eq!(err.to_string(), "ElevenLabs error: invalid api key");
        assert!(matches!(err, ApplicationError::Upstream { status: 401, .. }));
    }

    #[test]
    fn test_timeout_and_network_mapping() {
        assert!(matches!(
            ApplicationError::from_provider(Provider::Twilio, ProviderError::Timeout),
            ApplicationError::ProviderTimeout(Provider::Twilio)
        ));
        assert!(matches!(
            ApplicationError::from_provider(Provider::Teams, ProviderError::Network("refused".into())),
            ApplicationError::ProviderUnavailable { provider: Provider::Teams, .. }
        ));
    }

    #[test]
    fn test_cache_not_found_maps_to_not_found() {
        let err: ApplicationError = CacheError::NotFound("VOC-1".into()).into();
        assert_eq!(err.to_string(), "Audio not found: VOC-1");
    }
}
