//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 兼容旧部署的扁平环境变量（ELEVENLABS_KEY、TWILIO_SID、PORT 等）
//! 2. 带前缀的环境变量（SENTINEL_VOICE_*）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 扁平环境变量 → 配置键
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("ELEVENLABS_KEY", "elevenlabs.api_key"),
    ("ELEVENLABS_VOICE", "elevenlabs.voice_id"),
    ("TWILIO_SID", "twilio.account_sid"),
    ("TWILIO_TOKEN", "twilio.auth_token"),
    ("TWILIO_FROM", "twilio.from_number"),
    ("TEAMS_WEBHOOK", "teams.webhook_url"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `SENTINEL_VOICE_SERVER__PORT=9090`
/// - `SENTINEL_VOICE_ELEVENLABS__API_KEY=...`
/// - `SENTINEL_VOICE_CACHE__TTL_SECS=600`
/// - `ELEVENLABS_KEY=...` / `TWILIO_SID=...` / `TEAMS_WEBHOOK=...` / `PORT=8080`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    build_config(config_path, |name| std::env::var(name).ok())
}

/// 构建配置，`lookup` 用于读取扁平环境变量（测试时可替换）
fn build_config<F>(config_path: Option<&Path>, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 带前缀的环境变量
    // 前缀: SENTINEL_VOICE_
    // 层级分隔符: __ (双下划线)
    // 不开启 try_parsing：号码需保持字符串原样（`+49...`），数值字段在反序列化时转换
    builder = builder.add_source(
        Environment::with_prefix("SENTINEL_VOICE")
            .prefix_separator("_")
            .separator("__"),
    );

    // 4. 扁平环境变量（最高优先级）
    builder = apply_legacy_env(builder, &lookup)?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn apply_legacy_env<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: &F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

    for (env_name, key) in LEGACY_ENV_KEYS {
        builder = builder.set_override_option(*key, non_empty(*env_name))?;
    }

    if let Some(port) = non_empty("PORT") {
        let port: u16 = port
            .parse()
            .map_err(|_| ConfigError::ParseError(format!("Invalid PORT value: {}", port)))?;
        builder = builder.set_override("server.port", i64::from(port))?;
    }

    Ok(builder)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.elevenlabs.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "ElevenLabs timeout cannot be 0".to_string(),
        ));
    }

    if config.teams.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Teams timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

fn secret_state(value: &str) -> &'static str {
    if value.is_empty() {
        "unset"
    } else {
        "set"
    }
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    let caps = config.capabilities();
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!(
        "ElevenLabs: enabled={}, api_key={}, voice={}, timeout={}s",
        caps.elevenlabs,
        secret_state(&config.elevenlabs.api_key),
        config.elevenlabs.voice_id,
        config.elevenlabs.timeout_secs
    );
    tracing::info!(
        "Twilio: enabled={}, account_sid={}, auth_token={}, from={}",
        caps.twilio,
        secret_state(&config.twilio.account_sid),
        secret_state(&config.twilio.auth_token),
        config.twilio.from_number
    );
    tracing::info!(
        "Teams: enabled={}, webhook={}, timeout={}s",
        caps.teams,
        secret_state(&config.teams.webhook_url),
        config.teams.timeout_secs
    );
    tracing::info!(
        "Audio Cache: max_entries={}, max_bytes={}, ttl={}s",
        config.cache.max_entries,
        config.cache.max_bytes,
        config.cache.ttl_secs
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_legacy_env_enables_capabilities() {
        let file = write_config("");
        let config = build_config(
            Some(file.path()),
            env(&[
                ("ELEVENLABS_KEY", "xi-123"),
                ("TWILIO_SID", "AC1"),
                ("TWILIO_TOKEN", "secret"),
                ("TWILIO_FROM", "+4930000000"),
                ("TEAMS_WEBHOOK", "https://example.webhook.office.com/x"),
                ("PORT", "9091"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 9091);
        assert_eq!(config.elevenlabs.api_key, "xi-123");
        assert_eq!(config.elevenlabs.voice_id, "21m00Tcm4TlvDq8ikWAM");
        let caps = config.capabilities();
        assert!(caps.elevenlabs && caps.twilio && caps.teams);
    }

    #[test]
    fn test_config_file_values() {
        let file = write_config(
            r#"
[server]
port = 7000

[teams]
webhook_url = "https://example.webhook.office.com/y"
dashboard_url = "https://soc.example"

[cache]
ttl_secs = 120
max_entries = 8
"#,
        );

        let config = build_config(Some(file.path()), env(&[])).unwrap();

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.teams.dashboard_url, "https://soc.example");
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.cache.max_entries, 8);
        assert_eq!(config.cache.max_bytes, 64 * 1024 * 1024);
        assert!(config.capabilities().teams);
        assert!(!config.capabilities().elevenlabs);
    }

    #[test]
    fn test_legacy_env_overrides_file_and_ignores_empty() {
        let file = write_config(
            r#"
[elevenlabs]
api_key = "from-file"
voice_id = "file-voice"
"#,
        );

        let config = build_config(
            Some(file.path()),
            env(&[("ELEVENLABS_KEY", "from-env"), ("ELEVENLABS_VOICE", "")]),
        )
        .unwrap();

        assert_eq!(config.elevenlabs.api_key, "from-env");
        assert_eq!(config.elevenlabs.voice_id, "file-voice");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let file = write_config("");
        let err = build_config(Some(file.path()), env(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.teams.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }
}
