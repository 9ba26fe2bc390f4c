//! Sentinel Voice - GraphSentinel 安全告警通知中继
//!
//! - Domain: alert/ (Bounded Context)
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, adapters

use std::sync::Arc;

use sentinel_voice::application::{ChatNotifierPort, SpeechEnginePort, TelephonyPort};
use sentinel_voice::config::{load_config, print_config, AppConfig};
use sentinel_voice::infrastructure::adapters::{
    ElevenLabsClient, ElevenLabsClientConfig, SystemClock, TeamsWebhookClient,
    TeamsWebhookClientConfig, TwilioClient, TwilioClientConfig,
};
use sentinel_voice::infrastructure::http::{AppState, HttpServer, Providers, ServerConfig};
use sentinel_voice::infrastructure::memory::{AudioCacheConfig, InMemoryAudioCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：扁平环境变量 > 前缀环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},sentinel_voice={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("GraphSentinel Voice v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    let clock = Arc::new(SystemClock);

    // 只为配置齐全的上游创建适配器
    let providers = build_providers(&config)?;

    // 创建内存音频缓存
    let cache_config = AudioCacheConfig {
        max_entries: config.cache.max_entries,
        max_size_bytes: config.cache.max_bytes,
        ttl_secs: config.cache.ttl_secs,
    };
    let audio_cache = Arc::new(InMemoryAudioCache::new(cache_config, clock.clone()));

    let app_state = AppState::new(
        providers,
        audio_cache,
        clock,
        config.teams.dashboard_url.clone(),
    );

    let server = HttpServer::new(ServerConfig::from(&config.server), app_state);

    tracing::info!("Press Ctrl+C to stop");
    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn build_providers(config: &AppConfig) -> anyhow::Result<Providers> {
    let mut providers = Providers::default();

    if config.elevenlabs.is_enabled() {
        let client_config =
            ElevenLabsClientConfig::new(&config.elevenlabs.api_key, &config.elevenlabs.voice_id)
                .with_base_url(&config.elevenlabs.base_url)
                .with_timeout(config.elevenlabs.timeout_secs);
        let client: Arc<dyn SpeechEnginePort> = Arc::new(ElevenLabsClient::new(client_config)?);
        providers.speech = Some(client);
    }

    if config.twilio.is_enabled() {
        let client_config = TwilioClientConfig {
            base_url: config.twilio.base_url.clone(),
            account_sid: config.twilio.account_sid.clone(),
            auth_token: config.twilio.auth_token.clone(),
            from_number: config.twilio.from_number.clone(),
            voice: config.twilio.voice.clone(),
            language: config.twilio.language.clone(),
            timeout_secs: config.twilio.timeout_secs,
        };
        let client: Arc<dyn TelephonyPort> = Arc::new(TwilioClient::new(client_config)?);
        providers.telephony = Some(client);
    }

    if config.teams.is_enabled() {
        let client_config = TeamsWebhookClientConfig {
            webhook_url: config.teams.webhook_url.clone(),
            timeout_secs: config.teams.timeout_secs,
        };
        let client: Arc<dyn ChatNotifierPort> =
            Arc::new(TeamsWebhookClient::new(client_config)?);
        providers.chat = Some(client);
    }

    Ok(providers)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
