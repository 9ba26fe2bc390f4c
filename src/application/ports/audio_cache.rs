//! Audio Cache Port - 音频缓存管理
//!
//! 定义音频缓存的抽象接口，具体实现为内存 LRU 缓存（容量 + TTL 双重约束）

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Audio Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Audio not found: {0}")]
    NotFound(String),

    #[error("Audio payload too large: {size} bytes exceeds cache limit of {limit} bytes")]
    EntryTooLarge { size: u64, limit: u64 },
}

/// 缓存中的音频
#[derive(Debug, Clone)]
pub struct CachedAudio {
    pub threat_id: String,
    pub audio_data: Vec<u8>,
    /// 同一标识被写入的次数（从 1 开始）
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

/// 写入回执
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreReceipt {
    pub version: u64,
    /// 是否覆盖了已有条目
    pub replaced: bool,
}

/// 缓存统计信息
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_size_bytes: u64,
    pub max_entries: usize,
    pub max_size_bytes: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub eviction_count: u64,
}

/// Audio Cache Port
///
/// 以告警标识为 key 的音频缓存
/// - 同一标识重复写入：替换旧条目，版本号递增
/// - 超出容量：淘汰最久未访问的条目
/// - 超过 TTL：视为不存在
pub trait AudioCachePort: Send + Sync {
    /// 存储音频数据
    fn store(&self, threat_id: &str, audio_data: Vec<u8>) -> Result<StoreReceipt, CacheError>;

    /// 获取音频数据，同时更新访问时间（LRU touch）
    fn fetch(&self, threat_id: &str) -> Result<CachedAudio, CacheError>;

    /// 获取缓存统计信息
    fn stats(&self) -> CacheStats;
}
