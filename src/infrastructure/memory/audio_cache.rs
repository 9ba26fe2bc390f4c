//! In-Memory LRU Audio Cache Implementation
//!
//! 进程内音频缓存，重启即丢失。容量与存活时间均有上限：
//! - 写入前先清理过期条目，再按最久未访问淘汰直到容纳新条目
//! - 读取到过期条目时视为不存在并删除
//! - 写入互斥执行，读取不加写锁

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::ports::{
    AudioCachePort, CacheError, CacheStats, CachedAudio, Clock, StoreReceipt,
};

/// 内存缓存配置（0 表示不限制）
#[derive(Debug, Clone)]
pub struct AudioCacheConfig {
    /// 最大条目数
    pub max_entries: usize,
    /// 最大缓存大小（字节）
    pub max_size_bytes: u64,
    /// 条目存活时间（秒），从写入时刻起算
    pub ttl_secs: u64,
}

impl Default for AudioCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            max_size_bytes: 64 * 1024 * 1024, // 64MB
            ttl_secs: 3600,
        }
    }
}

/// 内部缓存条目
#[derive(Debug, Clone)]
struct CacheEntry {
    audio_data: Vec<u8>,
    size_bytes: u64,
    version: u64,
    created_at: DateTime<Utc>,
    last_accessed: DateTime<Utc>,
}

/// 内存音频缓存
pub struct InMemoryAudioCache {
    entries: DashMap<String, CacheEntry>,
    config: AudioCacheConfig,
    clock: Arc<dyn Clock>,
    current_size: AtomicU64,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
    eviction_count: AtomicU64,
    /// 串行化 store：清理、替换、淘汰、插入与容量计数作为一个整体
    write_lock: Mutex<()>,
}

impl InMemoryAudioCache {
    pub fn new(config: AudioCacheConfig, clock: Arc<dyn Clock>) -> Self {
        tracing::info!(
            max_entries = config.max_entries,
            max_size_bytes = config.max_size_bytes,
            ttl_secs = config.ttl_secs,
            "InMemoryAudioCache initialized"
        );

        Self {
            entries: DashMap::new(),
            config,
            clock,
            current_size: AtomicU64::new(0),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
            eviction_count: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        }
    }

    fn is_expired(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        self.config.ttl_secs > 0
            && now - entry.created_at >= Duration::seconds(self.config.ttl_secs as i64)
    }

    fn remove_entry(&self, key: &str) -> Option<CacheEntry> {
        let (_, entry) = self.entries.remove(key)?;
        self.current_size.fetch_sub(entry.size_bytes, Ordering::Relaxed);
        Some(entry)
    }

    /// 清理所有过期条目
    fn purge_expired(&self, now: DateTime<Utc>) {
        if self.config.ttl_secs == 0 {
            return;
        }

        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| self.is_expired(entry.value(), now))
            .map(|entry| entry.key().clone())
            .collect();

        for key in expired {
            if self.remove_entry(&key).is_some() {
                tracing::debug!(threat_id = %key, "Expired audio purged");
            }
        }
    }

    fn exceeds_limits(&self, incoming_size: u64) -> bool {
        let over_entries =
            self.config.max_entries > 0 && self.entries.len() >= self.config.max_entries;
        let over_size = self.config.max_size_bytes > 0
            && self.current_size.load(Ordering::Relaxed) + incoming_size
                > self.config.max_size_bytes;
        over_entries || over_size
    }

    /// LRU 淘汰，缓存为空时返回 false
    fn evict_lru(&self) -> bool {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().last_accessed)
            .map(|entry| entry.key().clone());

        let Some(key) = oldest else {
            return false;
        };

        if let Some(entry) = self.remove_entry(&key) {
            self.eviction_count.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                threat_id = %key,
                size_bytes = entry.size_bytes,
                "LRU evicted cache entry"
            );
        }
        true
    }
}

impl AudioCachePort for InMemoryAudioCache {
    fn store(&self, threat_id: &str, audio_data: Vec<u8>) -> Result<StoreReceipt, CacheError> {
        let size = audio_data.len() as u64;
        if self.config.max_size_bytes > 0 && size > self.config.max_size_bytes {
            return Err(CacheError::EntryTooLarge {
                size,
                limit: self.config.max_size_bytes,
            });
        }

        // 锁只保护 ()，持锁方 panic 后状态仍一致
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let now = self.clock.now();
        self.purge_expired(now);

        // 同一标识：替换旧条目，版本号递增
        let previous = self.remove_entry(threat_id);
        let version = previous.as_ref().map_or(1, |e| e.version + 1);

        while self.exceeds_limits(size) {
            if !self.evict_lru() {
                break;
            }
        }

        let displaced = self.entries.insert(
            threat_id.to_string(),
            CacheEntry {
                audio_data,
                size_bytes: size,
                version,
                created_at: now,
                last_accessed: now,
            },
        );
        self.current_size.fetch_add(size, Ordering::Relaxed);
        if let Some(displaced) = displaced {
            self.current_size
                .fetch_sub(displaced.size_bytes, Ordering::Relaxed);
        }

        if previous.is_some() {
            tracing::debug!(threat_id = %threat_id, version = version, "Cached audio replaced");
        } else {
            tracing::debug!(threat_id = %threat_id, size_bytes = size, "Audio cached");
        }

        Ok(StoreReceipt {
            version,
            replaced: previous.is_some(),
        })
    }

    fn fetch(&self, threat_id: &str) -> Result<CachedAudio, CacheError> {
        let now = self.clock.now();

        let found = match self.entries.get_mut(threat_id) {
            Some(mut entry) if !self.is_expired(&entry, now) => {
                entry.last_accessed = now;
                Some(CachedAudio {
                    threat_id: threat_id.to_string(),
                    audio_data: entry.audio_data.clone(),
                    version: entry.version,
                    created_at: entry.created_at,
                })
            }
            Some(_) => None,
            None => None,
        };

        match found {
            Some(audio) => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                Ok(audio)
            }
            None => {
                // 过期条目在释放读锁之后删除
                if let Some((_, entry)) = self
                    .entries
                    .remove_if(threat_id, |_, entry| self.is_expired(entry, now))
                {
                    self.current_size.fetch_sub(entry.size_bytes, Ordering::Relaxed);
                }
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                Err(CacheError::NotFound(threat_id.to_string()))
            }
        }
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            total_size_bytes: self.current_size.load(Ordering::Relaxed),
            max_entries: self.config.max_entries,
            max_size_bytes: self.config.max_size_bytes,
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            eviction_count: self.eviction_count.load(Ordering::Relaxed),
        }
    }
}
