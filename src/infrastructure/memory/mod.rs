//! Memory Layer - In-Memory State Management
//!
//! 进程内状态：告警音频缓存（重启即丢失）

mod audio_cache;

pub use audio_cache::{AudioCacheConfig, InMemoryAudioCache};
