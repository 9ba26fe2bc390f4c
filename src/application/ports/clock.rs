//! Clock Port - 时间来源
//!
//! 标识生成、卡片时间戳与缓存过期都从这里取当前时间，测试可注入手动时钟

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
