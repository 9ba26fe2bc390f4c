//! 应用层 - 命令（写操作 / 外部投递）
//!
//! CQRS 命令侧：语音合成、外呼、Teams 通知、多渠道告警

mod alert_commands;
mod call_commands;
mod speech_commands;
mod teams_commands;

pub mod handlers;

pub use alert_commands::*;
pub use call_commands::*;
pub use speech_commands::*;
pub use teams_commands::*;
