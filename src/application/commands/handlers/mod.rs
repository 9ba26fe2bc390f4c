//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod alert_handlers;
mod call_handlers;
mod speech_handlers;
mod teams_handlers;

pub use alert_handlers::*;
pub use call_handlers::*;
pub use speech_handlers::*;
pub use teams_handlers::*;
