//! HTTP Handlers

mod alert;
mod audio;
mod call;
mod speech;
mod status;
mod teams;

pub use alert::*;
pub use audio::*;
pub use call::*;
pub use speech::*;
pub use status::*;
pub use teams::*;
