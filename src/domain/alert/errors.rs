//! Alert Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlertError {
    #[error("Unknown channel: {0} (expected one of: teams, call, voice)")]
    UnknownChannel(String),
}
