//! Errors raised while parsing timeline configuration.

use thiserror::Error;

/// Errors produced by the motion parsers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    #[error("unknown ease `{0}`")]
    UnknownEase(String),

    #[error("invalid ease parameters in `{0}`")]
    InvalidEaseParams(String),

    #[error("invalid position parameter `{0}`")]
    InvalidPosition(String),

    #[error("invalid trigger edge `{0}`")]
    InvalidEdge(String),

    #[error("unknown toggle action `{0}`")]
    UnknownToggleAction(String),

    #[error("toggle actions need exactly four entries, got `{0}`")]
    ToggleActionCount(String),
}

pub type Result<T> = std::result::Result<T, MotionError>;
