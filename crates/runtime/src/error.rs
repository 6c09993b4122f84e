//! Runtime error types.

use combat_content::SetupError;
use combat_core::ConfigError;
use thiserror::Error;

/// Errors raised while assembling a duel. Nothing in the tick path returns
/// these; a running duel only ever reports statuses and action results.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid combat config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid duel setup: {0}")]
    InvalidSetup(#[from] SetupError),

    #[error("unknown preset `{0}` (expected aggressive, defensive, balanced or patroller)")]
    UnknownPreset(String),
}

impl RuntimeError {
    /// Stable identifier for logs and exit reports.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "RUNTIME_INVALID_CONFIG",
            Self::InvalidSetup(_) => "RUNTIME_INVALID_SETUP",
            Self::UnknownPreset(_) => "RUNTIME_UNKNOWN_PRESET",
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
