//! Application-level errors

use saucer_engine::config::ConfigError;
use thiserror::Error;

/// Errors surfaced by the game binary
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or was invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scene setup failed
    #[error("Scene setup error: {0}")]
    Setup(String),
}
