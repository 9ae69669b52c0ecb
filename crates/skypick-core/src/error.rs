//! Error types for skypick.

use thiserror::Error;

/// The main error type for skypick operations.
#[derive(Error, Debug)]
pub enum SkypickError {
    /// A material failed validation.
    #[error("invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    /// Scene options failed validation.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A skybox preset name did not match any known preset.
    #[error("unknown skybox preset '{0}'")]
    UnknownSkybox(String),

    /// An asset file referenced by the configuration does not exist.
    #[error("asset not found: {0}")]
    AssetNotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for skypick operations.
pub type Result<T> = std::result::Result<T, SkypickError>;
