//! Error types for the analysis core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpectroError {
    #[error("FFT length must be a power of two (got {0})")]
    NonPowerOfTwo(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Spectrogram shape mismatch: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Analysis cancelled")]
    Cancelled,
}

/// Shorthand for results carrying a [`SpectroError`]
pub type Result<T> = std::result::Result<T, SpectroError>;
