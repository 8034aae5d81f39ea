// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MathError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Invalid surface dimensions: {width} x {height} (both must be finite and > 0)")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("I/O error while writing output: {0}")]
    Io(#[from] std::io::Error),
}

impl MathError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type MathResult<T> = Result<T, MathError>;
