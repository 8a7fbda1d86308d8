//! Error types for the painting engine

use thiserror::Error;

/// Errors surfaced to callers of the painting engine.
///
/// Only construction-time and configuration failures are reported here.
/// Degenerate strokes and out-of-texture samples are skipped silently inside
/// the rasterizer and never produce an error.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source image must have 3 channels, got {0}")]
    UnsupportedChannels(u8),

    #[error("{map} is {actual:?} but the source image is {expected:?}")]
    DimensionMismatch {
        map: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Invalid brush texture: {0}")]
    InvalidTexture(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid painter state: {0}")]
    InvalidState(String),
}

impl From<PaintError> for String {
    fn from(err: PaintError) -> Self {
        err.to_string()
    }
}
