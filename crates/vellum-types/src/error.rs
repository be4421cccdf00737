//! Error types for Vellum.

use std::io;

/// Errors produced by the Vellum compositor and its backends.
#[derive(Debug, thiserror::Error)]
pub enum SkinError {
    #[error("rasterizer error: {0}")]
    Rasterize(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid image size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("invalid slice metrics: {0}")]
    InvalidMetrics(String),

    /// The native backend and the metrics table disagree about a control's
    /// template size.
    #[error(
        "template image is {actual_width}x{actual_height} but slice metrics declare \
         {expected_width}x{expected_height}"
    )]
    MetricsMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SkinError>;
