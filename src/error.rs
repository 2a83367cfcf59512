//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Which argument of a two-sprite query was at fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteSlot {
    First,
    Second,
}

impl std::fmt::Display for SpriteSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpriteSlot::First => f.write_str("first"),
            SpriteSlot::Second => f.write_str("second"),
        }
    }
}

/// Error raised by the collision predicates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollisionError {
    /// A sprite was queried without a texture bound to it
    #[error("the {which} sprite has no texture bound")]
    InvalidSprite { which: SpriteSlot },
}

/// Error creating or loading a texture
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read image '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Raw pixel buffer doesn't hold exactly width * height RGBA pixels
    #[error("pixel buffer of {actual} bytes does not match {width}x{height} RGBA ({expected} bytes)")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("texture dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions { width: u32, height: u32 },
    /// A texture set doesn't have one texture per vehicle
    #[error("expected {expected} vehicle textures, got {actual}")]
    VehicleCount { expected: usize, actual: usize },
}

/// Error loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
