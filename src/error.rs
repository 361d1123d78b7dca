//! Errors raised while setting up map generation.

use thiserror::Error;

/// Smallest supported edge length, in tiles.
pub const MIN_EDGE: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("map must be at least {MIN_EDGE}x{MIN_EDGE} tiles, got {columns}x{rows}")]
    InvalidDimensions { columns: usize, rows: usize },

    #[error("invalid generator parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, MapError>;
