//! Error types raised while loading assets and building the map.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning an image file into a [`TextureAtlas`](crate::render::textures::TextureAtlas).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read texture atlas {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("texture atlas must have 4 color channels (RGBA), found {channels}")]
    ChannelCount { channels: usize },

    #[error("texture atlas {width}x{height} is not a strip of square tiles")]
    NotSquareTiles { width: usize, height: usize },

    #[error("texture atlas holds {expected} bytes of pixel data, got {actual}")]
    PixelDataLength { expected: usize, actual: usize },
}

/// Configuration errors in the tile map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map is declared {width}x{height} ({expected} cells) but the literal has {actual}")]
    LiteralLength {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("map row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("map has no cells")]
    Empty,

    #[error("unknown cell code {code:?} at ({x}, {y})")]
    UnknownCode { code: char, x: usize, y: usize },

    #[error("cell ({x}, {y}) uses tile {tile} but only {available} tiles are available")]
    TileOutOfRange {
        x: usize,
        y: usize,
        tile: usize,
        available: usize,
    },

    #[error("start position ({x}, {y}) is not on a passable cell")]
    BlockedSpawn { x: f32, y: f32 },

    #[error("could not read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while writing a framebuffer dump.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
