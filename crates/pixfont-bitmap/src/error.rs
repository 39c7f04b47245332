//! Error types for bitmap operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BitmapError>;

/// Everything that can go wrong while building, transforming or coding a bitmap
#[derive(Debug, Error)]
pub enum BitmapError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Row {row} has width {found}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "Region {width}x{height} at ({x}, {y}) lies outside the {bitmap_width}x{bitmap_height} bitmap"
    )]
    RegionOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
        bitmap_width: usize,
        bitmap_height: usize,
    },

    #[error("Mask is {mask_width}x{mask_height} but bitmap is {width}x{height}")]
    MaskMismatch {
        width: usize,
        height: usize,
        mask_width: usize,
        mask_height: usize,
    },

    #[error("PNG decoding failed: {0}")]
    PngDecode(String),

    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
