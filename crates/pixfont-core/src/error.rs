//! Error types for pixfont

use std::path::PathBuf;

use pixfont_bitmap::BitmapError;
use thiserror::Error;

use crate::CodePoint;

pub type Result<T> = std::result::Result<T, PixfontError>;

/// Main error type for pixfont
#[derive(Debug, Error)]
pub enum PixfontError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invariant violated: {0}")]
    Invariant(#[from] InvariantError),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Bitmap error in '{}': {source}", path.display())]
    GlyphBitmap {
        path: PathBuf,
        #[source]
        source: BitmapError,
    },

    #[error("Bitmap error: {0}")]
    Bitmap(#[from] BitmapError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Malformed input: file names, code points, table entries
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("not '.png' file: '{}'", .0.display())]
    NotImage(PathBuf),

    #[error("'notdef' can't have flavors: '{}'", .0.display())]
    NotdefFlavors(PathBuf),

    #[error("invalid code point '{token}': '{}'", path.display())]
    FileCodePoint { path: PathBuf, token: String },

    #[error("empty flavor in '{}'", .0.display())]
    EmptyFlavor(PathBuf),

    #[error("unreadable file name: '{}'", .0.display())]
    FileName(PathBuf),

    #[error("invalid code point: '{0}'")]
    CodePoint(String),

    #[error("invalid mapping entry under 0x{code_point:04X}: {reason}")]
    MappingEntry { code_point: CodePoint, reason: String },
}

/// Structural conflicts between otherwise well-formed artifacts
#[derive(Debug, Error)]
pub enum InvariantError {
    #[error("Flavor '{flavor}' already exists: '{}' -> '{}'", path.display(), existing.display())]
    DuplicateFlavor {
        flavor: String,
        path: PathBuf,
        existing: PathBuf,
    },

    #[error("Default flavor already exists: '{}' -> '{}'", path.display(), existing.display())]
    DuplicateDefault { path: PathBuf, existing: PathBuf },

    #[error("'code_point' unequal: 0x{found:04X} -> 0x{expected:04X}: '{}'", path.display())]
    CodePointMismatch {
        expected: CodePoint,
        found: CodePoint,
        path: PathBuf,
    },

    #[error("'.notdef' group has no default glyph")]
    NotdefMissing,

    #[error("'.notdef' resolves to glyph '{0}'")]
    NotdefName(String),

    #[error("Duplicate glyph files: '{}' -> '{}'", path.display(), existing.display())]
    DuplicateGlyphFiles { path: PathBuf, existing: PathBuf },

    #[error("0x{code_point:04X} duplicate flavor '{flavor}'")]
    DuplicateMappingFlavor { code_point: CodePoint, flavor: String },

    #[error("0x{code_point:04X} duplicate default flavor")]
    DuplicateMappingDefault { code_point: CodePoint },

    #[error("No Unicode block contains 0x{0:04X}")]
    NoBlock(CodePoint),
}

/// A flavor that is not there
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no flavor '{flavor}' and no default for 0x{code_point:04X}")]
    NoSuchFlavor { code_point: CodePoint, flavor: String },
}
