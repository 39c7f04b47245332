//! One glyph image on disk
//!
//! File names carry everything needed to index a glyph:
//!
//! ```text
//! notdef.png              the fallback glyph
//! 0041.png                'A', default flavor
//! 4E00 zh_cn,zh_tw.png    '一', shared by two flavors
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use pixfont_bitmap::{GlyphRaster, MonoBitmap};

use crate::error::{ParseError, PixfontError, Result};
use crate::{CodePoint, NOTDEF};

const IMAGE_EXTENSION: &str = "png";
const NOTDEF_STEM: &str = "notdef";

/// A glyph image plus the code point and flavors parsed from its name
///
/// The raster is read on first access and kept for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct GlyphFile {
    path: PathBuf,
    code_point: CodePoint,
    flavors: Vec<String>,
    raster: OnceLock<GlyphRaster>,
}

impl GlyphFile {
    /// Parses `path`'s file name; the image itself is not read yet
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let (code_point, flavors) = parse_file_name(&path)?;
        Ok(Self::new(path, code_point, flavors))
    }

    pub fn new(path: impl Into<PathBuf>, code_point: CodePoint, flavors: Vec<String>) -> Self {
        Self {
            path: path.into(),
            code_point,
            flavors,
            raster: OnceLock::new(),
        }
    }

    /// Seeds the raster so it is never read from disk
    pub fn with_raster(self, raster: GlyphRaster) -> Self {
        Self {
            raster: OnceLock::from(raster),
            ..self
        }
    }

    /// The same glyph recorded at another path with reordered flavors
    ///
    /// An already loaded raster carries over.
    pub fn relocated(&self, path: impl Into<PathBuf>, flavors: Vec<String>) -> Self {
        Self {
            path: path.into(),
            code_point: self.code_point,
            flavors,
            raster: self.raster.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn code_point(&self) -> CodePoint {
        self.code_point
    }

    pub fn flavors(&self) -> &[String] {
        &self.flavors
    }

    pub fn is_notdef(&self) -> bool {
        self.code_point == NOTDEF
    }

    pub fn raster(&self) -> Result<&GlyphRaster> {
        if let Some(raster) = self.raster.get() {
            return Ok(raster);
        }
        let raster = GlyphRaster::load(&self.path).map_err(|source| PixfontError::GlyphBitmap {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("Loaded '{}'", self.path.display());
        Ok(self.raster.get_or_init(|| raster))
    }

    pub fn bitmap(&self) -> Result<&MonoBitmap> {
        Ok(&self.raster()?.bitmap)
    }

    pub fn width(&self) -> Result<usize> {
        Ok(self.bitmap()?.width())
    }

    pub fn height(&self) -> Result<usize> {
        Ok(self.bitmap()?.height())
    }

    /// `.notdef`, `u0041`, or `u4E00-ZH_CN` after the first flavor
    pub fn glyph_name(&self) -> String {
        if self.is_notdef() {
            return ".notdef".to_string();
        }
        match self.flavors.first() {
            Some(flavor) => format!("u{:04X}-{}", self.code_point, flavor.to_uppercase()),
            None => format!("u{:04X}", self.code_point),
        }
    }
}

impl PartialEq for GlyphFile {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.code_point == other.code_point
            && self.flavors == other.flavors
    }
}

impl Eq for GlyphFile {}

fn parse_file_name(path: &Path) -> Result<(CodePoint, Vec<String>)> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(IMAGE_EXTENSION) {
        return Err(ParseError::NotImage(path.to_path_buf()).into());
    }
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| ParseError::FileName(path.to_path_buf()))?
        .trim();

    let (head, rest) = match stem.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, Some(rest.trim())),
        None => (stem, None),
    };

    if head == NOTDEF_STEM {
        if rest.is_some() {
            return Err(ParseError::NotdefFlavors(path.to_path_buf()).into());
        }
        return Ok((NOTDEF, Vec::new()));
    }

    let code_point = parse_hex(head).ok_or_else(|| ParseError::FileCodePoint {
        path: path.to_path_buf(),
        token: head.to_string(),
    })?;

    let mut flavors: Vec<String> = Vec::new();
    if let Some(rest) = rest {
        for token in rest.to_lowercase().split(',') {
            let token = token.trim();
            if token.is_empty() {
                return Err(ParseError::EmptyFlavor(path.to_path_buf()).into());
            }
            if !flavors.iter().any(|flavor| flavor == token) {
                flavors.push(token.to_string());
            }
        }
    }
    Ok((code_point, flavors))
}

/// Bare hex digits, optionally behind `0x`
pub fn parse_hex(text: &str) -> Option<CodePoint> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(|value| CodePoint::try_from(value).ok())
}
