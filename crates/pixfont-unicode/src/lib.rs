// this_file: crates/pixfont-unicode/src/lib.rs

//! Unicode lookups shared across pixfont crates.
//!
//! Two questions come up when organizing and describing a glyph tree: which
//! named block a code point belongs to (the canonical layout groups files by
//! block), and whether a character can be shown literally in a
//! human-readable comment.

use icu_properties::{props::GeneralCategory, CodePointMapData, CodePointMapDataBorrowed};

/// Name of the block whose directories get an extra level of nesting
pub const CJK_UNIFIED_IDEOGRAPHS: &str = "CJK Unified Ideographs";

/// A named, contiguous range of code points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnicodeBlock {
    pub name: &'static str,
    pub start: u32,
    pub end: u32,
}

impl UnicodeBlock {
    pub fn contains(&self, code_point: u32) -> bool {
        (self.start..=self.end).contains(&code_point)
    }

    /// `"4E00-9FFF CJK Unified Ideographs"`: the directory name used by the canonical layout
    pub fn dir_name(&self) -> String {
        format!("{:04X}-{:04X} {}", self.start, self.end, self.name)
    }

    pub fn is_cjk_unified_ideographs(&self) -> bool {
        self.name == CJK_UNIFIED_IDEOGRAPHS
    }
}

/// Block and general-category lookups with ICU data baked in.
pub struct UnicodeCatalog {
    categories: CodePointMapDataBorrowed<'static, GeneralCategory>,
}

impl UnicodeCatalog {
    pub fn new() -> Self {
        Self {
            categories: CodePointMapData::<GeneralCategory>::new(),
        }
    }

    /// The block containing `code_point`, if any
    ///
    /// Surrogates, out-of-range values and code points outside every
    /// allocated block have none.
    pub fn block(&self, code_point: u32) -> Option<UnicodeBlock> {
        let ch = char::from_u32(code_point)?;
        unicode_blocks::find_unicode_block(ch).map(|block| UnicodeBlock {
            name: block.name(),
            start: block.start(),
            end: block.end(),
        })
    }

    /// Whether the character can be written literally into text meant for people
    ///
    /// Controls, format characters, surrogates, private-use and unassigned code
    /// points, and every separator except the plain space are not printable.
    pub fn is_printable(&self, code_point: u32) -> bool {
        let Some(ch) = char::from_u32(code_point) else {
            return false;
        };
        if ch == ' ' {
            return true;
        }
        !matches!(
            self.categories.get(ch),
            GeneralCategory::Control
                | GeneralCategory::Format
                | GeneralCategory::Surrogate
                | GeneralCategory::PrivateUse
                | GeneralCategory::Unassigned
                | GeneralCategory::SpaceSeparator
                | GeneralCategory::LineSeparator
                | GeneralCategory::ParagraphSeparator
        )
    }
}

impl Default for UnicodeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for [`UnicodeCatalog::block`]
pub fn block_of(code_point: u32) -> Option<UnicodeBlock> {
    UnicodeCatalog::new().block(code_point)
}

/// Shorthand for [`UnicodeCatalog::is_printable`]
pub fn is_printable(code_point: u32) -> bool {
    UnicodeCatalog::new().is_printable(code_point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_latin_block() {
        let block = block_of(0x41).unwrap();
        assert_eq!(block.name, "Basic Latin");
        assert_eq!(block.start, 0x0000);
        assert_eq!(block.end, 0x007F);
        assert_eq!(block.dir_name(), "0000-007F Basic Latin");
        assert!(block.contains(0x7F));
        assert!(!block.contains(0x80));
    }

    #[test]
    fn test_cjk_block() {
        let block = block_of(0x4E11).unwrap();
        assert!(block.is_cjk_unified_ideographs());
        assert_eq!(block.start, 0x4E00);
        assert!(!block_of(0x3042).unwrap().is_cjk_unified_ideographs());
    }

    #[test]
    fn test_no_block() {
        assert_eq!(block_of(0xD800), None);
        assert_eq!(block_of(0x110000), None);
    }

    #[test]
    fn test_printable() {
        let catalog = UnicodeCatalog::new();
        assert!(catalog.is_printable('A' as u32));
        assert!(catalog.is_printable(' ' as u32));
        assert!(catalog.is_printable(0x6AA4));
        assert!(!catalog.is_printable(0x0005));
        assert!(!catalog.is_printable(0x00A0));
        assert!(!catalog.is_printable(0x200B));
        assert!(!catalog.is_printable(0xE000));
        assert!(!catalog.is_printable(0xD800));
    }
}
