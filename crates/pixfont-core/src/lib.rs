// this_file: crates/pixfont-core/src/lib.rs

//! Pixfont Core: a directory of PNGs becomes a glyph set
//!
//! A pixel font starts life as a tree of small images, one per character.
//! This crate reads that tree, indexes it, and keeps it tidy.
//!
//! ## The Model
//!
//! 1. **[`GlyphFile`]** - One image. Its name says which code point it draws
//!    and for which flavors (locales or styles)
//! 2. **[`FlavorGroup`]** - Every file for one code point, one per flavor slot,
//!    with the flavor-less file as fallback
//! 3. **[`GlyphContext`]** - Every group of a tree, ordered by code point
//!
//! ## Typical Run
//!
//! ```rust,no_run
//! use pixfont_core::{layout, FlavorKey, GlyphContext};
//! use pixfont_bitmap::Rgb;
//!
//! let mut context = GlyphContext::load("glyphs")?;
//! layout::canonicalize(&mut context, "glyphs", &[], Rgb::BLACK)?;
//!
//! let order = [FlavorKey::Default, FlavorKey::named("zh_cn")];
//! for glyph in context.glyph_sequence(&order)? {
//!     println!("{} {}", glyph.glyph_name(), glyph.path().display());
//! }
//! # Ok::<(), pixfont_core::PixfontError>(())
//! ```

pub mod context;
pub mod error;
pub mod flavor;
pub mod glyph;
pub mod group;
pub mod layout;

pub use context::GlyphContext;
pub use error::{InvariantError, LookupError, ParseError, PixfontError, Result};
pub use flavor::{FlavorKey, FlavorMap};
pub use glyph::{parse_hex, GlyphFile};
pub use group::FlavorGroup;
pub use layout::{canonicalize, LayoutReport};

/// Integer code point; [`NOTDEF`] marks the fallback glyph
pub type CodePoint = i32;

/// Code point of `.notdef`
pub const NOTDEF: CodePoint = -1;
