// this_file: crates/pixfont-mapping/src/lib.rs

//! Pixfont Mapping: glyphs that borrow other glyphs
//!
//! Plenty of characters look exactly like another one: Latin `A` and Greek
//! `Α`, or a CJK ideograph whose regional forms match some other
//! ideograph's. A mapping file says so once, and [`apply_mapping`] makes the
//! borrowed file show up under the mapped code point in a
//! [`GlyphContext`](pixfont_core::GlyphContext), without copying images around.
//!
//! ```rust,no_run
//! use pixfont_core::GlyphContext;
//! use pixfont_mapping::{apply_mapping, load_mapping};
//!
//! let mut context = GlyphContext::load("glyphs")?;
//! let mapping = load_mapping("mapping.yml")?;
//! apply_mapping(&mut context, &mapping)?;
//! # Ok::<(), pixfont_core::PixfontError>(())
//! ```

pub mod apply;
pub mod source;
pub mod table;

pub use apply::{apply_mapping, ApplyReport};
pub use source::{SourceFlavorGroup, SourceGlyph};
pub use table::{load_mapping, save_mapping, Mapping};
