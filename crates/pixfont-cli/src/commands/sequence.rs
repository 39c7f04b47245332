//! Sequence command implementation

use anyhow::{Context, Result};

use crate::cli::SequenceArgs;

/// Prints one `name<TAB>path` line per glyph, in embedding order
pub fn run(args: &SequenceArgs) -> Result<()> {
    let context = super::load_context(&args.root, args.mapping.as_deref())?;
    let sequence = context
        .glyph_sequence(&args.flavors.priority())
        .context("Failed to build the glyph sequence")?;

    for glyph in &sequence {
        println!("{}\t{}", glyph.glyph_name(), glyph.path().display());
    }
    log::info!("{} glyphs in sequence", sequence.len());
    Ok(())
}
