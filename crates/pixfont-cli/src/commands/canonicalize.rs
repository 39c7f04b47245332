//! Canonicalize command implementation

use anyhow::{Context, Result};
use pixfont_core::layout;

use crate::cli::CanonicalizeArgs;

pub fn run(args: &CanonicalizeArgs) -> Result<()> {
    let mut context = super::load_context(&args.root, None)?;
    let report = layout::canonicalize(&mut context, &args.root, &args.flavors.order(), args.color)
        .with_context(|| format!("Failed to canonicalize '{}'", args.root.display()))?;

    println!(
        "{} glyphs re-encoded, {} moved, {} empty directories removed",
        report.encoded, report.moved, report.pruned
    );
    Ok(())
}
