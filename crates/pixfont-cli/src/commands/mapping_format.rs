//! Mapping-format command implementation

use std::fs;

use anyhow::{bail, Context, Result};
use pixfont_mapping::Mapping;

use crate::cli::MappingFormatArgs;

pub fn run(args: &MappingFormatArgs) -> Result<()> {
    let path = &args.file;
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let mapping = Mapping::parse(&original)
        .with_context(|| format!("Failed to parse mapping '{}'", path.display()))?;
    let formatted = mapping.to_text(&args.flavors.order());

    if formatted == original {
        log::info!("'{}' is already canonical", path.display());
        return Ok(());
    }
    if args.check {
        bail!("'{}' is not in canonical form", path.display());
    }
    fs::write(path, formatted).with_context(|| format!("Failed to write '{}'", path.display()))?;
    println!("Formatted '{}'", path.display());
    Ok(())
}
