//! Draw command implementation

use anyhow::{Context, Result};
use pixfont_bitmap::GlyphRaster;

use crate::cli::DrawArgs;

pub fn run(args: &DrawArgs) -> Result<()> {
    let raster = GlyphRaster::load(&args.png)
        .with_context(|| format!("Failed to load '{}'", args.png.display()))?;
    print!("{}", raster.bitmap.draw(&args.ink, &args.background, Some("|")));
    if let Some(mask) = &raster.mask {
        println!("mask:");
        print!("{}", mask.draw(&args.ink, &args.background, Some("|")));
    }
    Ok(())
}
