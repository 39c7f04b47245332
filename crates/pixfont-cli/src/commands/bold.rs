//! Bold command implementation

use anyhow::{Context, Result};
use pixfont_bitmap::MonoBitmap;

use crate::cli::BoldArgs;

pub fn run(args: &BoldArgs) -> Result<()> {
    let bitmap = MonoBitmap::load_png(&args.png)
        .with_context(|| format!("Failed to load '{}'", args.png.display()))?;
    let bold = args
        .method
        .apply(&bitmap)
        .with_context(|| format!("Failed to embolden with {}", args.method))?;
    bold.save_png(&args.output, args.color)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;

    log::info!(
        "{} -> {} ({}x{} to {}x{})",
        args.png.display(),
        args.output.display(),
        bitmap.width(),
        bitmap.height(),
        bold.width(),
        bold.height()
    );
    Ok(())
}
