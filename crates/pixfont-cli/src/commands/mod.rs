//! One module per subcommand

pub mod bold;
pub mod canonicalize;
pub mod cmap;
pub mod draw;
pub mod kerning;
pub mod mapping_format;
pub mod sequence;

use std::path::Path;

use anyhow::{Context, Result};
use pixfont_core::{FlavorKey, GlyphContext};

use crate::cli::FlavorArgs;

impl FlavorArgs {
    /// Named flavors in priority order; `~` and blanks are dropped
    pub fn order(&self) -> Vec<String> {
        self.flavors
            .iter()
            .map(|flavor| FlavorKey::from(flavor.as_str()))
            .filter_map(|key| match key {
                FlavorKey::Named(flavor) => Some(flavor),
                FlavorKey::Default => None,
            })
            .collect()
    }

    /// Priority list for sequencing, led by the default flavor unless placed explicitly
    pub fn priority(&self) -> Vec<FlavorKey> {
        let mut keys: Vec<FlavorKey> = Vec::new();
        for flavor in &self.flavors {
            let key = FlavorKey::from(flavor.as_str());
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        if !keys.contains(&FlavorKey::Default) {
            keys.insert(0, FlavorKey::Default);
        }
        keys
    }
}

/// Loads a glyph tree, merging in a mapping file when one is given
pub fn load_context(root: &Path, mapping: Option<&Path>) -> Result<GlyphContext> {
    let mut context = GlyphContext::load(root)
        .with_context(|| format!("Failed to load glyph tree '{}'", root.display()))?;
    if let Some(path) = mapping {
        let mapping = pixfont_mapping::load_mapping(path)
            .with_context(|| format!("Failed to read mapping '{}'", path.display()))?;
        let report = pixfont_mapping::apply_mapping(&mut context, &mapping)
            .with_context(|| format!("Failed to apply mapping '{}'", path.display()))?;
        log::debug!(
            "Mapping '{}': {} staged, {} skipped",
            path.display(),
            report.staged,
            report.skipped
        );
    }
    Ok(context)
}
