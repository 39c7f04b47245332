//! Cmap command implementation

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use pixfont_core::FlavorKey;

use crate::cli::CmapArgs;

pub fn run(args: &CmapArgs) -> Result<()> {
    let context = super::load_context(&args.root, args.mapping.as_deref())?;
    let flavor = FlavorKey::from(args.flavor.as_deref());
    let cmap = context
        .character_mapping(&flavor)
        .with_context(|| format!("Failed to resolve flavor '{flavor}'"))?;

    if args.json {
        let table: BTreeMap<String, &String> = cmap
            .iter()
            .map(|(code_point, name)| (format!("0x{code_point:04X}"), name))
            .collect();
        let json = serde_json::to_string_pretty(&table).context("Failed to encode cmap")?;
        println!("{json}");
    } else {
        for (code_point, name) in &cmap {
            println!("0x{code_point:04X}\t{name}");
        }
    }
    Ok(())
}
