//! Kerning command implementation

use anyhow::{Context, Result};
use pixfont_kerning::{calculate_kerning_values, KerningConfig};
use serde::Serialize;

use crate::cli::KerningArgs;

#[derive(Debug, Serialize)]
struct KerningPair<'a> {
    left: &'a str,
    right: &'a str,
    value: i32,
}

pub fn run(args: &KerningArgs) -> Result<()> {
    let config = KerningConfig::load(&args.config)
        .with_context(|| format!("Failed to read kerning config '{}'", args.config.display()))?;
    let context = super::load_context(&args.root, None)?;
    let values =
        calculate_kerning_values(&config, &context).context("Failed to calculate kerning")?;

    if args.json {
        let pairs: Vec<KerningPair<'_>> = values
            .iter()
            .map(|((left, right), &value)| KerningPair { left, right, value })
            .collect();
        let json = serde_json::to_string_pretty(&pairs).context("Failed to encode kerning")?;
        println!("{json}");
    } else {
        for ((left, right), value) in &values {
            println!("{left}\t{right}\t{value}");
        }
    }
    Ok(())
}
