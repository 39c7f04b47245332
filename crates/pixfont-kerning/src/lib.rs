// this_file: crates/pixfont-kerning/src/lib.rs

//! Pixfont Kerning: pull glyphs together until they would touch
//!
//! For every qualifying class pair, each left glyph gets a one-cell safety
//! margin (a dilation of radius 1). The right glyph starts as deep into the
//! left glyph's advance as the pair's budget allows and backs out one column
//! at a time until it clears that margin. The first collision-free offset
//! becomes the kerning value.

pub mod config;

use std::collections::BTreeMap;
use std::sync::Arc;

use pixfont_bitmap::MonoBitmap;
use pixfont_core::{CodePoint, GlyphContext, GlyphFile, Result};

pub use config::{CharacterClass, KerningConfig, KerningTemplate};

/// Glyph name pair to horizontal adjustment, always negative
pub type KerningValues = BTreeMap<(String, String), i32>;

/// Margin added around left glyphs before probing
const SAFETY_MARGIN: i32 = 1;

/// Kerning for every template with a negative budget
///
/// Only default-flavor glyphs take part; characters without one are skipped.
/// A later template overwrites an earlier one's value for the same glyph pair.
pub fn calculate_kerning_values(
    config: &KerningConfig,
    context: &GlyphContext,
) -> Result<KerningValues> {
    let mut values = KerningValues::new();
    for template in config.templates() {
        let left_class = config.require_class(&template.left)?;
        let right_class = config.require_class(&template.right)?;
        if template.budget >= 0 {
            continue;
        }

        for &left in &left_class.members {
            let Some(left_file) = default_glyph(context, left) else {
                continue;
            };
            let margin = left_file.bitmap()?.dilate(SAFETY_MARGIN)?;

            for &right in &right_class.members {
                let Some(right_file) = default_glyph(context, right) else {
                    continue;
                };
                if let Some(value) = closest_fit(&margin, right_file.bitmap()?, template.budget) {
                    values.insert((left_file.glyph_name(), right_file.glyph_name()), value);
                }
            }
        }
    }
    log::info!("Calculated {} kerning pairs", values.len());
    Ok(values)
}

/// First collision-free offset scanning from `budget` up towards zero
///
/// At offset `o` the right glyph's left edge sits `o` columns left of the
/// margin's right edge. Offsets closer to zero are never tested once one
/// fits, so a pair that collides only near zero still kerns at the budget.
/// `None` when every offset in `budget..0` collides.
pub fn closest_fit(margin: &MonoBitmap, right: &MonoBitmap, budget: i32) -> Option<i32> {
    let width = i32::try_from(margin.width()).ok()?;
    (budget..0).find(|&offset| !margin.is_overlapped(right, width + offset, 0))
}

fn default_glyph(context: &GlyphContext, character: char) -> Option<&GlyphFile> {
    let code_point = CodePoint::try_from(u32::from(character)).ok()?;
    let file = context.get(code_point).and_then(|group| group.default_file());
    if file.is_none() {
        log::debug!("No default glyph for '{character}', skipping");
    }
    file.map(Arc::as_ref)
}

#[cfg(test)]
mod tests {
    use pixfont_bitmap::GlyphRaster;

    use super::*;

    fn bitmap(rows: &[&str]) -> MonoBitmap {
        let rows: Vec<Vec<u8>> = rows
            .iter()
            .map(|row| row.bytes().map(|cell| u8::from(cell == b'#')).collect())
            .collect();
        MonoBitmap::from_rows(&rows).unwrap()
    }

    fn letter_t() -> MonoBitmap {
        bitmap(&[
            ".#####.",
            "...#...",
            "...#...",
            "...#...",
            "...#...",
            "...#...",
            ".......",
        ])
    }

    fn letter_o() -> MonoBitmap {
        bitmap(&[
            ".......",
            ".#####.",
            ".#...#.",
            ".#...#.",
            ".#...#.",
            ".#####.",
            ".......",
        ])
    }

    fn context_with(glyphs: &[(char, MonoBitmap)]) -> GlyphContext {
        let mut context = GlyphContext::new();
        for (character, bitmap) in glyphs {
            let code_point = *character as CodePoint;
            let file = GlyphFile::new(format!("{code_point:04X}.png"), code_point, Vec::new())
                .with_raster(GlyphRaster {
                    bitmap: bitmap.clone(),
                    mask: None,
                });
            context.add_file(Arc::new(file)).unwrap();
        }
        context
    }

    fn config(left: &str, right: &str, budget: i32) -> KerningConfig {
        KerningConfig::new(
            vec![
                CharacterClass {
                    name: "left".into(),
                    members: left.chars().collect(),
                },
                CharacterClass {
                    name: "right".into(),
                    members: right.chars().collect(),
                },
            ],
            vec![KerningTemplate {
                left: "left".into(),
                right: "right".into(),
                budget,
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_t_o_stops_before_collision() {
        let context = context_with(&[('T', letter_t()), ('o', letter_o())]);
        for budget in [-2, -5] {
            let values = calculate_kerning_values(&config("T", "o", budget), &context).unwrap();
            assert_eq!(values.len(), 1);
            assert_eq!(values[&("u0054".to_string(), "u006F".to_string())], -1);
        }
    }

    #[test]
    fn test_no_entry_when_every_offset_collides() {
        let block = bitmap(&["###", "###"]);
        let context = context_with(&[('H', block)]);
        let values = calculate_kerning_values(&config("H", "H", -3), &context).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_scan_starts_at_budget() {
        // Collides at -1 and -2 but fits again at -3 and -4
        let margin = bitmap(&["...#", "...."]).dilate(1).unwrap();
        let right = bitmap(&["#.", ".."]);
        assert_eq!(closest_fit(&margin, &right, -4), Some(-4));
        assert_eq!(closest_fit(&margin, &right, -3), Some(-3));
        assert_eq!(closest_fit(&margin, &right, -2), None);
    }

    #[test]
    fn test_budget_limits_scan() {
        let dot = bitmap(&["#..", "...", "..."]);
        let low = bitmap(&["...", "...", "..#"]);
        let context = context_with(&[('a', dot), ('b', low)]);
        let values = calculate_kerning_values(&config("a", "b", -2), &context).unwrap();
        assert_eq!(values[&("u0061".to_string(), "u0062".to_string())], -2);
    }

    #[test]
    fn test_non_negative_budget_and_missing_glyphs() {
        let context = context_with(&[('T', letter_t()), ('o', letter_o())]);
        assert!(calculate_kerning_values(&config("T", "o", 0), &context)
            .unwrap()
            .is_empty());
        let values = calculate_kerning_values(&config("TX", "oY", -2), &context).unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_closest_fit() {
        let margin = letter_t().dilate(1).unwrap();
        assert_eq!(closest_fit(&margin, &letter_o(), -1), Some(-1));
        assert_eq!(closest_fit(&margin, &letter_o(), -9), Some(-1));
        assert_eq!(closest_fit(&margin, &letter_o(), 0), None);
    }
}
