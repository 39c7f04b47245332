//! Merging a mapping into a glyph context

use std::sync::Arc;

use pixfont_core::{CodePoint, FlavorKey, GlyphContext, GlyphFile, Result};

use crate::table::Mapping;

/// Outcome of [`apply_mapping`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Flavor slots filled or replaced
    pub staged: usize,
    /// Entries whose source code point is not in the context
    pub skipped: usize,
}

/// Lets mapped code points borrow glyph files from their sources
///
/// Sources resolve through their own flavor fallback, against the context as
/// it was before the call, so entry order never matters. Staged files replace
/// whatever occupied the slot. An entry whose source code point is missing is
/// skipped; a source that exists but has neither the flavor nor a default is
/// an error.
pub fn apply_mapping(context: &mut GlyphContext, mapping: &Mapping) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();
    let mut staged: Vec<(CodePoint, FlavorKey, Arc<GlyphFile>)> = Vec::new();

    for (&code_point, group) in mapping {
        for (flavor, source) in group.iter() {
            let Some(source_group) = context.get(source.code_point) else {
                log::debug!(
                    "Skipping 0x{code_point:04X} '{flavor}': 0x{:04X} is not in the context",
                    source.code_point
                );
                report.skipped += 1;
                continue;
            };
            let file = source_group.get(source.flavor_key())?;
            staged.push((code_point, flavor.clone(), Arc::clone(file)));
        }
    }

    for (code_point, flavor, file) in staged {
        context.group_mut_or_insert(code_point).insert(flavor, file);
        report.staged += 1;
    }
    log::info!(
        "Applied mapping: {} slots staged, {} entries skipped",
        report.staged,
        report.skipped
    );
    Ok(report)
}
