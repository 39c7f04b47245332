//! Canonical glyph tree layout
//!
//! Every glyph file has exactly one canonical home below the tree root:
//!
//! ```text
//! root/
//! ├── notdef.png
//! ├── 0000-007F Basic Latin/
//! │   ├── 0041.png
//! │   └── 0041 ja,ko.png
//! └── 4E00-9FFF CJK Unified Ideographs/
//!     └── 4E/
//!         └── 4E11 zh_cn.png
//! ```
//!
//! [`plan_layout`] works out where each file belongs without touching the
//! disk; [`apply_layout`] then moves and re-encodes. The whole pass is not
//! transactional: an error midway leaves the files handled so far in their
//! new places.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pixfont_bitmap::Rgb;
use walkdir::WalkDir;

use crate::context::GlyphContext;
use crate::error::{InvariantError, PixfontError, Result};
use crate::glyph::GlyphFile;
use crate::{CodePoint, NOTDEF};

/// Directory litter that does not keep a directory alive
const IGNORED_ENTRIES: &[&str] = &[".DS_Store"];

/// Where one glyph file should live
#[derive(Debug, Clone)]
pub struct Relocation {
    pub file: Arc<GlyphFile>,
    pub target: PathBuf,
    /// Flavors in canonical order, as spelled in the target file name
    pub flavors: Vec<String>,
}

impl Relocation {
    pub fn is_move(&self) -> bool {
        self.file.path() != self.target
    }
}

/// Targets for every distinct file of a context
#[derive(Debug, Clone, Default)]
pub struct LayoutPlan {
    pub relocations: Vec<Relocation>,
}

impl LayoutPlan {
    pub fn moves(&self) -> impl Iterator<Item = &Relocation> {
        self.relocations.iter().filter(|relocation| relocation.is_move())
    }
}

/// What a canonicalize pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutReport {
    pub moved: usize,
    pub encoded: usize,
    pub pruned: usize,
}

/// Directory a code point's files belong in
///
/// `.notdef` stays at the root. Everything else goes into its Unicode block's
/// directory, and CJK Unified Ideographs get one more level per 256 code points.
pub fn canonical_dir(root: &Path, code_point: CodePoint) -> Result<PathBuf> {
    if code_point == NOTDEF {
        return Ok(root.to_path_buf());
    }
    let block = u32::try_from(code_point)
        .ok()
        .and_then(pixfont_unicode::block_of)
        .ok_or(InvariantError::NoBlock(code_point))?;
    let mut dir = root.join(block.dir_name());
    if block.is_cjk_unified_ideographs() {
        dir.push(format!("{:02X}", code_point >> 8));
    }
    Ok(dir)
}

/// `notdef.png`, `0041.png` or `0041 ja,ko.png`; `flavors` must already be ordered
pub fn canonical_file_name(code_point: CodePoint, flavors: &[String]) -> String {
    if code_point == NOTDEF {
        return "notdef.png".to_string();
    }
    if flavors.is_empty() {
        format!("{code_point:04X}.png")
    } else {
        format!("{code_point:04X} {}.png", flavors.join(","))
    }
}

/// Sort key of `flavor` under a caller's priority list
///
/// Listed flavors come first, in list order; the rest follow lexicographically.
pub fn flavor_rank<'a>(flavor: &'a str, order: &[String]) -> (usize, &'a str) {
    let position = order
        .iter()
        .position(|listed| listed.eq_ignore_ascii_case(flavor))
        .unwrap_or(usize::MAX);
    (position, flavor)
}

/// Orders flavors by [`flavor_rank`]
pub fn sort_flavors(flavors: &[String], order: &[String]) -> Vec<String> {
    let mut sorted = flavors.to_vec();
    sorted.sort_by(|a, b| flavor_rank(a, order).cmp(&flavor_rank(b, order)));
    sorted
}

/// Works out the canonical path of every distinct file, touching nothing
///
/// Files are placed by their own code point, so a glyph shared into other
/// groups is still placed once.
pub fn plan_layout(
    context: &GlyphContext,
    root: impl AsRef<Path>,
    order: &[String],
) -> Result<LayoutPlan> {
    let root = root.as_ref();
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    let mut relocations = Vec::new();
    for file in context.distinct_files() {
        let flavors = sort_flavors(file.flavors(), order);
        let target = canonical_dir(root, file.code_point())?
            .join(canonical_file_name(file.code_point(), &flavors));
        if let Some(existing) = claimed.insert(target.clone(), file.path()) {
            return Err(InvariantError::DuplicateGlyphFiles {
                path: file.path().to_path_buf(),
                existing: existing.to_path_buf(),
            }
            .into());
        }
        relocations.push(Relocation {
            file: Arc::clone(file),
            target,
            flavors,
        });
    }
    Ok(LayoutPlan { relocations })
}

/// Moves each file to its target, re-encodes it there and updates `context`
pub fn apply_layout(
    plan: &LayoutPlan,
    context: &mut GlyphContext,
    color: Rgb,
) -> Result<LayoutReport> {
    let mut report = LayoutReport::default();
    let mut replaced: HashMap<*const GlyphFile, Arc<GlyphFile>> = HashMap::new();

    for relocation in &plan.relocations {
        let file = if relocation.is_move() {
            if relocation.target.exists() {
                return Err(InvariantError::DuplicateGlyphFiles {
                    path: relocation.file.path().to_path_buf(),
                    existing: relocation.target.clone(),
                }
                .into());
            }
            if let Some(parent) = relocation.target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::rename(relocation.file.path(), &relocation.target)?;
            log::debug!(
                "Moved '{}' -> '{}'",
                relocation.file.path().display(),
                relocation.target.display()
            );
            report.moved += 1;

            let moved = Arc::new(
                relocation
                    .file
                    .relocated(&relocation.target, relocation.flavors.clone()),
            );
            replaced.insert(Arc::as_ptr(&relocation.file), Arc::clone(&moved));
            moved
        } else {
            Arc::clone(&relocation.file)
        };

        file.raster()?
            .save(file.path(), color)
            .map_err(|source| PixfontError::GlyphBitmap {
                path: file.path().to_path_buf(),
                source,
            })?;
        report.encoded += 1;
    }

    if !replaced.is_empty() {
        for group in context.groups_mut() {
            for slot in group.slots_mut() {
                if let Some(moved) = replaced.get(&Arc::as_ptr(slot)) {
                    *slot = Arc::clone(moved);
                }
            }
        }
    }
    Ok(report)
}

/// Removes directories below `root` that hold nothing but litter
///
/// Returns how many were removed. `root` itself always stays.
pub fn prune_empty_dirs(root: impl AsRef<Path>) -> Result<usize> {
    let mut pruned = 0;
    for entry in WalkDir::new(root.as_ref())
        .min_depth(1)
        .contents_first(true)
    {
        let entry = entry?;
        if !entry.file_type().is_dir() || !is_empty_dir(entry.path())? {
            continue;
        }
        for name in IGNORED_ENTRIES {
            let litter = entry.path().join(name);
            if litter.is_file() {
                fs::remove_file(litter)?;
            }
        }
        fs::remove_dir(entry.path())?;
        log::debug!("Removed empty directory '{}'", entry.path().display());
        pruned += 1;
    }
    Ok(pruned)
}

fn is_empty_dir(path: &Path) -> Result<bool> {
    for entry in fs::read_dir(path)? {
        let name = entry?.file_name();
        if !IGNORED_ENTRIES.iter().any(|ignored| name == *ignored) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Plans, applies and cleans up in one go
pub fn canonicalize(
    context: &mut GlyphContext,
    root: impl AsRef<Path>,
    order: &[String],
    color: Rgb,
) -> Result<LayoutReport> {
    let root = root.as_ref();
    let plan = plan_layout(context, root, order)?;
    let mut report = apply_layout(&plan, context, color)?;
    report.pruned = prune_empty_dirs(root)?;
    log::info!(
        "Canonicalized '{}': {} moved, {} encoded, {} directories removed",
        root.display(),
        report.moved,
        report.encoded,
        report.pruned
    );
    Ok(report)
}
