//! The indexed glyph tree

use std::collections::{btree_map, BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use walkdir::WalkDir;

use crate::error::{InvariantError, Result};
use crate::flavor::FlavorKey;
use crate::glyph::GlyphFile;
use crate::group::FlavorGroup;
use crate::{CodePoint, NOTDEF};

/// All glyph files of a tree, grouped by code point in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphContext {
    groups: BTreeMap<CodePoint, FlavorGroup>,
}

impl GlyphContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every `.png` below `root`
    ///
    /// Files are visited in file-name order so the first conflict reported is
    /// always the same one. Other files are ignored.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let mut context = Self::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|ext| ext.to_str()) != Some("png") {
                continue;
            }
            context.add_file(Arc::new(GlyphFile::load(entry.path())?))?;
        }
        log::info!(
            "Loaded {} code points from '{}'",
            context.len(),
            root.display()
        );
        Ok(context)
    }

    /// Indexes one file through [`FlavorGroup::add_file`]
    pub fn add_file(&mut self, file: Arc<GlyphFile>) -> Result<()> {
        self.group_mut_or_insert(file.code_point()).add_file(file)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn contains(&self, code_point: CodePoint) -> bool {
        self.groups.contains_key(&code_point)
    }

    pub fn get(&self, code_point: CodePoint) -> Option<&FlavorGroup> {
        self.groups.get(&code_point)
    }

    pub fn get_mut(&mut self, code_point: CodePoint) -> Option<&mut FlavorGroup> {
        self.groups.get_mut(&code_point)
    }

    pub fn group_mut_or_insert(&mut self, code_point: CodePoint) -> &mut FlavorGroup {
        self.groups
            .entry(code_point)
            .or_insert_with(|| FlavorGroup::new(code_point))
    }

    pub fn iter(&self) -> btree_map::Iter<'_, CodePoint, FlavorGroup> {
        self.groups.iter()
    }

    pub fn groups_mut(&mut self) -> btree_map::ValuesMut<'_, CodePoint, FlavorGroup> {
        self.groups.values_mut()
    }

    /// Each underlying file once, ordered by code point then slot
    pub fn distinct_files(&self) -> Vec<&Arc<GlyphFile>> {
        let mut seen = HashSet::new();
        self.groups
            .values()
            .flat_map(FlavorGroup::distinct_files)
            .filter(|file| seen.insert(Arc::as_ptr(*file)))
            .collect()
    }

    /// Code point to glyph name for one flavor, `.notdef` excluded
    ///
    /// A code point with neither `flavor` nor a default is a lookup error.
    pub fn character_mapping(
        &self,
        flavor: impl Into<FlavorKey>,
    ) -> Result<BTreeMap<CodePoint, String>> {
        let flavor = flavor.into();
        let mut mapping = BTreeMap::new();
        for (&code_point, group) in &self.groups {
            if code_point == NOTDEF {
                continue;
            }
            mapping.insert(code_point, group.get(&flavor)?.glyph_name());
        }
        Ok(mapping)
    }

    /// The distinct glyphs a font built from this tree has to embed
    ///
    /// Walks `flavors` in priority order (just the default when empty) and,
    /// within each, every code point ascending, keeping the first glyph of
    /// each name. A code point that resolves neither the flavor nor a default
    /// is a lookup error.
    pub fn glyph_sequence(&self, flavors: &[FlavorKey]) -> Result<Vec<Arc<GlyphFile>>> {
        if let Some(group) = self.groups.get(&NOTDEF) {
            let notdef = group
                .get_exact(FlavorKey::Default)
                .ok_or(InvariantError::NotdefMissing)?;
            let name = notdef.glyph_name();
            if name != ".notdef" {
                return Err(InvariantError::NotdefName(name).into());
            }
        }

        let default_only = [FlavorKey::Default];
        let flavors = if flavors.is_empty() {
            &default_only[..]
        } else {
            flavors
        };

        let mut names = HashSet::new();
        let mut sequence = Vec::new();
        for flavor in flavors {
            for group in self.groups.values() {
                let file = group.get(flavor)?;
                if names.insert(file.glyph_name()) {
                    sequence.push(Arc::clone(file));
                }
            }
        }
        Ok(sequence)
    }
}

impl<'a> IntoIterator for &'a GlyphContext {
    type Item = (&'a CodePoint, &'a FlavorGroup);
    type IntoIter = btree_map::Iter<'a, CodePoint, FlavorGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LookupError, PixfontError};

    fn context(names: &[&str]) -> GlyphContext {
        let mut context = GlyphContext::new();
        for name in names {
            context
                .add_file(Arc::new(GlyphFile::load(*name).unwrap()))
                .unwrap();
        }
        context
    }

    #[test]
    fn test_glyph_sequence_dedups_by_name() {
        let context = context(&["notdef.png", "4E11.png", "4E11 zh_cn.png"]);
        let names: Vec<String> = context
            .glyph_sequence(&[FlavorKey::Default, FlavorKey::named("zh_cn")])
            .unwrap()
            .iter()
            .map(|file| file.glyph_name())
            .collect();
        assert_eq!(names, [".notdef", "u4E11", "u4E11-ZH_CN"]);
    }

    #[test]
    fn test_glyph_sequence_defaults_to_default_flavor() {
        let context = context(&["0041.png", "0041 ja.png"]);
        let sequence = context.glyph_sequence(&[]).unwrap();
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].glyph_name(), "u0041");
    }

    #[test]
    fn test_unresolvable_group_is_a_lookup_error() {
        let context = context(&["0041 ja.png", "0042.png"]);
        let err = context.glyph_sequence(&[FlavorKey::Default]).unwrap_err();
        assert!(matches!(
            err,
            PixfontError::Lookup(LookupError::NoSuchFlavor { code_point: 0x41, .. })
        ));
        let err = context.character_mapping(FlavorKey::Default).unwrap_err();
        assert!(matches!(
            err,
            PixfontError::Lookup(LookupError::NoSuchFlavor { code_point: 0x41, .. })
        ));
        assert_eq!(context.character_mapping("ja").unwrap().len(), 2);
    }

    #[test]
    fn test_notdef_without_default() {
        let mut context = context(&["0041.png"]);
        context
            .group_mut_or_insert(NOTDEF)
            .insert("a", Arc::new(GlyphFile::new("notdef.png", NOTDEF, Vec::new())));
        let err = context.glyph_sequence(&[]).unwrap_err();
        assert!(matches!(
            err,
            PixfontError::Invariant(InvariantError::NotdefMissing)
        ));
    }

    #[test]
    fn test_notdef_with_wrong_name() {
        let mut context = context(&["0041.png"]);
        context.group_mut_or_insert(NOTDEF).insert(
            FlavorKey::Default,
            Arc::new(GlyphFile::new("0041.png", 0x41, Vec::new())),
        );
        let err = context.glyph_sequence(&[]).unwrap_err();
        assert!(matches!(
            err,
            PixfontError::Invariant(InvariantError::NotdefName(_))
        ));
    }

    #[test]
    fn test_character_mapping() {
        let context = context(&["notdef.png", "0041.png", "0042 ja.png", "0042.png"]);
        let mapping = context.character_mapping("ja").unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping[&0x41], "u0041");
        assert_eq!(mapping[&0x42], "u0042-JA");
        assert!(!mapping.contains_key(&NOTDEF));
    }

    #[test]
    fn test_distinct_files_across_groups() {
        let mut context = context(&["0041 a,b.png", "0042.png"]);
        let shared = Arc::clone(context.get(0x41).unwrap().get("a").unwrap());
        context.group_mut_or_insert(0x43).insert(FlavorKey::Default, shared);
        assert_eq!(context.distinct_files().len(), 2);
    }
}
