//! Every glyph file serving one code point

use std::sync::Arc;

use crate::error::{InvariantError, LookupError, Result};
use crate::flavor::{FlavorKey, FlavorMap};
use crate::glyph::GlyphFile;
use crate::CodePoint;

/// Glyph files for one code point, one per flavor slot
///
/// A file carrying several flavors sits in several slots at once; a file
/// without flavors takes the default slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorGroup {
    code_point: CodePoint,
    files: FlavorMap<Arc<GlyphFile>>,
}

impl FlavorGroup {
    pub fn new(code_point: CodePoint) -> Self {
        Self {
            code_point,
            files: FlavorMap::new(),
        }
    }

    pub fn code_point(&self) -> CodePoint {
        self.code_point
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Indexes a freshly parsed file under each of its flavors, or the default slot
    ///
    /// Nothing is inserted if any target slot is taken.
    pub fn add_file(&mut self, file: Arc<GlyphFile>) -> Result<()> {
        if file.code_point() != self.code_point {
            return Err(InvariantError::CodePointMismatch {
                expected: self.code_point,
                found: file.code_point(),
                path: file.path().to_path_buf(),
            }
            .into());
        }

        if file.flavors().is_empty() {
            if let Some(existing) = self.files.default_value() {
                return Err(InvariantError::DuplicateDefault {
                    path: file.path().to_path_buf(),
                    existing: existing.path().to_path_buf(),
                }
                .into());
            }
            self.files.insert(FlavorKey::Default, file);
            return Ok(());
        }

        for flavor in file.flavors() {
            if let Some(existing) = self.files.get_exact(FlavorKey::named(flavor)) {
                return Err(InvariantError::DuplicateFlavor {
                    flavor: flavor.clone(),
                    path: file.path().to_path_buf(),
                    existing: existing.path().to_path_buf(),
                }
                .into());
            }
        }
        for flavor in file.flavors() {
            self.files.insert(FlavorKey::named(flavor), Arc::clone(&file));
        }
        Ok(())
    }

    /// Exact flavor, else the default file, else a lookup error
    pub fn get(&self, flavor: impl Into<FlavorKey>) -> Result<&Arc<GlyphFile>> {
        let flavor = flavor.into();
        self.files.find(&flavor).ok_or_else(|| {
            LookupError::NoSuchFlavor {
                code_point: self.code_point,
                flavor: flavor.to_string(),
            }
            .into()
        })
    }

    /// Like [`FlavorGroup::get`], without the error
    pub fn find(&self, flavor: impl Into<FlavorKey>) -> Option<&Arc<GlyphFile>> {
        self.files.find(flavor)
    }

    pub fn get_exact(&self, flavor: impl Into<FlavorKey>) -> Option<&Arc<GlyphFile>> {
        self.files.get_exact(flavor)
    }

    pub fn default_file(&self) -> Option<&Arc<GlyphFile>> {
        self.files.default_value()
    }

    /// Puts `file` into a slot unchecked, returning the file it displaced
    pub fn insert(
        &mut self,
        flavor: impl Into<FlavorKey>,
        file: Arc<GlyphFile>,
    ) -> Option<Arc<GlyphFile>> {
        self.files.insert(flavor, file)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FlavorKey, &Arc<GlyphFile>)> {
        self.files.iter()
    }

    pub fn slots_mut(&mut self) -> impl Iterator<Item = &mut Arc<GlyphFile>> {
        self.files.values_mut()
    }

    /// Each underlying file once, in slot order
    pub fn distinct_files(&self) -> Vec<&Arc<GlyphFile>> {
        let mut files: Vec<&Arc<GlyphFile>> = Vec::new();
        for file in self.files.values() {
            if !files.iter().any(|seen| Arc::ptr_eq(seen, file)) {
                files.push(file);
            }
        }
        files
    }
}
