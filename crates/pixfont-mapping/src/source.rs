//! References from a mapped code point to the glyph it borrows

use std::fmt;

use pixfont_core::{CodePoint, FlavorKey, FlavorMap, InvariantError, LookupError, Result};

/// A glyph to borrow: a code point, and optionally which of its flavors
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceGlyph {
    pub code_point: CodePoint,
    pub flavor: Option<String>,
}

impl SourceGlyph {
    pub fn new(code_point: CodePoint, flavor: Option<&str>) -> Self {
        Self {
            code_point,
            flavor: flavor
                .map(|flavor| flavor.trim().to_lowercase())
                .filter(|flavor| !flavor.is_empty()),
        }
    }

    /// Key to resolve against the source code point's group
    pub fn flavor_key(&self) -> FlavorKey {
        FlavorKey::from(self.flavor.as_deref())
    }
}

/// `0x6AA4` or `0x6AA4 ja`
impl fmt::Display for SourceGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.code_point)?;
        if let Some(flavor) = &self.flavor {
            write!(f, " {flavor}")?;
        }
        Ok(())
    }
}

/// Borrowed glyphs of one mapped code point, keyed by flavor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFlavorGroup {
    code_point: CodePoint,
    sources: FlavorMap<SourceGlyph>,
}

impl SourceFlavorGroup {
    pub fn new(code_point: CodePoint) -> Self {
        Self {
            code_point,
            sources: FlavorMap::new(),
        }
    }

    pub fn code_point(&self) -> CodePoint {
        self.code_point
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn contains(&self, flavor: impl Into<FlavorKey>) -> bool {
        self.sources.contains(flavor)
    }

    /// Adds a source under a free slot; a taken slot is an error
    pub fn add(&mut self, flavor: impl Into<FlavorKey>, source: SourceGlyph) -> Result<()> {
        let flavor = flavor.into();
        if self.sources.contains(&flavor) {
            let error = match flavor {
                FlavorKey::Default => InvariantError::DuplicateMappingDefault {
                    code_point: self.code_point,
                },
                FlavorKey::Named(flavor) => InvariantError::DuplicateMappingFlavor {
                    code_point: self.code_point,
                    flavor,
                },
            };
            return Err(error.into());
        }
        self.sources.insert(flavor, source);
        Ok(())
    }

    /// Sets a slot, replacing whatever was there
    pub fn insert(
        &mut self,
        flavor: impl Into<FlavorKey>,
        source: SourceGlyph,
    ) -> Option<SourceGlyph> {
        self.sources.insert(flavor, source)
    }

    pub fn remove(&mut self, flavor: impl Into<FlavorKey>) -> Option<SourceGlyph> {
        self.sources.remove(flavor)
    }

    /// Exact flavor, else the default source, else a lookup error
    pub fn get_source(&self, flavor: impl Into<FlavorKey>) -> Result<&SourceGlyph> {
        let flavor = flavor.into();
        self.sources.find(&flavor).ok_or_else(|| {
            LookupError::NoSuchFlavor {
                code_point: self.code_point,
                flavor: flavor.to_string(),
            }
            .into()
        })
    }

    pub fn get_exact(&self, flavor: impl Into<FlavorKey>) -> Option<&SourceGlyph> {
        self.sources.get_exact(flavor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FlavorKey, &SourceGlyph)> {
        self.sources.iter()
    }
}
