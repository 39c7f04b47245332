//! Reading and writing mapping files
//!
//! ```yaml
//!
//! # 0x0005
//! 0x0005:
//!   # 檤
//!   ~: 0x6AA4
//!   # 檤
//!   ko,zh_tr: 0x6AA4 ko
//! ```
//!
//! Keys are hex code points; each maps flavors (comma-separated, `~` for the
//! default) to the glyph they borrow. Writing sorts everything and adds a
//! comment with the character itself, so a written file reads back to the
//! same bytes.

use std::collections::btree_map::{self, BTreeMap};
use std::fs;
use std::path::Path;

use pixfont_core::layout::flavor_rank;
use pixfont_core::{parse_hex, CodePoint, FlavorKey, ParseError, PixfontError, Result};
use serde_yaml::Value;

use crate::source::{SourceFlavorGroup, SourceGlyph};

/// Every mapped code point with the glyphs it borrows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    groups: BTreeMap<CodePoint, SourceFlavorGroup>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mapping = Self::parse(&text).map_err(|err| match err {
            PixfontError::Config(message) => {
                PixfontError::Config(format!("'{}': {message}", path.display()))
            }
            other => other,
        })?;
        log::debug!(
            "Loaded {} mapped code points from '{}'",
            mapping.len(),
            path.display()
        );
        Ok(mapping)
    }

    /// Parses mapping text; a document of only comments is an empty mapping
    pub fn parse(text: &str) -> Result<Self> {
        let mut mapping = Self::new();
        if is_blank(text) {
            return Ok(mapping);
        }
        let document: Value = serde_yaml::from_str(text)
            .map_err(|err| PixfontError::Config(format!("invalid mapping: {err}")))?;
        let table = match document {
            Value::Null => return Ok(mapping),
            Value::Mapping(table) => table,
            _ => {
                return Err(PixfontError::Config(
                    "mapping must be a table keyed by code point".to_string(),
                ))
            }
        };

        for (key, entries) in &table {
            let code_point = code_point_of(key)?;
            let entries = match entries {
                Value::Null => continue,
                Value::Mapping(entries) => entries,
                _ => {
                    return Err(entry_error(code_point, "expected a table of flavors"));
                }
            };
            let mut group = SourceFlavorGroup::new(code_point);
            for (flavors, source) in entries {
                let source = source_of(code_point, source)?;
                for flavor in flavor_keys(code_point, flavors)? {
                    group.add(flavor, source.clone())?;
                }
            }
            mapping.groups.insert(code_point, group);
        }
        Ok(mapping)
    }

    pub fn save(&self, path: impl AsRef<Path>, order: &[String]) -> Result<()> {
        fs::write(path.as_ref(), self.to_text(order))?;
        Ok(())
    }

    /// Canonical text form, ordered by code point then by `order`
    pub fn to_text(&self, order: &[String]) -> String {
        let mut text = String::new();
        for (&code_point, group) in &self.groups {
            text.push('\n');
            text.push_str(&format!("# {}\n", describe(code_point)));
            text.push_str(&format!("0x{code_point:04X}:\n"));

            let mut shared: Vec<(&SourceGlyph, Vec<&str>)> = Vec::new();
            for (flavor, source) in group.iter() {
                let FlavorKey::Named(flavor) = flavor else {
                    write_entry(&mut text, "~", source);
                    continue;
                };
                match shared.iter_mut().find(|(seen, _)| *seen == source) {
                    Some((_, flavors)) => flavors.push(flavor.as_str()),
                    None => shared.push((source, vec![flavor.as_str()])),
                }
            }
            for (_, flavors) in &mut shared {
                flavors.sort_by_key(|flavor| flavor_rank(*flavor, order));
            }
            shared.sort_by(|(_, a), (_, b)| {
                flavor_rank(a[0], order).cmp(&flavor_rank(b[0], order))
            });
            for (source, flavors) in shared {
                write_entry(&mut text, &flavors.join(","), source);
            }
        }
        text
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, code_point: CodePoint) -> Option<&SourceFlavorGroup> {
        self.groups.get(&code_point)
    }

    pub fn group_mut_or_insert(&mut self, code_point: CodePoint) -> &mut SourceFlavorGroup {
        self.groups
            .entry(code_point)
            .or_insert_with(|| SourceFlavorGroup::new(code_point))
    }

    pub fn iter(&self) -> btree_map::Iter<'_, CodePoint, SourceFlavorGroup> {
        self.groups.iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a CodePoint, &'a SourceFlavorGroup);
    type IntoIter = btree_map::Iter<'a, CodePoint, SourceFlavorGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Reads a mapping file
pub fn load_mapping(path: impl AsRef<Path>) -> Result<Mapping> {
    Mapping::load(path)
}

/// Writes a mapping file in canonical form
pub fn save_mapping(mapping: &Mapping, path: impl AsRef<Path>, order: &[String]) -> Result<()> {
    mapping.save(path, order)
}

fn is_blank(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn write_entry(text: &mut String, flavors: &str, source: &SourceGlyph) {
    text.push_str(&format!("  # {}\n", describe(source.code_point)));
    text.push_str(&format!("  {flavors}: {source}\n"));
}

/// The character itself when printable, else its hex code point
fn describe(code_point: CodePoint) -> String {
    u32::try_from(code_point)
        .ok()
        .filter(|&value| pixfont_unicode::is_printable(value))
        .and_then(char::from_u32)
        .map(String::from)
        .unwrap_or_else(|| format!("0x{code_point:04X}"))
}

fn entry_error(code_point: CodePoint, reason: impl Into<String>) -> PixfontError {
    ParseError::MappingEntry {
        code_point,
        reason: reason.into(),
    }
    .into()
}

fn code_point_of(key: &Value) -> Result<CodePoint> {
    let parsed = match key {
        Value::Number(number) => number
            .as_i64()
            .and_then(|value| CodePoint::try_from(value).ok())
            .filter(|&value| value >= 0),
        Value::String(text) => parse_hex(text),
        _ => None,
    };
    parsed.ok_or_else(|| ParseError::CodePoint(yaml_text(key)).into())
}

fn source_of(code_point: CodePoint, value: &Value) -> Result<SourceGlyph> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .and_then(|value| CodePoint::try_from(value).ok())
            .filter(|&value| value >= 0)
            .map(|source| SourceGlyph::new(source, None))
            .ok_or_else(|| entry_error(code_point, format!("invalid source '{number}'"))),
        Value::String(text) => {
            let text = text.trim();
            let (head, flavor) = match text.split_once(char::is_whitespace) {
                Some((head, flavor)) => (head, Some(flavor)),
                None => (text, None),
            };
            parse_hex(head)
                .map(|source| SourceGlyph::new(source, flavor))
                .ok_or_else(|| entry_error(code_point, format!("invalid source '{text}'")))
        }
        other => Err(entry_error(
            code_point,
            format!("invalid source '{}'", yaml_text(other)),
        )),
    }
}

fn flavor_keys(code_point: CodePoint, key: &Value) -> Result<Vec<FlavorKey>> {
    let text = match key {
        Value::Null => return Ok(vec![FlavorKey::Default]),
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        other => {
            return Err(entry_error(
                code_point,
                format!("invalid flavors '{}'", yaml_text(other)),
            ))
        }
    };
    text.split(',')
        .map(|flavor| {
            let flavor = flavor.trim();
            if flavor.is_empty() {
                Err(entry_error(code_point, format!("empty flavor in '{text}'")))
            } else {
                Ok(FlavorKey::named(flavor))
            }
        })
        .collect()
}

fn yaml_text(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}
