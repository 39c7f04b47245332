//! Character classes and the class pairs to kern
//!
//! ```yaml
//! groups:
//!   upper: TVWY
//!   round: [o, e, c]
//! templates:
//!   upper,round: -2
//! ```

use std::fs;
use std::path::Path;

use pixfont_core::{PixfontError, Result};
use serde_yaml::{Mapping, Value};

/// A named, ordered set of characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterClass {
    pub name: String,
    pub members: Vec<char>,
}

/// A class pair and how far apart its glyphs may be pulled
///
/// Only negative budgets ask for kerning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KerningTemplate {
    pub left: String,
    pub right: String,
    pub budget: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KerningConfig {
    classes: Vec<CharacterClass>,
    templates: Vec<KerningTemplate>,
}

impl KerningConfig {
    pub fn new(classes: Vec<CharacterClass>, templates: Vec<KerningTemplate>) -> Result<Self> {
        let config = Self { classes, templates };
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::parse(&text).map_err(|err| match err {
            PixfontError::Config(message) => {
                PixfontError::Config(format!("'{}': {message}", path.display()))
            }
            other => other,
        })
    }

    pub fn parse(text: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(text)
            .map_err(|err| config_error(format!("invalid kerning config: {err}")))?;
        let Value::Mapping(document) = document else {
            return Err(config_error("kerning config must be a table"));
        };

        let mut classes = Vec::new();
        for (name, members) in section(&document, "groups")? {
            let name = scalar_text(name)
                .ok_or_else(|| config_error("group names must be strings"))?;
            let members = class_members(&name, members)?;
            classes.push(CharacterClass { name, members });
        }

        let mut templates = Vec::new();
        for (pair, budget) in section(&document, "templates")? {
            let pair = scalar_text(pair)
                .ok_or_else(|| config_error("template keys must be 'LEFT,RIGHT'"))?;
            let Some((left, right)) = pair.split_once(',') else {
                return Err(config_error(format!("template '{pair}' is not 'LEFT,RIGHT'")));
            };
            let budget = budget
                .as_i64()
                .and_then(|budget| i32::try_from(budget).ok())
                .ok_or_else(|| config_error(format!("template '{pair}' needs an integer")))?;
            templates.push(KerningTemplate {
                left: left.trim().to_string(),
                right: right.trim().to_string(),
                budget,
            });
        }

        Self::new(classes, templates)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_text()?)?;
        Ok(())
    }

    /// Groups as strings, templates in their original order
    pub fn to_text(&self) -> Result<String> {
        let mut groups = Mapping::new();
        for class in &self.classes {
            groups.insert(
                Value::String(class.name.clone()),
                Value::String(class.members.iter().collect()),
            );
        }
        let mut templates = Mapping::new();
        for template in &self.templates {
            templates.insert(
                Value::String(format!("{},{}", template.left, template.right)),
                Value::Number(template.budget.into()),
            );
        }
        let mut document = Mapping::new();
        document.insert(Value::String("groups".into()), Value::Mapping(groups));
        document.insert(Value::String("templates".into()), Value::Mapping(templates));
        serde_yaml::to_string(&Value::Mapping(document))
            .map_err(|err| config_error(format!("cannot write kerning config: {err}")))
    }

    pub fn classes(&self) -> &[CharacterClass] {
        &self.classes
    }

    pub fn templates(&self) -> &[KerningTemplate] {
        &self.templates
    }

    pub fn class(&self, name: &str) -> Option<&CharacterClass> {
        self.classes.iter().find(|class| class.name == name)
    }

    /// Class named by a template; an unknown name is a configuration error
    pub fn require_class(&self, name: &str) -> Result<&CharacterClass> {
        self.class(name)
            .ok_or_else(|| config_error(format!("undefined character class '{name}'")))
    }

    fn validate(&self) -> Result<()> {
        for template in &self.templates {
            self.require_class(&template.left)?;
            self.require_class(&template.right)?;
        }
        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> PixfontError {
    PixfontError::Config(message.into())
}

fn section<'a>(document: &'a Mapping, name: &str) -> Result<Vec<(&'a Value, &'a Value)>> {
    match document.get(name) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Mapping(table)) => Ok(table.iter().collect()),
        Some(_) => Err(config_error(format!("'{name}' must be a table"))),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// A string contributes each of its characters; a sequence one character per item
fn class_members(name: &str, value: &Value) -> Result<Vec<char>> {
    let members = match value {
        Value::Sequence(items) => items
            .iter()
            .map(|item| {
                let text = scalar_text(item).unwrap_or_default();
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(config_error(format!(
                        "group '{name}' has a member that is not one character"
                    ))),
                }
            })
            .collect::<Result<Vec<char>>>()?,
        other => scalar_text(other)
            .ok_or_else(|| config_error(format!("group '{name}' must be a string or a list")))?
            .chars()
            .collect(),
    };
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
groups:
  upper: TVW
  round: [o, e, '0']
templates:
  upper,round: -2
  round, upper: 0
";

    #[test]
    fn test_parse() {
        let config = KerningConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.class("upper").unwrap().members, ['T', 'V', 'W']);
        assert_eq!(config.class("round").unwrap().members, ['o', 'e', '0']);
        assert_eq!(
            config.templates(),
            [
                KerningTemplate {
                    left: "upper".into(),
                    right: "round".into(),
                    budget: -2
                },
                KerningTemplate {
                    left: "round".into(),
                    right: "upper".into(),
                    budget: 0
                },
            ]
        );
    }

    #[test]
    fn test_text_round_trip() {
        let config = KerningConfig::parse(SAMPLE).unwrap();
        let text = config.to_text().unwrap();
        assert!(text.contains("round: oe0"));
        assert_eq!(KerningConfig::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_undefined_class() {
        let err = KerningConfig::parse("groups:\n  a: T\ntemplates:\n  a,b: -1\n").unwrap_err();
        assert!(err.to_string().contains("undefined character class 'b'"));
    }

    #[test]
    fn test_malformed() {
        assert!(KerningConfig::parse("groups:\n  a: [Tx]\n").is_err());
        assert!(KerningConfig::parse("groups:\n  a: T\ntemplates:\n  a: -1\n").is_err());
        assert!(KerningConfig::parse("groups:\n  a: T\ntemplates:\n  a,a: lots\n").is_err());
        assert!(KerningConfig::parse("- 1\n").is_err());
        assert!(KerningConfig::parse("groups: ~\n").unwrap().classes().is_empty());
    }
}
