//! Theme system for default figure styling
//!
//! A theme maps attribute names to default values, loaded from TOML. Applying
//! a theme fills in attributes a figure has not set explicitly, so drawings
//! can be normalized against a house style without clobbering local edits.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::attributes::{AttributeKey, AttributeMap, AttributeValue, Color};

/// Errors that can occur when loading or parsing themes
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse theme TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid color for {key}: {value:?}")]
    InvalidColor { key: String, value: String },

    #[error("default for {key} does not fit a 32-bit integer")]
    InvalidValue { key: String },
}

/// TOML structure for deserializing themes
#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: HashMap<String, String>,
    #[serde(default)]
    defaults: HashMap<String, TomlDefault>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TomlDefault {
    Int(i64),
    Bool(bool),
    Text(String),
}

/// Builtin theme applied when no theme file is given
const DEFAULT_THEME: &str = r##"
[metadata]
name = "figwire default"
description = "Neutral grays with a blue accent"

[colors]
FillColor = "#e3f2fd"
FrameColor = "#1565c0"
TextColor = "#1a1a1a"

[defaults]
FontName = "Helvetica"
FontSize = 12
FontStyle = 0
LineWidth = 1
Locked = false
"##;

/// A named set of default attribute values
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: Option<String>,
    pub description: Option<String>,
    defaults: AttributeMap,
}

impl Theme {
    /// Load a theme from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a theme from a TOML string.
    ///
    /// Color values must be `#rgb` or `#rrggbb`. Attribute names outside the
    /// recognized set are ignored.
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        let mut defaults = AttributeMap::new();
        for (name, value) in &parsed.colors {
            let Some(key) = AttributeKey::from_name(name) else {
                continue;
            };
            let color = Color::from_hex(value).ok_or_else(|| ThemeError::InvalidColor {
                key: name.clone(),
                value: value.clone(),
            })?;
            defaults.set(key, Some(AttributeValue::Color(color)));
        }
        for (name, value) in &parsed.defaults {
            let Some(key) = AttributeKey::from_name(name) else {
                continue;
            };
            let value = match value {
                TomlDefault::Int(v) => AttributeValue::Int(
                    i32::try_from(*v).map_err(|_| ThemeError::InvalidValue { key: name.clone() })?,
                ),
                TomlDefault::Bool(v) => AttributeValue::Bool(*v),
                TomlDefault::Text(v) => AttributeValue::Text(v.clone()),
            };
            defaults.set(key, Some(value));
        }

        Ok(Theme {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            defaults,
        })
    }

    /// The theme's default attribute values
    pub fn defaults(&self) -> &AttributeMap {
        &self.defaults
    }

    /// Fill defaults into `attributes`, keeping any value already present
    pub fn apply_defaults(&self, attributes: &mut AttributeMap) {
        for (key, value) in self.defaults.iter() {
            if !attributes.contains(key) {
                attributes.set(key, Some(value.clone()));
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_str(DEFAULT_THEME).expect("builtin theme should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert!(theme.defaults().contains(AttributeKey::FillColor));
        assert!(theme.defaults().contains(AttributeKey::FontSize));
        assert_eq!(
            theme.defaults().get(AttributeKey::Locked),
            Some(&AttributeValue::Bool(false))
        );
    }

    #[test]
    fn test_parse_with_metadata() {
        let theme = Theme::from_str(
            r##"
[metadata]
name = "Test"
description = "A test theme"

[colors]
FillColor = "#f00"
"##,
        )
        .expect("should parse");
        assert_eq!(theme.name.as_deref(), Some("Test"));
        assert_eq!(
            theme.defaults().get(AttributeKey::FillColor),
            Some(&AttributeValue::Color(Color::new(255, 0, 0)))
        );
    }

    #[test]
    fn test_parse_without_metadata() {
        let theme = Theme::from_str("[defaults]\nFontSize = 14\n").expect("should parse");
        assert_eq!(theme.name, None);
        assert_eq!(
            theme.defaults().get(AttributeKey::FontSize),
            Some(&AttributeValue::Int(14))
        );
    }

    #[test]
    fn test_unrecognized_names_are_ignored() {
        let theme =
            Theme::from_str("[colors]\nSparkleColor = \"#123456\"\n").expect("should parse");
        assert!(theme.defaults().is_empty());
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        let result = Theme::from_str("[colors]\nFillColor = \"red\"\n");
        assert!(matches!(result, Err(ThemeError::InvalidColor { .. })));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = Theme::from_str("not toml {{{{");
        assert!(matches!(result, Err(ThemeError::Parse(_))));
    }

    #[test]
    fn test_oversized_int_is_an_error() {
        let result = Theme::from_str("[defaults]\nFontSize = 5000000000\n");
        assert!(matches!(result, Err(ThemeError::InvalidValue { .. })));
    }

    #[test]
    fn test_apply_defaults_keeps_explicit_values() {
        let theme = Theme::default();
        let mut attributes = AttributeMap::new();
        attributes.set(AttributeKey::FontSize, Some(AttributeValue::Int(30)));

        theme.apply_defaults(&mut attributes);

        assert_eq!(
            attributes.get(AttributeKey::FontSize),
            Some(&AttributeValue::Int(30))
        );
        assert!(attributes.contains(AttributeKey::FillColor));
    }
}
