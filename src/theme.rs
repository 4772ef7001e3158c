//! Theme system for default style injection
//!
//! A theme supplies the attribute values a scene does not set explicitly.
//! During compilation every style entering the output is passed through the
//! active theme exactly once, so backends never see a primitive with missing
//! attributes. Themes load from TOML, which keeps palettes editable without
//! touching scene construction code.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::style::Style;

/// Errors that can occur when loading or parsing themes
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse theme TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A theme providing default attribute values
#[derive(Debug, Clone)]
pub struct Theme {
    /// Optional name for the theme
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Attribute defaults applied beneath every explicit style
    pub defaults: Style,
}

/// TOML structure for deserializing themes
#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    defaults: TomlDefaults,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TomlDefaults {
    fill: Option<String>,
    stroke: Option<String>,
    #[serde(rename = "stroke-width")]
    stroke_width: Option<f64>,
    dash: Option<Vec<f64>>,
    opacity: Option<f64>,
    #[serde(rename = "font-size")]
    font_size: Option<f64>,
}

/// Default theme - light fill, dark stroke, readable text sizes
const DEFAULT_THEME: &str = r##"
[metadata]
name = "Default"
description = "Neutral grays suitable for technical diagrams"

[defaults]
fill = "#f0f0f0"
stroke = "#333333"
stroke-width = 2.0
opacity = 1.0
font-size = 14.0
"##;

impl Theme {
    /// Load theme from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load theme from TOML string
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        Ok(Theme {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            defaults: Style {
                fill: parsed.defaults.fill,
                stroke: parsed.defaults.stroke,
                stroke_width: parsed.defaults.stroke_width,
                dash: parsed.defaults.dash,
                opacity: parsed.defaults.opacity,
                font_size: parsed.defaults.font_size,
            },
        })
    }

    /// Fill the gaps in a style with this theme's defaults
    ///
    /// Attributes the style sets explicitly are kept; everything else comes
    /// from the theme. The result always sets at least the attributes the
    /// theme defines.
    pub fn apply(&self, style: &Style) -> Style {
        self.defaults.merge(style)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_str(DEFAULT_THEME).expect("Default theme should be valid TOML")
    }
}
