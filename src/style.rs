//! Style attributes and their merge semantics
//!
//! A [`Style`] is a partial set of visual attributes. Interior scene nodes
//! attach styles to whole subtrees; the compile passes merge them along each
//! root-to-leaf path so every primitive ends up with one effective style.
//!
//! Merging is per-attribute with the inner (later) value winning. A style
//! that sets only `fill` layered over one that sets `stroke` yields both;
//! two styles that both set `fill` keep the inner one.

use serde::{Deserialize, Serialize};

use crate::transform::{Transform2d, Transformable};

/// A partial set of visual attributes
///
/// Every field is optional: `None` means "inherit from the surrounding
/// context". Length-valued attributes (stroke width, dash lengths, font
/// size) are in local units and scale when a transform acts on the style.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    /// Dash pattern as alternating on/off lengths
    pub dash: Option<Vec<f64>>,
    pub opacity: Option<f64>,
    pub font_size: Option<f64>,
}

impl Style {
    /// Create an empty style that sets no attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether this style sets any attribute at all
    pub fn is_empty(&self) -> bool {
        self.fill.is_none()
            && self.stroke.is_none()
            && self.stroke_width.is_none()
            && self.dash.is_none()
            && self.opacity.is_none()
            && self.font_size.is_none()
    }

    /// Overlay `other` on top of this style
    ///
    /// Attributes set in `other` win; attributes `other` leaves unset fall
    /// through to this style. Used with `self` as the outer style and
    /// `other` as the inner one.
    pub fn merge(&self, other: &Style) -> Style {
        Style {
            fill: other.fill.clone().or_else(|| self.fill.clone()),
            stroke: other.stroke.clone().or_else(|| self.stroke.clone()),
            stroke_width: other.stroke_width.or(self.stroke_width),
            dash: other.dash.clone().or_else(|| self.dash.clone()),
            opacity: other.opacity.or(self.opacity),
            font_size: other.font_size.or(self.font_size),
        }
    }

    /// Set the fill color
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Set the stroke color
    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = Some(stroke.into());
        self
    }

    /// Set the stroke width
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Set the dash pattern
    pub fn with_dash(mut self, dash: Vec<f64>) -> Self {
        self.dash = Some(dash);
        self
    }

    /// Set the opacity
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the font size
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }
}

impl Transformable for Style {
    /// Scale length-valued attributes by the transform's average scale
    ///
    /// Colors and opacity are unaffected. Stroke width, dash lengths, and
    /// font size are lengths in local units, so baking a transform into a
    /// style multiplies them by the average scale factor.
    fn transform(self, t: &Transform2d) -> Self {
        let factor = t.average_scale();
        Style {
            stroke_width: self.stroke_width.map(|w| w * factor),
            dash: self
                .dash
                .map(|pattern| pattern.into_iter().map(|len| len * factor).collect()),
            font_size: self.font_size.map(|s| s * factor),
            ..self
        }
    }
}

impl std::fmt::Display for Style {
    /// Compact `key=value` listing of the attributes that are set
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        let mut sep = |f: &mut std::fmt::Formatter<'_>| -> std::fmt::Result {
            if first {
                first = false;
                Ok(())
            } else {
                write!(f, " ")
            }
        };

        if let Some(fill) = &self.fill {
            sep(f)?;
            write!(f, "fill={fill}")?;
        }
        if let Some(stroke) = &self.stroke {
            sep(f)?;
            write!(f, "stroke={stroke}")?;
        }
        if let Some(width) = self.stroke_width {
            sep(f)?;
            write!(f, "stroke-width={width}")?;
        }
        if let Some(dash) = &self.dash {
            sep(f)?;
            let pattern: Vec<String> = dash.iter().map(|len| len.to_string()).collect();
            write!(f, "dash={}", pattern.join(","))?;
        }
        if let Some(opacity) = self.opacity {
            sep(f)?;
            write!(f, "opacity={opacity}")?;
        }
        if let Some(size) = self.font_size {
            sep(f)?;
            write!(f, "font-size={size}")?;
        }
        Ok(())
    }
}
