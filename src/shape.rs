//! Concrete drawing primitives
//!
//! The compile passes are generic over the primitive type; [`Shape`] is the
//! set of primitives this crate ships for actually drawing something. Each
//! shape knows how a transform acts on it, which is what lets the flatten
//! pass bake accumulated transforms directly into leaf geometry.

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::transform::{Transform2d, Transformable};

/// A drawable primitive with geometry in local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// A circle given by center and radius
    Circle { center: Point, radius: f64 },
    /// A straight line segment
    Line { from: Point, to: Point },
    /// A connected sequence of line segments, optionally closed
    Polyline { points: Vec<Point>, closed: bool },
    /// A text label anchored at a position
    Text {
        position: Point,
        content: String,
        size: f64,
    },
}

impl Shape {
    /// Create a circle
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Shape::Circle {
            center: Point::new(cx, cy),
            radius,
        }
    }

    /// Create a line segment
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Shape::Line {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        }
    }

    /// Create an axis-aligned rectangle as a closed polyline
    ///
    /// Stored as its four corners so that rotation and shear transform it
    /// exactly instead of snapping back to an axis-aligned box.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Shape::Polyline {
            points: vec![
                Point::new(x, y),
                Point::new(x + width, y),
                Point::new(x + width, y + height),
                Point::new(x, y + height),
            ],
            closed: true,
        }
    }

    /// Create a text label
    pub fn text(x: f64, y: f64, content: impl Into<String>, size: f64) -> Self {
        Shape::Text {
            position: Point::new(x, y),
            content: content.into(),
            size,
        }
    }
}

impl Transformable for Shape {
    fn transform(self, t: &Transform2d) -> Self {
        match self {
            Shape::Circle { center, radius } => Shape::Circle {
                center: t.apply(center),
                // Non-uniform scales turn circles into ellipses; we keep the
                // circle and approximate with the average scale factor.
                radius: radius * t.average_scale(),
            },
            Shape::Line { from, to } => Shape::Line {
                from: t.apply(from),
                to: t.apply(to),
            },
            Shape::Polyline { points, closed } => Shape::Polyline {
                points: points.into_iter().map(|p| t.apply(p)).collect(),
                closed,
            },
            Shape::Text {
                position,
                content,
                size,
            } => Shape::Text {
                position: t.apply(position),
                content,
                size: size * t.average_scale(),
            },
        }
    }
}
