//! 2D affine transformation algebra
//!
//! This module provides the transformation type that interior scene nodes
//! attach and the compile passes accumulate and apply. It covers the subset of
//! affine maps the crate actually needs (identity, composition, point
//! application, average scale) without pulling in a linear-algebra crate.
//!
//! ## Composition Convention
//!
//! `a * b` is the transform that applies `b` first and `a` second, matching
//! matrix multiplication. Walking a tree from root to leaf therefore extends
//! the accumulated transform as `inherited * own`, so a primitive experiences
//! its ancestor chain outermost-first.
//!
//! ## Action on Styles
//!
//! Length-valued style attributes (stroke width, font size, dash lengths)
//! scale by [`Transform2d::average_scale`], the square root of the absolute
//! determinant. The factor is multiplicative under composition, which is what
//! makes the action lawful: acting with `a * b` equals acting with `b` and
//! then `a`.

use serde::{Deserialize, Serialize};

use crate::geom::Point;

const EPSILON: f64 = 1e-9;

/// A 2D affine transformation
///
/// Stored as six coefficients mapping `(x, y)` to
/// `(xx*x + xy*y + dx, yx*x + yy*y + dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2d {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Transform2d {
    /// The identity transformation
    pub const IDENTITY: Self = Self {
        xx: 1.0,
        yx: 0.0,
        xy: 0.0,
        yy: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    /// Create a pure translation
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            ..Self::IDENTITY
        }
    }

    /// Create a uniform scale about the origin
    pub fn scale(factor: f64) -> Self {
        Self::scale_xy(factor, factor)
    }

    /// Create a non-uniform scale about the origin
    pub fn scale_xy(sx: f64, sy: f64) -> Self {
        Self {
            xx: sx,
            yy: sy,
            ..Self::IDENTITY
        }
    }

    /// Create a rotation about the origin
    ///
    /// Uses the SVG convention: clockwise positive angles (Y-axis pointing
    /// down), in radians.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            xx: cos,
            yx: sin,
            xy: -sin,
            yy: cos,
            dx: 0.0,
            dy: 0.0,
        }
    }

    /// Check if this is effectively the identity transformation
    ///
    /// Returns true if every coefficient is close enough to the identity's
    /// that applying the transform would not produce any visible change.
    pub fn is_identity(&self) -> bool {
        (self.xx - 1.0).abs() < EPSILON
            && self.yx.abs() < EPSILON
            && self.xy.abs() < EPSILON
            && (self.yy - 1.0).abs() < EPSILON
            && self.dx.abs() < EPSILON
            && self.dy.abs() < EPSILON
    }

    /// Apply the transformation to a point
    pub fn apply(&self, point: Point) -> Point {
        Point {
            x: self.xx * point.x + self.xy * point.y + self.dx,
            y: self.yx * point.x + self.yy * point.y + self.dy,
        }
    }

    /// Determinant of the linear part
    pub fn determinant(&self) -> f64 {
        self.xx * self.yy - self.xy * self.yx
    }

    /// The average scale factor: how much the transform scales lengths,
    /// averaged over all directions
    ///
    /// Computed as the square root of the absolute determinant. A uniform
    /// scale by `s` yields `s`; a rotation or translation yields `1.0`. This
    /// is the factor applied to length-valued style attributes.
    pub fn average_scale(&self) -> f64 {
        self.determinant().abs().sqrt()
    }
}

impl Default for Transform2d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Transform2d {
    type Output = Self;

    /// Compose two transformations: `(a * b).apply(p) == a.apply(b.apply(p))`
    fn mul(self, rhs: Self) -> Self {
        Self {
            xx: self.xx * rhs.xx + self.xy * rhs.yx,
            yx: self.yx * rhs.xx + self.yy * rhs.yx,
            xy: self.xx * rhs.xy + self.xy * rhs.yy,
            yy: self.yx * rhs.xy + self.yy * rhs.yy,
            dx: self.xx * rhs.dx + self.xy * rhs.dy + self.dx,
            dy: self.yx * rhs.dx + self.yy * rhs.dy + self.dy,
        }
    }
}

/// Types that a [`Transform2d`] can act on
///
/// Implementations must be algebraic actions: transforming by `a * b` must
/// equal transforming by `b` and then by `a`, and transforming by the
/// identity must be a no-op. The compile passes rely on these laws; they are
/// preconditions, not runtime-checked.
pub trait Transformable {
    /// Apply a transformation, producing the transformed value
    fn transform(self, t: &Transform2d) -> Self;
}

impl Transformable for Point {
    fn transform(self, t: &Transform2d) -> Self {
        t.apply(self)
    }
}
