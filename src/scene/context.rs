//! Interleaved transform and style context
//!
//! Interior scene nodes carry a [`Context`]: an ordered sequence of
//! transforms and styles, outermost first. Keeping the interleaving explicit
//! preserves author intent (a style written inside a scale means something
//! different from one written outside it) while still allowing the compiler
//! to collapse the whole sequence into one canonical transform/style pair
//! when it needs to.

use crate::style::Style;
use crate::transform::{Transform2d, Transformable};

/// One entry in a context sequence
#[derive(Debug, Clone, PartialEq)]
pub enum ContextElement {
    /// A coordinate transformation applied to everything beneath it
    Transform(Transform2d),
    /// Style attributes applied to everything beneath them
    Style(Style),
}

/// An ordered sequence of transforms and styles, outermost first
///
/// The sequence is kept normalized: adjacent elements of the same kind are
/// fused as they are pushed, identity transforms and empty styles are never
/// stored, and a transform fusion that cancels out to the identity is
/// removed. An empty sequence is the identity context.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Context {
    elements: Vec<ContextElement>,
}

impl Context {
    /// Create the identity context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context holding a single transform
    pub fn from_transform(t: Transform2d) -> Self {
        let mut ctx = Self::new();
        ctx.push_transform(t);
        ctx
    }

    /// Create a context holding a single style
    pub fn from_style(s: Style) -> Self {
        let mut ctx = Self::new();
        ctx.push_style(s);
        ctx
    }

    /// Check whether this context changes anything at all
    pub fn is_identity(&self) -> bool {
        self.elements.is_empty()
    }

    /// The elements in order, outermost first
    pub fn elements(&self) -> &[ContextElement] {
        &self.elements
    }

    /// Add a transform inside everything already in the sequence
    ///
    /// Identity transforms are dropped; a transform pushed directly inside
    /// another transform is fused into it by composition. A fusion that
    /// cancels out to the identity removes the element entirely.
    pub fn push_transform(&mut self, t: Transform2d) {
        if t.is_identity() {
            return;
        }
        if let Some(ContextElement::Transform(prev)) = self.elements.last_mut() {
            let fused = *prev * t;
            if fused.is_identity() {
                self.elements.pop();
            } else {
                *prev = fused;
            }
            return;
        }
        self.elements.push(ContextElement::Transform(t));
    }

    /// Add a style inside everything already in the sequence
    ///
    /// Empty styles are dropped; a style pushed directly inside another
    /// style is fused into it, with the inner attributes winning.
    pub fn push_style(&mut self, s: Style) {
        if s.is_empty() {
            return;
        }
        if let Some(ContextElement::Style(prev)) = self.elements.last_mut() {
            *prev = prev.merge(&s);
            return;
        }
        self.elements.push(ContextElement::Style(s));
    }

    /// Extend this context with another one nested inside it
    pub fn append(&mut self, other: &Context) {
        for element in &other.elements {
            match element {
                ContextElement::Transform(t) => self.push_transform(*t),
                ContextElement::Style(s) => self.push_style(s.clone()),
            }
        }
    }

    /// Collapse the sequence into its canonical form: one style outside one
    /// transform
    ///
    /// Walks the sequence from the inside out. Each style encountered is
    /// pulled outward through the transforms outside it, which scales its
    /// length-valued attributes so the collapsed pair means exactly what the
    /// interleaved sequence meant. Styles merge with inner values winning;
    /// transforms compose outermost-first.
    pub fn decompose(&self) -> (Transform2d, Style) {
        let mut transform = Transform2d::IDENTITY;
        let mut style = Style::new();

        for element in self.elements.iter().rev() {
            match element {
                ContextElement::Transform(t) => {
                    transform = *t * transform;
                    style = style.transform(t);
                }
                ContextElement::Style(s) => {
                    style = s.merge(&style);
                }
            }
        }

        (transform, style)
    }

    /// Rebuild the context with every style element passed through `f`
    ///
    /// Transforms and the interleaving order are preserved. Styles mapped to
    /// empty are dropped, which keeps the sequence normalized.
    pub fn map_styles<F>(&self, f: F) -> Context
    where
        F: Fn(&Style) -> Style,
    {
        let mut mapped = Context::new();
        for element in &self.elements {
            match element {
                ContextElement::Transform(t) => mapped.push_transform(*t),
                ContextElement::Style(s) => mapped.push_style(f(s)),
            }
        }
        mapped
    }
}
