//! The abstract scene tree
//!
//! A [`SceneNode`] is the declarative description callers build: primitives
//! and spacers at the leaves, grouping, context, and tag nodes in the
//! interior, and deferred leaves whose content is a function of the context
//! accumulated above them. Nothing here is resolved; transforms and styles
//! attached at interior nodes simply sit in the tree until compilation.
//!
//! The tree is generic over `P`, the drawable payload type (see
//! [`crate::shape::Shape`] for the one this crate ships), and `A`, an opaque
//! tag payload threaded through for backends that want grouping or naming
//! metadata.

use std::fmt;
use std::sync::Arc;

use crate::geom::Bounds;
use crate::style::Style;
use crate::transform::Transform2d;

mod context;

pub use context::{Context, ContextElement};

/// A deferred leaf: content that depends on the accumulated context
///
/// The expansion function receives the full context gathered between the
/// root and this leaf and returns a fresh subtree, already expressed in the
/// coordinate frame that context establishes. Compilation will not apply
/// the context to the expansion result a second time.
///
/// Expansions must be pure and must eventually bottom out in concrete
/// leaves; an expansion that keeps returning deferred nodes forever will
/// not terminate.
pub struct Deferred<P, A> {
    expand: Arc<dyn Fn(&Context) -> SceneNode<P, A> + Send + Sync>,
}

impl<P, A> Deferred<P, A> {
    /// Wrap an expansion function
    pub fn new<F>(expand: F) -> Self
    where
        F: Fn(&Context) -> SceneNode<P, A> + Send + Sync + 'static,
    {
        Self {
            expand: Arc::new(expand),
        }
    }

    /// Run the expansion against a context
    pub fn expand(&self, ctx: &Context) -> SceneNode<P, A> {
        (self.expand)(ctx)
    }
}

impl<P, A> Clone for Deferred<P, A> {
    fn clone(&self) -> Self {
        Self {
            expand: Arc::clone(&self.expand),
        }
    }
}

impl<P, A> fmt::Debug for Deferred<P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}

/// A node in the abstract scene tree
#[derive(Debug, Clone)]
pub enum SceneNode<P, A> {
    /// A concrete drawable payload, always a leaf
    Prim(P),
    /// A leaf whose content is computed from the accumulated context
    Deferred(Deferred<P, A>),
    /// A leaf that occupies space but draws nothing
    Spacer(Bounds),
    /// A branch grouping any number of children
    Group(Vec<SceneNode<P, A>>),
    /// A context applied to everything in the subtree beneath it
    Context(Context, Box<SceneNode<P, A>>),
    /// An opaque tag attached to a subtree, irrelevant to geometry
    Tagged(A, Box<SceneNode<P, A>>),
}

impl<P, A> SceneNode<P, A> {
    /// A scene contributing nothing at all
    pub fn empty() -> Self {
        SceneNode::Group(Vec::new())
    }

    /// A leaf holding one drawable payload
    pub fn prim(payload: P) -> Self {
        SceneNode::Prim(payload)
    }

    /// A leaf that reserves space without drawing
    pub fn spacer(bounds: Bounds) -> Self {
        SceneNode::Spacer(bounds)
    }

    /// A branch over the given children
    pub fn group(children: Vec<SceneNode<P, A>>) -> Self {
        SceneNode::Group(children)
    }

    /// A deferred leaf expanded at compile time
    pub fn deferred<F>(expand: F) -> Self
    where
        F: Fn(&Context) -> SceneNode<P, A> + Send + Sync + 'static,
    {
        SceneNode::Deferred(Deferred::new(expand))
    }

    /// Apply a transform to this whole subtree
    ///
    /// Wrapping an already-wrapped node extends its context on the outside
    /// rather than stacking another context node, so repeated wrapping stays
    /// flat. Identity transforms leave the node untouched.
    pub fn transformed(self, t: Transform2d) -> Self {
        if t.is_identity() {
            return self;
        }
        match self {
            SceneNode::Context(inner, child) => {
                let mut ctx = Context::from_transform(t);
                ctx.append(&inner);
                SceneNode::Context(ctx, child)
            }
            node => SceneNode::Context(Context::from_transform(t), Box::new(node)),
        }
    }

    /// Apply a style to this whole subtree
    ///
    /// Same flattening behavior as [`SceneNode::transformed`]; empty styles
    /// leave the node untouched.
    pub fn styled(self, s: Style) -> Self {
        if s.is_empty() {
            return self;
        }
        match self {
            SceneNode::Context(inner, child) => {
                let mut ctx = Context::from_style(s);
                ctx.append(&inner);
                SceneNode::Context(ctx, child)
            }
            node => SceneNode::Context(Context::from_style(s), Box::new(node)),
        }
    }

    /// Attach an opaque tag to this subtree
    pub fn tagged(self, tag: A) -> Self {
        SceneNode::Tagged(tag, Box::new(self))
    }
}
