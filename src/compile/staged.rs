//! The intermediate tree produced by lowering
//!
//! A [`StagedNode`] sits between the abstract scene tree and the final
//! render tree. Deferred leaves are gone (lowering expanded them), and every
//! interleaved context has been collapsed into a canonical style/transform
//! pair. Transforms are still pending: the flatten pass consumes this tree
//! and bakes them into the leaves.

use crate::style::Style;
use crate::transform::Transform2d;

/// A node in the intermediate tree
#[derive(Debug, Clone, PartialEq)]
pub enum StagedNode<P, A> {
    /// Structural node with no effect of its own, grouping its children
    Group(Vec<StagedNode<P, A>>),
    /// A concrete drawable payload, still in local coordinates
    Prim(P),
    /// A collapsed context: a style layered outside a transform
    ///
    /// The style has already had the transform's action applied to it during
    /// collapsing, so it must stay outside the transform's frame. Holding
    /// both halves in one variant makes the reverse nesting impossible to
    /// construct.
    Context {
        style: Style,
        transform: Transform2d,
        body: Box<StagedNode<P, A>>,
    },
    /// Marks where a deferred leaf was expanded
    ///
    /// The subtree beneath already accounts for every transform accumulated
    /// above this point; the flatten pass must not apply them again.
    Expanded(Box<StagedNode<P, A>>),
    /// An opaque tag carried through from the scene tree
    Tagged(A, Box<StagedNode<P, A>>),
}

impl<P, A> StagedNode<P, A> {
    /// A structural node with no children
    pub fn empty() -> Self {
        StagedNode::Group(Vec::new())
    }
}
