//! Flattening: from the intermediate tree to the render tree
//!
//! This pass consumes the intermediate tree and resolves every pending
//! transform. A single transform accumulates along each root-to-leaf path
//! and is applied exactly once: to each primitive payload, and to each style
//! value as it is emitted. Expansion markers reset the accumulator to the
//! identity, because the subtree beneath them was already produced against
//! the ambient context and must not receive it twice.
//!
//! The output carries no transform nodes at all. That absence is the
//! contract backends rely on.

use crate::compile::staged::StagedNode;
use crate::render_tree::RenderNode;
use crate::transform::{Transform2d, Transformable};

/// Flatten an intermediate tree into a render tree
pub fn push_down<P, A>(staged: StagedNode<P, A>) -> RenderNode<P>
where
    P: Transformable,
{
    push_node(staged, Transform2d::IDENTITY)
}

fn push_node<P, A>(node: StagedNode<P, A>, acc: Transform2d) -> RenderNode<P>
where
    P: Transformable,
{
    match node {
        StagedNode::Prim(payload) => RenderNode::Prim(payload.transform(&acc)),

        StagedNode::Group(children) => RenderNode::Group(
            children
                .into_iter()
                .map(|child| push_node(child, acc))
                .collect(),
        ),

        StagedNode::Context {
            style,
            transform,
            body,
        } => {
            // The style sits outside this node's own transform: it gets the
            // inherited accumulator only, while the body gets both.
            let baked = style.transform(&acc);
            RenderNode::Styled(baked, Box::new(push_node(*body, acc * transform)))
        }

        StagedNode::Expanded(body) => {
            RenderNode::Group(vec![push_node(*body, Transform2d::IDENTITY)])
        }

        // Tags end here; geometry and styling pass through unchanged.
        StagedNode::Tagged(_, body) => RenderNode::Group(vec![push_node(*body, acc)]),
    }
}
