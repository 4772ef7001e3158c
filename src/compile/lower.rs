//! Lowering: from the abstract scene tree to the intermediate tree
//!
//! This pass walks the scene tree once and does three things:
//!
//! - expands every deferred leaf by handing it the context accumulated
//!   between the root and the leaf (style elements rewritten first), then
//!   lowering the expansion under a marker that protects it from the
//!   flatten pass re-applying those transforms;
//! - collapses each interleaved context into its canonical style/transform
//!   pair, with the style rewritten and layered outside the transform;
//! - prunes degenerate structure: single-child branches collapse into the
//!   child, and subtrees contributing nothing at all disappear.
//!
//! Primitives are passed through untouched here. Applying the accumulated
//! transforms to them is entirely the flatten pass's job.

use crate::compile::staged::StagedNode;
use crate::scene::{Context, SceneNode};
use crate::style::Style;

/// Lower a scene tree into the intermediate tree
///
/// `rewrite` is applied to every style value on its way into the output:
/// once per collapsed context, and once per style element of the context a
/// deferred leaf is expanded with. Returns `None` when the scene contributes
/// no structure at all.
pub fn lower<P, A, F>(scene: &SceneNode<P, A>, rewrite: &F) -> Option<StagedNode<P, A>>
where
    P: Clone,
    A: Clone,
    F: Fn(&Style) -> Style,
{
    lower_node(scene, &Context::new(), rewrite)
}

fn lower_node<P, A, F>(
    node: &SceneNode<P, A>,
    acc: &Context,
    rewrite: &F,
) -> Option<StagedNode<P, A>>
where
    P: Clone,
    A: Clone,
    F: Fn(&Style) -> Style,
{
    match node {
        SceneNode::Prim(payload) => Some(StagedNode::Prim(payload.clone())),

        // Spacers reserve layout space upstream but draw nothing; the
        // context above them has no descendants left to reach.
        SceneNode::Spacer(_) => Some(StagedNode::empty()),

        SceneNode::Deferred(deferred) => {
            let adjusted = acc.map_styles(rewrite);
            let expansion = deferred.expand(&adjusted);
            // The expansion is lowered from scratch: it already lives in the
            // frame the accumulated context establishes.
            let body = lower_node(&expansion, &Context::new(), rewrite)
                .unwrap_or_else(StagedNode::empty);
            Some(StagedNode::Expanded(Box::new(body)))
        }

        SceneNode::Group(children) => {
            let mut lowered: Vec<StagedNode<P, A>> = children
                .iter()
                .filter_map(|child| lower_node(child, acc, rewrite))
                .collect();
            match lowered.len() {
                0 => None,
                1 => lowered.pop(),
                _ => Some(StagedNode::Group(lowered)),
            }
        }

        SceneNode::Context(ctx, child) => {
            let mut extended = acc.clone();
            extended.append(ctx);
            let body = lower_node(child, &extended, rewrite)?;

            if ctx.is_identity() {
                return Some(body);
            }
            let (transform, style) = ctx.decompose();
            Some(StagedNode::Context {
                style: rewrite(&style),
                transform,
                body: Box::new(body),
            })
        }

        SceneNode::Tagged(tag, child) => {
            let body = lower_node(child, acc, rewrite)?;
            Some(StagedNode::Tagged(tag.clone(), Box::new(body)))
        }
    }
}
