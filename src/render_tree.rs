//! The flattened render tree handed to backends
//!
//! A [`RenderNode`] tree is the end product of compilation. It has exactly
//! three node kinds and one guarantee: nothing in it carries a pending
//! transform. Primitive payloads arrive with every ancestor transform
//! already applied, and style values likewise. A backend walks the tree,
//! treats each style node as a scoped attribute overlay, and draws each
//! primitive directly.

use serde::{Deserialize, Serialize};

use crate::style::Style;

/// A node in the flattened render tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderNode<P> {
    /// Structural node grouping its children, no effect of its own
    Group(Vec<RenderNode<P>>),
    /// A style overlay scoped to the subtree beneath it
    Styled(Style, Box<RenderNode<P>>),
    /// A fully transformed drawable payload, always a leaf
    Prim(P),
}

/// One primitive paired with the style in effect where it sits
#[derive(Debug, Clone)]
pub struct DrawItem<'a, P> {
    /// Effective style: every overlay between the root and the primitive,
    /// merged with inner values winning
    pub style: Style,
    pub primitive: &'a P,
}

impl<P> RenderNode<P> {
    /// An output contributing nothing
    pub fn empty() -> Self {
        RenderNode::Group(Vec::new())
    }

    /// Visit every primitive with the style in effect where it sits
    ///
    /// Style overlays accumulate along the path from the root, inner values
    /// winning. Primitives are visited in document order. The payload
    /// reference borrows from the tree itself, so callers may collect the
    /// references and keep them for as long as the tree lives.
    pub fn visit_primitives<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&Style, &'a P),
    {
        self.visit_node(&Style::new(), &mut f);
    }

    fn visit_node<'a, F>(&'a self, inherited: &Style, f: &mut F)
    where
        F: FnMut(&Style, &'a P),
    {
        match self {
            RenderNode::Prim(payload) => f(inherited, payload),
            RenderNode::Group(children) => {
                for child in children {
                    child.visit_node(inherited, f);
                }
            }
            RenderNode::Styled(style, body) => {
                let effective = inherited.merge(style);
                body.visit_node(&effective, f);
            }
        }
    }

    /// Collect the tree into a flat draw list in document order
    ///
    /// Convenient for backends that do not care about grouping structure:
    /// each entry is a primitive with its effective style already resolved.
    pub fn draw_list(&self) -> Vec<DrawItem<'_, P>> {
        let mut items = Vec::new();
        self.visit_primitives(|style, primitive| {
            items.push(DrawItem {
                style: style.clone(),
                primitive,
            });
        });
        items
    }

    /// Render the tree structure as indented text, one node per line
    ///
    /// Intended for debugging and golden tests; the format is stable.
    pub fn dump(&self) -> String
    where
        P: std::fmt::Debug,
    {
        let mut out = String::new();
        self.dump_node(0, &mut out);
        out
    }

    fn dump_node(&self, depth: usize, out: &mut String)
    where
        P: std::fmt::Debug,
    {
        let indent = "  ".repeat(depth);
        match self {
            RenderNode::Group(children) => {
                out.push_str(&format!("{indent}Group\n"));
                for child in children {
                    child.dump_node(depth + 1, out);
                }
            }
            RenderNode::Styled(style, body) => {
                out.push_str(&format!("{indent}Styled [{style}]\n"));
                body.dump_node(depth + 1, out);
            }
            RenderNode::Prim(payload) => {
                out.push_str(&format!("{indent}Prim {payload:?}\n"));
            }
        }
    }
}
