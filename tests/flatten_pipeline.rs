//! Integration tests for the full flatten pipeline

use pretty_assertions::assert_eq;

use scene_flatten::{
    flatten, flatten_with, Bounds, Context, RenderNode, SceneNode, Shape, Style, Transform2d,
    Transformable,
};

type Scene = SceneNode<Shape, String>;

/// Collect the style carried by every style node, in document order
fn collect_styles(tree: &RenderNode<Shape>, out: &mut Vec<Style>) {
    match tree {
        RenderNode::Group(children) => {
            for child in children {
                collect_styles(child, out);
            }
        }
        RenderNode::Styled(style, body) => {
            out.push(style.clone());
            collect_styles(body, out);
        }
        RenderNode::Prim(_) => {}
    }
}

#[test]
fn test_scaled_styled_circle_bakes_both() {
    // The canonical case: a unit circle with width 1, both written inside a
    // scale by 2. The output carries no transform; the scale lives on in the
    // doubled radius and doubled width.
    let scene: Scene = SceneNode::prim(Shape::circle(0.0, 0.0, 1.0))
        .styled(Style::new().with_stroke_width(1.0))
        .transformed(Transform2d::scale(2.0));

    let tree = flatten_with(&scene, Clone::clone);
    assert_eq!(
        tree,
        RenderNode::Styled(
            Style::new().with_stroke_width(2.0),
            Box::new(RenderNode::Prim(Shape::circle(0.0, 0.0, 2.0))),
        )
    );
}

#[test]
fn test_identity_round_trip() {
    let scene: Scene = SceneNode::group(vec![
        SceneNode::prim(Shape::circle(3.0, 4.0, 5.0)),
        SceneNode::prim(Shape::line(0.0, 0.0, 1.0, 1.0)),
    ]);

    let tree = flatten_with(&scene, Clone::clone);
    assert_eq!(
        tree,
        RenderNode::Group(vec![
            RenderNode::Prim(Shape::circle(3.0, 4.0, 5.0)),
            RenderNode::Prim(Shape::line(0.0, 0.0, 1.0, 1.0)),
        ])
    );
}

#[test]
fn test_single_child_groups_collapse() {
    let scene: Scene = SceneNode::group(vec![SceneNode::group(vec![SceneNode::prim(
        Shape::circle(0.0, 0.0, 1.0),
    )])]);

    let tree = flatten_with(&scene, Clone::clone);
    assert_eq!(tree, RenderNode::Prim(Shape::circle(0.0, 0.0, 1.0)));
}

#[test]
fn test_delay_reset_excludes_ancestor_transform() {
    // Two circles at the same depth under a scale by 2. The plain one gets
    // scaled; the deferred one was expanded knowing the scale, so the scale
    // must not hit its geometry a second time.
    let scene: Scene = SceneNode::group(vec![
        SceneNode::prim(Shape::circle(1.0, 0.0, 1.0)),
        SceneNode::deferred(|_| SceneNode::prim(Shape::circle(1.0, 0.0, 1.0))),
    ])
    .transformed(Transform2d::scale(2.0));

    let tree = flatten_with(&scene, Clone::clone);
    let mut prims = Vec::new();
    tree.visit_primitives(|_, p| prims.push(p.clone()));

    assert_eq!(
        prims,
        vec![
            Shape::circle(2.0, 0.0, 2.0),
            Shape::circle(1.0, 0.0, 1.0),
        ]
    );
}

#[test]
fn test_deferred_leaf_can_counter_the_scale() {
    // A marker that wants a constant on-screen radius divides out the
    // accumulated scale when it expands.
    let scene: Scene = SceneNode::deferred(|ctx: &Context| {
        let (t, _) = ctx.decompose();
        SceneNode::prim(Shape::circle(0.0, 0.0, 10.0 / t.average_scale()))
    })
    .transformed(Transform2d::scale(5.0));

    let tree = flatten_with(&scene, Clone::clone);
    let mut prims = Vec::new();
    tree.visit_primitives(|_, p| prims.push(p.clone()));

    assert_eq!(prims, vec![Shape::circle(0.0, 0.0, 2.0)]);
}

#[test]
fn test_empty_input_yields_empty_tree() {
    let scene: Scene = SceneNode::empty();
    assert_eq!(flatten_with(&scene, Clone::clone), RenderNode::empty());

    // A scene of spacers draws nothing either, but keeps its structure
    let spacers: Scene = SceneNode::group(vec![
        SceneNode::spacer(Bounds::new(0.0, 0.0, 10.0, 10.0)),
        SceneNode::spacer(Bounds::new(10.0, 0.0, 10.0, 10.0)),
    ]);
    let tree = flatten_with(&spacers, Clone::clone);
    assert!(tree.draw_list().is_empty());
}

#[test]
fn test_style_rewrite_applies_exactly_once() {
    // The rewrite bumps a counter attribute. Every style node in the output
    // must come out with the counter at exactly one.
    let bump = |style: &Style| {
        let n = style.opacity.unwrap_or(0.0) + 1.0;
        style.clone().with_opacity(n)
    };

    let scene: Scene = SceneNode::group(vec![SceneNode::prim(Shape::circle(0.0, 0.0, 1.0))
        .styled(Style::new().with_stroke_width(1.0))])
    .styled(Style::new().with_fill("#ff0000"))
    .transformed(Transform2d::scale(2.0));

    let tree = flatten_with(&scene, bump);
    let mut styles = Vec::new();
    collect_styles(&tree, &mut styles);

    assert_eq!(styles.len(), 2);
    for style in styles {
        assert_eq!(style.opacity, Some(1.0));
    }
}

#[test]
fn test_cancelling_transforms_leave_no_residual_structure() {
    // A scale and its inverse fuse to the identity when wrapped one after
    // the other, so no context node is ever built and the output is the
    // bare primitive: no spurious style overlay for a theme to fill in.
    let scene: Scene = SceneNode::prim(Shape::circle(0.0, 0.0, 1.0))
        .transformed(Transform2d::scale(2.0))
        .transformed(Transform2d::scale(0.5));

    let tree = flatten_with(&scene, Clone::clone);
    assert_eq!(tree, RenderNode::Prim(Shape::circle(0.0, 0.0, 1.0)));
}

#[test]
fn test_no_pending_transform_invariant() {
    // Whatever chain of transforms sits above a primitive, the output
    // payload equals the original payload acted on by the composed chain.
    let outer = Transform2d::translation(5.0, 0.0);
    let inner = Transform2d::scale(2.0) * Transform2d::rotation(0.3);
    let original = Shape::circle(1.0, 1.0, 1.0);

    let scene: Scene = SceneNode::group(vec![
        SceneNode::prim(original.clone()).transformed(inner)
    ])
    .transformed(outer);

    let tree = flatten_with(&scene, Clone::clone);
    let mut prims = Vec::new();
    tree.visit_primitives(|_, p| prims.push(p.clone()));

    assert_eq!(prims, vec![original.transform(&(outer * inner))]);
}

#[test]
fn test_interleaving_order_changes_the_result() {
    // Same elements, opposite order: a width written inside the scale
    // doubles, a width written outside it does not.
    let inside: Scene = SceneNode::prim(Shape::circle(0.0, 0.0, 1.0))
        .styled(Style::new().with_stroke_width(1.0))
        .transformed(Transform2d::scale(2.0));
    let outside: Scene = SceneNode::prim(Shape::circle(0.0, 0.0, 1.0))
        .transformed(Transform2d::scale(2.0))
        .styled(Style::new().with_stroke_width(1.0));

    let width_of = |scene: &Scene| {
        let mut styles = Vec::new();
        collect_styles(&flatten_with(scene, Clone::clone), &mut styles);
        styles[0].stroke_width
    };

    assert_eq!(width_of(&inside), Some(2.0));
    assert_eq!(width_of(&outside), Some(1.0));
}

#[test]
fn test_tags_do_not_disturb_geometry() {
    let scene: Scene = SceneNode::group(vec![
        SceneNode::prim(Shape::circle(1.0, 0.0, 1.0)).tagged("left".to_string()),
        SceneNode::prim(Shape::circle(3.0, 0.0, 1.0)).tagged("right".to_string()),
    ])
    .transformed(Transform2d::scale(2.0));

    let tree = flatten_with(&scene, Clone::clone);
    let mut prims = Vec::new();
    tree.visit_primitives(|_, p| prims.push(p.clone()));

    assert_eq!(
        prims,
        vec![
            Shape::circle(2.0, 0.0, 2.0),
            Shape::circle(6.0, 0.0, 2.0),
        ]
    );
}

#[test]
fn test_theme_completes_every_emitted_style() {
    let scene: Scene = SceneNode::group(vec![
        SceneNode::prim(Shape::circle(0.0, 0.0, 1.0)).styled(Style::new().with_fill("#ff0000")),
        SceneNode::prim(Shape::text(0.0, 20.0, "label", 12.0))
            .styled(Style::new().with_font_size(12.0)),
    ]);

    let tree = flatten(&scene);
    let mut styles = Vec::new();
    collect_styles(&tree, &mut styles);

    assert_eq!(styles.len(), 2);
    for style in styles {
        assert!(style.fill.is_some());
        assert!(style.stroke.is_some());
        assert!(style.stroke_width.is_some());
        assert!(style.font_size.is_some());
    }
}

#[test]
fn test_deep_nesting_accumulates_in_order() {
    // Ten nested translations by (1, 0) move the point by (10, 0)
    let mut scene: Scene = SceneNode::prim(Shape::circle(0.0, 0.0, 1.0));
    for _ in 0..10 {
        scene = SceneNode::group(vec![scene]).transformed(Transform2d::translation(1.0, 0.0));
    }

    let tree = flatten_with(&scene, Clone::clone);
    let mut prims = Vec::new();
    tree.visit_primitives(|_, p| prims.push(p.clone()));

    assert_eq!(prims, vec![Shape::circle(10.0, 0.0, 1.0)]);
}

#[test]
fn test_concurrent_flattens_agree() {
    use std::sync::Arc;
    use std::thread;

    let scene: Arc<Scene> = Arc::new(
        SceneNode::group(vec![
            SceneNode::prim(Shape::circle(1.0, 0.0, 1.0)),
            SceneNode::deferred(|ctx: &Context| {
                let (t, _) = ctx.decompose();
                SceneNode::prim(Shape::circle(0.0, 0.0, 4.0 / t.average_scale()))
            }),
        ])
        .transformed(Transform2d::scale(2.0)),
    );

    let mut handles = Vec::new();
    for _ in 0..4 {
        let scene = Arc::clone(&scene);
        handles.push(thread::spawn(move || flatten_with(&scene, Clone::clone)));
    }

    let results: Vec<RenderNode<Shape>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Flatten thread should finish"))
        .collect();

    for result in &results[1..] {
        assert_eq!(results[0], *result);
    }
}
