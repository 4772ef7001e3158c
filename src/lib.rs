//! Scene Flatten - compiles declarative scene trees into render trees
//!
//! This library takes an abstract scene description, in which transforms and
//! styles attach to interior nodes and some leaves are deferred until the
//! context above them is known, and compiles it into a flat render tree in
//! which every transform has been baked into concrete geometry and style
//! values. Backends consume the result without ever handling a transform.
//!
//! # Example
//!
//! ```rust
//! use scene_flatten::{flatten, SceneNode, Shape, Style, Transform2d};
//!
//! let scene: SceneNode<Shape, ()> = SceneNode::prim(Shape::circle(0.0, 0.0, 1.0))
//!     .styled(Style::new().with_stroke_width(1.0))
//!     .transformed(Transform2d::scale(2.0));
//!
//! let tree = flatten(&scene);
//! let items = tree.draw_list();
//! assert_eq!(items.len(), 1);
//! // The scale is baked into both the geometry and the stroke width
//! assert_eq!(items[0].style.stroke_width, Some(2.0));
//! ```

pub mod compile;
pub mod geom;
pub mod render_tree;
pub mod scene;
pub mod shape;
pub mod style;
pub mod theme;
pub mod transform;

pub use compile::{lower, push_down, StagedNode};
pub use geom::{Bounds, Point};
pub use render_tree::{DrawItem, RenderNode};
pub use scene::{Context, ContextElement, Deferred, SceneNode};
pub use shape::Shape;
pub use style::Style;
pub use theme::{Theme, ThemeError};
pub use transform::{Transform2d, Transformable};

/// Configuration for the complete flatten pipeline
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Theme supplying default attribute values
    pub theme: Theme,
    /// Debug mode: dump the flattened tree to stderr
    pub debug: bool,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            debug: false,
        }
    }
}

impl FlattenConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Flatten a scene with the default configuration
///
/// This is the main entry point for the library. Every style entering the
/// output is passed through the default theme, so backends always see
/// complete attribute sets.
///
/// # Example
///
/// ```rust
/// use scene_flatten::{flatten, SceneNode, Shape};
///
/// let scene: SceneNode<Shape, ()> = SceneNode::group(vec![
///     SceneNode::prim(Shape::circle(0.0, 0.0, 10.0)),
///     SceneNode::prim(Shape::line(0.0, 0.0, 20.0, 0.0)),
/// ]);
///
/// let tree = flatten(&scene);
/// assert_eq!(tree.draw_list().len(), 2);
/// ```
pub fn flatten<P, A>(scene: &SceneNode<P, A>) -> RenderNode<P>
where
    P: Transformable + Clone + std::fmt::Debug,
    A: Clone,
{
    flatten_with_config(scene, &FlattenConfig::default())
}

/// Flatten a scene with a custom configuration
///
/// # Example
///
/// ```rust
/// use scene_flatten::{flatten_with_config, FlattenConfig, SceneNode, Shape, Style, Theme};
///
/// let theme = Theme::from_str(r##"
/// [defaults]
/// stroke = "#ffffff"
/// "##).unwrap();
///
/// let config = FlattenConfig::new().with_theme(theme);
/// let scene: SceneNode<Shape, ()> = SceneNode::prim(Shape::circle(0.0, 0.0, 1.0))
///     .styled(Style::new().with_fill("#1e3a5f"));
///
/// let tree = flatten_with_config(&scene, &config);
/// assert_eq!(tree.draw_list()[0].style.stroke, Some("#ffffff".to_string()));
/// ```
pub fn flatten_with_config<P, A>(scene: &SceneNode<P, A>, config: &FlattenConfig) -> RenderNode<P>
where
    P: Transformable + Clone + std::fmt::Debug,
    A: Clone,
{
    let tree = flatten_with(scene, |style| config.theme.apply(style));

    if config.debug {
        eprintln!("=== Flatten Debug ===");
        eprint!("{}", tree.dump());
        eprintln!("=====================");
    }

    tree
}

/// Flatten a scene with an arbitrary style-rewrite function
///
/// The rewrite is applied exactly once to every style value on its way into
/// the output. Passing a clone of the input makes the pipeline purely
/// structural, which is useful for testing the transform algebra on its own.
pub fn flatten_with<P, A, F>(scene: &SceneNode<P, A>, rewrite: F) -> RenderNode<P>
where
    P: Transformable + Clone,
    A: Clone,
    F: Fn(&Style) -> Style,
{
    let staged = compile::lower(scene, &rewrite).unwrap_or_else(StagedNode::empty);
    compile::push_down(staged)
}
