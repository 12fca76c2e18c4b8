//! SVG document serialization.

use ::svg::{Document, node::element as svg_element};
use log::{debug, info};

use vizkit_core::draw::{ElementKind, ViewElement};

use super::DEFAULT_STYLESHEET;
use crate::{VizError, config::StyleConfig, view::ViewTree};

/// Type alias for boxed SVG nodes.
type SvgNode = Box<dyn ::svg::Node>;

/// Id of the arrow marker referenced by edges with `MarkerEnd::Arrow`.
const ARROW_MARKER_ID: &str = "viz-arrow";

/// Copies the attributes and children of a view element onto a typed
/// `svg` element and boxes it.
macro_rules! populate {
    ($element:expr, $view:expr) => {{
        let mut elem = $element;
        for (name, value) in $view.attributes() {
            elem = elem.set(name, value);
        }
        for child in $view.children() {
            elem = elem.add(to_svg_node(child));
        }
        Box::new(elem) as SvgNode
    }};
}

/// Serializes view trees to SVG markup.
///
/// # Example
///
/// ```
/// # use vizkit::{SceneBuilder, animation::AnimationRegistry, overlay::OverlayRegistry};
/// # use vizkit::{config::StyleConfig, export::SvgExporter, render::Renderer, view::ViewTree};
/// let scene = SceneBuilder::new().node("a").set_position(10.0, 10.0).build();
///
/// let animations = AnimationRegistry::default();
/// let overlays = OverlayRegistry::default();
/// let renderer = Renderer::new(&animations, &overlays);
/// let tree = ViewTree::bind(&scene, &renderer).unwrap();
///
/// let style = StyleConfig::default().with_embedded_stylesheet(false);
/// let markup = SvgExporter::new(&style).export(&tree).unwrap();
/// assert!(markup.contains(r#"viewBox="0 0 800 600""#));
/// assert!(!markup.contains("<style"));
/// ```
#[derive(Debug, Clone)]
pub struct SvgExporter<'a> {
    style: &'a StyleConfig,
    extra_css: Vec<String>,
}

impl<'a> SvgExporter<'a> {
    pub fn new(style: &'a StyleConfig) -> Self {
        Self {
            style,
            extra_css: Vec::new(),
        }
    }

    /// Appends CSS after the default stylesheet (builder style).
    ///
    /// Ignored when the style configuration disables the embedded stylesheet.
    pub fn with_stylesheet(mut self, css: impl Into<String>) -> Self {
        self.extra_css.push(css.into());
        self
    }

    /// Serializes `tree` into a complete SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Style`] if the configured background color is invalid.
    pub fn export(&self, tree: &ViewTree<'_>) -> Result<String, VizError> {
        let view_box = tree.view_box();
        let (width, height) = (view_box.width(), view_box.height());

        let class = ["viz-canvas"]
            .into_iter()
            .chain(self.style.container_class())
            .chain(tree.container_class())
            .collect::<Vec<_>>()
            .join(" ");

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("preserveAspectRatio", "xMidYMid meet")
            .set("class", class);

        if self.style.embed_stylesheet() {
            let mut css = DEFAULT_STYLESHEET.to_string();
            for extra in &self.extra_css {
                css.push_str(extra);
            }
            doc = doc.add(svg_element::Style::new(css));
        }

        if let Some(color) = self.style.background_color().map_err(VizError::Style)? {
            debug!(color:% = color; "Adding background");
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("class", "viz-background")
                    .set("width", width)
                    .set("height", height)
                    .set("fill", color.to_string()),
            );
        }

        doc = doc.add(arrow_marker_definitions());

        for element in tree.elements() {
            doc = doc.add(to_svg_node(element));
        }

        info!(width, height; "SVG document exported");
        Ok(doc.to_string())
    }
}

fn arrow_marker_definitions() -> svg_element::Definitions {
    let head = svg_element::Polygon::new()
        .set("points", "0 0, 10 3.5, 0 7")
        .set("fill", "currentColor");

    let marker = svg_element::Marker::new()
        .set("id", ARROW_MARKER_ID)
        .set("markerWidth", 10)
        .set("markerHeight", 7)
        .set("refX", 9)
        .set("refY", 3.5)
        .set("orient", "auto")
        .add(head);

    svg_element::Definitions::new().add(marker)
}

fn to_svg_node(view: &ViewElement) -> SvgNode {
    match view.kind() {
        ElementKind::Group => populate!(svg_element::Group::new(), view),
        ElementKind::Line => populate!(svg_element::Line::new(), view),
        ElementKind::Circle => populate!(svg_element::Circle::new(), view),
        ElementKind::Rect => populate!(svg_element::Rectangle::new(), view),
        ElementKind::Polygon => populate!(svg_element::Polygon::new(), view),
        ElementKind::Text => {
            populate!(svg_element::Text::new(view.text_content().unwrap_or_default()), view)
        }
    }
}
