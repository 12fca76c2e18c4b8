//! Scene rendering.
//!
//! [`Renderer::layers`] is the single traversal shared by both output modes:
//! it turns a [`Scene`] into view elements grouped by [`RenderLayer`]. The
//! retained binding ([`crate::view::ViewTree`]) keeps those elements; the
//! markup exporter ([`crate::export::SvgExporter`]) serializes them.
//!
//! Layer contents, bottom to top:
//!
//! 1. Edges: one `viz-edge-group` per edge with both endpoints present
//! 2. Nodes: one `viz-node-group` per node
//! 3. Overlays: the output of every overlay spec whose kind is registered
//!
//! Within a layer, elements follow scene insertion order.

use log::{debug, trace};

use vizkit_core::{
    draw::{ClickTarget, LayeredOutput, RenderLayer, ViewElement},
    geometry::Point,
    scene::{Edge, LabelPosition, MarkerEnd, Node, Scene, Shape},
};

use crate::{
    VizError,
    animation::{AnimationRegistry, Element, ResolvedAnimation},
    overlay::{OverlayContext, OverlayRegistry},
};

/// Stroke width of an edge's hit line when only a click handler asks for one.
const DEFAULT_HIT_AREA: f64 = 10.0;

/// Renders scenes against a pair of registries.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'r> {
    animations: &'r AnimationRegistry,
    overlays: &'r OverlayRegistry,
}

impl<'r> Renderer<'r> {
    pub fn new(animations: &'r AnimationRegistry, overlays: &'r OverlayRegistry) -> Self {
        Self {
            animations,
            overlays,
        }
    }

    /// Renders `scene` into layered view elements.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::NonFiniteCoordinate`] if the view box, a node
    /// position, shape dimension, label offset, hit area or any coordinate
    /// produced by an overlay is NaN or infinite.
    pub fn layers(&self, scene: &Scene) -> Result<LayeredOutput, VizError> {
        if !scene.view_box().is_finite() {
            return Err(VizError::non_finite_view_box());
        }
        for node in scene.nodes() {
            check_node(node)?;
        }

        let mut output = LayeredOutput::new();

        for edge in scene.edges() {
            let Some((from, to)) = scene.endpoints(edge) else {
                debug!(edge_id:% = edge.id(); "Skipping edge with a missing endpoint");
                continue;
            };
            let element = self.render_edge(edge, from.position(), to.position())?;
            output.add_to_layer(RenderLayer::Edges, element);
        }

        for node in scene.nodes() {
            output.add_to_layer(RenderLayer::Nodes, self.render_node(node));
        }

        for spec in scene.overlays() {
            let Some(renderer) = self.overlays.lookup(spec.kind()) else {
                trace!(kind = spec.kind(); "No overlay renderer registered");
                continue;
            };
            for element in renderer.render(&OverlayContext::new(spec, scene)) {
                if let Some(attribute) = element.non_finite_attribute() {
                    return Err(VizError::non_finite_overlay(spec.kind(), attribute));
                }
                output.add_to_layer(RenderLayer::Overlays, element);
            }
        }

        Ok(output)
    }

    fn render_edge(&self, edge: &Edge, start: Point, end: Point) -> Result<ViewElement, VizError> {
        let animation = self.animations.resolve(edge.animations(), Element::Edge(edge));
        let group = element_group("viz-edge-group", edge.class(), &animation);

        let mut line = line_between(ViewElement::line(), start, end).set("class", "viz-edge");
        if edge.marker_end() == Some(MarkerEnd::Arrow) {
            line = line.set("marker-end", "url(#viz-arrow)");
        }
        let mut group = group.add(line.set("stroke", "currentColor"));

        if edge.hit_area().is_some() || edge.on_click().is_some() {
            let width = edge.hit_area().unwrap_or(DEFAULT_HIT_AREA);
            if !width.is_finite() {
                return Err(VizError::non_finite_edge(edge.id(), "hit area"));
            }
            let hit = line_between(ViewElement::line(), start, end)
                .set("class", "viz-edge-hit")
                .set("stroke", "transparent")
                .set("stroke-width", width)
                .with_target(ClickTarget::Edge(edge.id()));
            group = group.add(hit);
        }

        if let Some(label) = edge.label() {
            let anchor = match label.position() {
                LabelPosition::Start => start,
                LabelPosition::Mid => start.midpoint(end),
                LabelPosition::End => end,
            };
            let at = anchor.offset(label.offset_x(), label.offset_y());
            if !at.is_finite() {
                return Err(VizError::non_finite_edge(edge.id(), "label offset"));
            }
            group = group.add(label_text(
                label.text(),
                at,
                "viz-edge-label",
                label.class(),
            ));
        }

        Ok(group)
    }

    fn render_node(&self, node: &Node) -> ViewElement {
        let animation = self.animations.resolve(node.animations(), Element::Node(node));
        let mut group = element_group("viz-node-group", node.class(), &animation)
            .with_target(ClickTarget::Node(node.id()))
            .add(shape_element(node.shape(), node.position()));

        if let Some(label) = node.label() {
            let at = node.position().offset(label.offset_x(), label.offset_y());
            group = group.add(label_text(label.text(), at, "viz-node-label", label.class()));
        }

        group
    }
}

fn check_node(node: &Node) -> Result<(), VizError> {
    if !node.position().is_finite() {
        return Err(VizError::non_finite_node(node.id(), "position"));
    }
    if !node.shape().is_finite() {
        return Err(VizError::non_finite_node(node.id(), node.shape().name()));
    }
    let label_ok = node
        .label()
        .is_none_or(|label| label.offset_x().is_finite() && label.offset_y().is_finite());
    if !label_ok {
        return Err(VizError::non_finite_node(node.id(), "label offset"));
    }
    Ok(())
}

/// Joins non-empty class fragments with single spaces.
fn join_classes<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn element_group(base: &str, class: Option<&str>, animation: &ResolvedAnimation) -> ViewElement {
    let classes = join_classes(
        [base, class.unwrap_or_default()]
            .into_iter()
            .chain(animation.classes().iter().map(String::as_str)),
    );
    let group = ViewElement::group().set("class", classes);
    if animation.style().is_empty() {
        group
    } else {
        group.set("style", animation.style_string())
    }
}

fn line_between(line: ViewElement, start: Point, end: Point) -> ViewElement {
    line.set("x1", start.x())
        .set("y1", start.y())
        .set("x2", end.x())
        .set("y2", end.y())
}

fn label_text(text: &str, at: Point, base: &str, class: Option<&str>) -> ViewElement {
    ViewElement::text(text)
        .set("x", at.x())
        .set("y", at.y())
        .set("class", join_classes([base, class.unwrap_or_default()]))
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
        .set("pointer-events", "none")
}

fn shape_element(shape: &Shape, center: Point) -> ViewElement {
    let (x, y) = (center.x(), center.y());
    let element = match *shape {
        Shape::Circle { radius } => ViewElement::circle()
            .set("cx", x)
            .set("cy", y)
            .set("r", radius),
        Shape::Rect {
            width,
            height,
            corner_radius,
        } => ViewElement::rect()
            .set("x", x - width / 2.0)
            .set("y", y - height / 2.0)
            .set("width", width)
            .set("height", height)
            .set("rx", corner_radius.unwrap_or_default()),
        Shape::Diamond { width, height } => {
            let (hw, hh) = (width / 2.0, height / 2.0);
            ViewElement::polygon().set(
                "points",
                format!(
                    "{},{} {},{} {},{} {},{}",
                    x,
                    y - hh,
                    x + hw,
                    y,
                    x,
                    y + hh,
                    x - hw,
                    y
                ),
            )
        }
    };
    element.set("class", "viz-node-shape")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_classes() {
        assert_eq!(join_classes(["viz-node-group", "", "neuron  active"]), "viz-node-group neuron active");
        assert_eq!(join_classes(["a", "a"]), "a a");
    }

    #[test]
    fn test_diamond_points() {
        let diamond = shape_element(
            &Shape::Diamond {
                width: 20.0,
                height: 10.0,
            },
            Point::new(100.0, 50.0),
        );
        assert_eq!(diamond.attr("points"), Some("100,45 110,50 100,55 90,50"));
        assert!(diamond.has_class("viz-node-shape"));
    }

    #[test]
    fn test_rect_is_centered() {
        let rect = shape_element(
            &Shape::Rect {
                width: 80.0,
                height: 40.0,
                corner_radius: Some(5.0),
            },
            Point::new(400.0, 50.0),
        );
        assert_eq!(rect.number("x"), Some(360.0));
        assert_eq!(rect.number("y"), Some(30.0));
        assert_eq!(rect.number("rx"), Some(5.0));
    }
}
