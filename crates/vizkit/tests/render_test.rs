//! Integration tests for rendering scenes to view trees and SVG markup.

use std::{cell::RefCell, rc::Rc};

use float_cmp::assert_approx_eq;
use serde_json::json;

use vizkit::{
    SceneBuilder, VizError,
    animation::{AnimationContext, AnimationRegistry, AnimationRenderer, StyleValue},
    config::StyleConfig,
    draw::{ClickTarget, ElementKind, ViewElement},
    geometry::Padding,
    grid::Align,
    identifier::Id,
    overlay::{OverlayContext, OverlayRegistry, OverlayRenderer},
    render::Renderer,
    scene::Scene,
    view::ViewTree,
};

struct Pulse;

impl AnimationRenderer for Pulse {
    fn class(&self, _ctx: &AnimationContext<'_>) -> Option<String> {
        Some("pulse".to_string())
    }

    fn style(&self, ctx: &AnimationContext<'_>) -> Vec<(String, StyleValue)> {
        let speed = ctx.tag.params()["speed"].as_f64().unwrap_or(1.0);
        vec![("--speed".to_string(), StyleValue::from(speed))]
    }
}

struct Glow;

impl AnimationRenderer for Glow {
    fn class(&self, _ctx: &AnimationContext<'_>) -> Option<String> {
        Some("glow".to_string())
    }

    fn style(&self, _ctx: &AnimationContext<'_>) -> Vec<(String, StyleValue)> {
        vec![
            ("--speed".to_string(), StyleValue::from(4.0)),
            ("--glow-color".to_string(), StyleValue::from("gold")),
        ]
    }
}

struct Caption;

impl OverlayRenderer for Caption {
    fn render(&self, ctx: &OverlayContext<'_>) -> Vec<ViewElement> {
        vec![ViewElement::text(ctx.spec.params()["text"].as_str().unwrap_or_default())
            .set("class", ctx.class_or("caption"))]
    }
}

fn bind<'s>(scene: &'s Scene, animations: &AnimationRegistry, overlays: &OverlayRegistry) -> ViewTree<'s> {
    ViewTree::bind(scene, &Renderer::new(animations, overlays)).unwrap()
}

fn layer<'t>(tree: &'t ViewTree<'_>, name: &str) -> &'t ViewElement {
    tree.layers()
        .iter()
        .find(|group| group.attr("data-layer") == Some(name))
        .unwrap()
}

#[test]
fn test_layers_are_emitted_in_paint_order() {
    let scene = SceneBuilder::new().build();
    let tree = bind(&scene, &AnimationRegistry::default(), &OverlayRegistry::default());

    let names: Vec<_> = tree
        .layers()
        .iter()
        .map(|group| group.attr("data-layer").unwrap())
        .collect();
    assert_eq!(names, ["edges", "nodes", "overlays"]);
}

#[test]
fn test_dangling_edge_is_skipped() {
    let scene = SceneBuilder::new()
        .node("a")
        .node("b")
        .edge("a", "b", None)
        .edge("a", "ghost", None)
        .build();
    let tree = bind(&scene, &AnimationRegistry::default(), &OverlayRegistry::default());

    assert_eq!(layer(&tree, "edges").children().len(), 1);
    assert_eq!(layer(&tree, "nodes").children().len(), 2);
}

#[test]
fn test_signal_overlay_interpolates() {
    let scene = SceneBuilder::new()
        .node("a")
        .set_position(0.0, 0.0)
        .node("b")
        .set_position(100.0, 50.0)
        .overlay("signal", json!({"from": "a", "to": "b", "progress": 0.25}), None)
        .overlay("signal", json!({"from": "a", "to": "missing", "progress": 0.5}), None)
        .build();
    let tree = bind(&scene, &AnimationRegistry::default(), &OverlayRegistry::default());

    let overlays = layer(&tree, "overlays");
    assert_eq!(overlays.children().len(), 1);
    assert_eq!(overlays.children()[0].attr("transform"), Some("translate(25, 12.5)"));

    let visible = overlays.children()[0]
        .descendants()
        .into_iter()
        .find(|element| element.has_class("viz-signal-shape"))
        .unwrap();
    assert_approx_eq!(f64, visible.number("r").unwrap(), 6.0, epsilon = 1e-9);
}

#[test]
fn test_signal_at_zero_progress_sits_on_source() {
    let scene = SceneBuilder::new()
        .node("a")
        .set_position(0.0, 0.0)
        .node("b")
        .set_position(100.0, 0.0)
        .overlay("signal", json!({"from": "a", "to": "b", "progress": 0.0}), None)
        .build();
    let tree = bind(&scene, &AnimationRegistry::default(), &OverlayRegistry::default());

    let overlays = layer(&tree, "overlays");
    assert_eq!(overlays.children().len(), 1);
    assert_eq!(overlays.children()[0].attr("transform"), Some("translate(0, 0)"));
}

#[test]
fn test_animation_classes_accumulate_and_styles_override() {
    let mut animations = AnimationRegistry::default();
    animations.register_node("pulse", Pulse);

    let scene = SceneBuilder::new()
        .node("n")
        .add_class("neuron")
        .add_animation("pulse", json!({"speed": 1.0}))
        .add_animation("unknown", json!(null))
        .add_animation("pulse", json!({"speed": 3.0}))
        .build();
    let tree = bind(&scene, &animations, &OverlayRegistry::default());

    let group = &layer(&tree, "nodes").children()[0];
    assert_eq!(group.attr("class"), Some("viz-node-group neuron pulse pulse"));
    assert_eq!(group.attr("style"), Some("--speed: 3; "));
}

#[test]
fn test_distinct_animations_combine_on_one_node() {
    let mut animations = AnimationRegistry::default();
    animations.register_node("pulse", Pulse).register_node("glow", Glow);

    let scene = SceneBuilder::new()
        .node("n")
        .add_class("neuron")
        .add_animation("pulse", json!({"speed": 1.0}))
        .add_animation("glow", json!(null))
        .build();
    let tree = bind(&scene, &animations, &OverlayRegistry::default());

    let group = &layer(&tree, "nodes").children()[0];
    assert!(group.has_class("pulse"));
    assert!(group.has_class("glow"));
    assert_eq!(group.attr("class"), Some("viz-node-group neuron pulse glow"));
    assert_eq!(group.attr("style"), Some("--speed: 4; --glow-color: gold; "));
}

#[test]
fn test_flow_animation_on_edge() {
    let scene = SceneBuilder::new()
        .node("a")
        .node("b")
        .edge("a", "b", None)
        .add_class("connection")
        .add_animation("flow", json!({}))
        .build();
    let tree = bind(&scene, &AnimationRegistry::default(), &OverlayRegistry::default());

    let group = &layer(&tree, "edges").children()[0];
    assert_eq!(group.attr("class"), Some("viz-edge-group connection viz-anim-flow"));
    assert_eq!(group.attr("style"), Some("--viz-anim-duration: 2s; "));
}

#[test]
fn test_custom_overlay_registry() {
    let mut overlays = OverlayRegistry::new();
    overlays.register("caption", Caption);

    let scene = SceneBuilder::new()
        .overlay("caption", json!({"text": "Pass 1"}), None)
        .overlay("signal", json!({"from": "a", "to": "b", "progress": 0.5}), None)
        .build();
    let tree = bind(&scene, &AnimationRegistry::new(), &overlays);

    let children = layer(&tree, "overlays").children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].kind(), ElementKind::Text);
    assert_eq!(children[0].text_content(), Some("Pass 1"));
}

#[test]
fn test_non_finite_position_is_an_error() {
    let scene = SceneBuilder::new()
        .node("a")
        .set_position(f64::NAN, 0.0)
        .build();
    let animations = AnimationRegistry::default();
    let overlays = OverlayRegistry::default();

    let result = ViewTree::bind(&scene, &Renderer::new(&animations, &overlays));
    assert!(matches!(result, Err(VizError::NonFiniteCoordinate { .. })));
}

#[test]
fn test_overflowing_signal_is_an_error() {
    let scene = SceneBuilder::new()
        .node("a")
        .set_position(0.0, 0.0)
        .node("b")
        .set_position(100.0, 0.0)
        .overlay("signal", json!({"from": "a", "to": "b", "progress": 1e308}), None)
        .build();
    let animations = AnimationRegistry::default();
    let overlays = OverlayRegistry::default();

    let result = ViewTree::bind(&scene, &Renderer::new(&animations, &overlays));
    let Err(VizError::NonFiniteCoordinate { element, what }) = result else {
        panic!("Expected a non-finite coordinate error");
    };
    assert_eq!(element, "overlay `signal`");
    assert_eq!(what, "transform");
}

#[test]
fn test_non_finite_view_box_is_an_error() {
    let mut builder = SceneBuilder::new();
    builder.set_view_box(f64::INFINITY, 600.0);
    builder.set_grid(2, 1, Padding::new(50.0, 50.0));
    builder.overlay("grid-labels", json!({"colLabels": {"0": "Input"}}), None);

    let result = builder.render_svg();
    let Err(VizError::NonFiniteCoordinate { element, what }) = result else {
        panic!("Expected a non-finite coordinate error");
    };
    assert_eq!(element, "scene");
    assert_eq!(what, "view box");
}

#[test]
fn test_click_invokes_handlers() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let node_clicks = Rc::clone(&clicks);
    let edge_clicks = Rc::clone(&clicks);

    let scene = SceneBuilder::new()
        .node("a")
        .set_on_click(move |id, _node| node_clicks.borrow_mut().push(id.to_string()))
        .node("b")
        .edge("a", "b", None)
        .set_on_click(move |id, edge| {
            edge_clicks
                .borrow_mut()
                .push(format!("{id}:{}", edge.to()))
        })
        .build();
    let tree = bind(&scene, &AnimationRegistry::default(), &OverlayRegistry::default());

    let hit = tree.find(ClickTarget::Edge(Id::new("a->b"))).unwrap();
    assert!(hit.has_class("viz-edge-hit"));
    assert_eq!(hit.number("stroke-width"), Some(10.0));

    assert!(tree.click(&ClickTarget::Node(Id::new("a"))));
    assert!(tree.click(&ClickTarget::Edge(Id::new("a->b"))));
    assert!(!tree.click(&ClickTarget::Node(Id::new("b"))));
    assert!(!tree.click(&ClickTarget::Node(Id::new("ghost"))));

    assert_eq!(*clicks.borrow(), ["a", "a->b:b"]);
}

#[test]
fn test_render_svg_document() {
    let mut builder = SceneBuilder::new();
    builder.set_grid(2, 1, Padding::new(50.0, 50.0));
    let svg = builder
        .node("in")
        .set_cell(0.0, 0.0, Align::Center)
        .set_shape_rect(80.0, 40.0, Some(5.0))
        .set_label("x > 0.5?")
        .node("out")
        .set_cell(1.0, 0.0, Align::Center)
        .edge("in", "out", None)
        .set_arrow(true)
        .set_label("Yes")
        .overlay(
            "grid-labels",
            json!({"colLabels": {"0": "Input", "1": "Output"}}),
            Some("labels"),
        )
        .render_svg()
        .unwrap();

    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert!(svg.contains(r#"viewBox="0 0 800 600""#));
    assert!(svg.contains(r#"id="viz-arrow""#));
    assert!(svg.contains(r#"marker-end="url(#viz-arrow)""#));
    assert!(svg.contains("0.5?"));
    assert!(svg.contains("Input"));
    assert!(svg.contains("<style"));
}

#[test]
fn test_render_svg_with_background() {
    let animations = AnimationRegistry::default();
    let overlays = OverlayRegistry::default();
    let renderer = Renderer::new(&animations, &overlays);

    let style = StyleConfig::default().with_background_color("#ffffff");
    let svg = SceneBuilder::new()
        .node("a")
        .done()
        .render_svg_with(&renderer, &style);
    assert!(svg.unwrap().contains("viz-background"));

    let invalid = StyleConfig::default().with_background_color("not a color");
    let result = SceneBuilder::new()
        .node("a")
        .done()
        .render_svg_with(&renderer, &invalid);
    assert!(matches!(result, Err(VizError::Style(_))));
}
