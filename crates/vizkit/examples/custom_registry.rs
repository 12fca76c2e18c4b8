//! Example: Rendering a scene with custom animation and overlay kinds
//!
//! This example builds a small pipeline diagram on a grid, registers a
//! `blink` animation and a `caption` overlay next to the built-in kinds, and
//! prints the resulting SVG document.

use vizkit::{
    SceneBuilder,
    animation::{AnimationContext, AnimationRegistry, AnimationRenderer, StyleValue},
    config::StyleConfig,
    draw::ViewElement,
    geometry::Padding,
    grid::Align,
    overlay::{OverlayContext, OverlayRegistry, OverlayRenderer},
    render::Renderer,
};

/// Adds a `blink` class and reads the blink period from the params.
struct Blink;

impl AnimationRenderer for Blink {
    fn class(&self, _ctx: &AnimationContext<'_>) -> Option<String> {
        Some("blink".to_string())
    }

    fn style(&self, ctx: &AnimationContext<'_>) -> Vec<(String, StyleValue)> {
        let period = ctx.tag.params()["period"].as_f64().unwrap_or(1.0);
        vec![("--blink-period".to_string(), StyleValue::from(period))]
    }
}

/// Draws a single line of text in the top left corner.
struct Caption;

impl OverlayRenderer for Caption {
    fn render(&self, ctx: &OverlayContext<'_>) -> Vec<ViewElement> {
        let text = ctx.spec.params()["text"].as_str().unwrap_or_default();
        vec![
            ViewElement::text(text)
                .set("x", 10)
                .set("y", 20)
                .set("class", ctx.class_or("caption")),
        ]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = SceneBuilder::new();
    builder.set_grid(3, 1, Padding::new(60.0, 60.0));

    builder
        .node("read")
        .set_cell(0.0, 0.0, Align::Center)
        .set_shape_rect(90.0, 40.0, Some(6.0))
        .set_label("Read")
        .node("transform")
        .set_cell(1.0, 0.0, Align::Center)
        .set_shape_diamond(80.0, 60.0)
        .set_label("Transform")
        .add_animation("blink", serde_json::json!({ "period": 0.8 }))
        .node("write")
        .set_cell(2.0, 0.0, Align::Center)
        .set_shape_circle(25.0)
        .set_label("Write")
        .edge("read", "transform", None)
        .set_arrow(true)
        .add_animation("flow", serde_json::json!({ "duration": "1.5s" }))
        .edge("transform", "write", None)
        .set_arrow(true)
        .overlay("caption", serde_json::json!({ "text": "ETL pipeline" }), None);

    let mut animations = AnimationRegistry::default();
    animations.register_node("blink", Blink);

    let mut overlays = OverlayRegistry::default();
    overlays.register("caption", Caption);

    let renderer = Renderer::new(&animations, &overlays);
    let style = StyleConfig::default().with_background_color("white");
    let svg = builder.render_svg_with(&renderer, &style)?;

    println!("{svg}");
    Ok(())
}
