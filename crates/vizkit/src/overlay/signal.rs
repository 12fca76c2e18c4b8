//! The `"signal"` overlay.

use serde::Deserialize;

use vizkit_core::{draw::ViewElement, identifier::Id};

use super::{OverlayContext, OverlayRenderer};

#[derive(Debug, Deserialize)]
struct SignalParams {
    from: String,
    to: String,
    progress: f64,
    magnitude: Option<f64>,
}

/// A dot travelling along the straight line between two nodes.
///
/// Params: `{ "from": id, "to": id, "progress": 0..1, "magnitude"?: number }`.
/// The dot is placed at `from + (to - from) * progress` with radius
/// `2 + 4 * min(|magnitude|, 1)`, magnitude defaulting to 1. Nothing is
/// rendered when either node is missing; a position that overflows is left to
/// the renderer's coordinate check.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalOverlay;

impl SignalOverlay {
    pub const KIND: &'static str = "signal";
    pub const CLASS: &'static str = "viz-signal";
    const HIT_RADIUS: f64 = 10.0;

    /// Radius of the visible dot for a signal of `magnitude`.
    pub fn radius(magnitude: f64) -> f64 {
        2.0 + 4.0 * magnitude.abs().min(1.0)
    }
}

impl OverlayRenderer for SignalOverlay {
    fn render(&self, ctx: &OverlayContext<'_>) -> Vec<ViewElement> {
        let Some(params) = ctx.params::<SignalParams>() else {
            return Vec::new();
        };

        let (Some(start), Some(end)) = (
            ctx.nodes_by_id.get(&Id::new(&params.from)),
            ctx.nodes_by_id.get(&Id::new(&params.to)),
        ) else {
            return Vec::new();
        };

        let position = start.position().lerp(end.position(), params.progress);
        let radius = Self::radius(params.magnitude.unwrap_or(1.0));

        let dot = ViewElement::group()
            .set("class", ctx.class_or(Self::CLASS))
            .add(
                ViewElement::circle()
                    .set("r", Self::HIT_RADIUS)
                    .set("fill", "transparent")
                    .set("stroke", "none"),
            )
            .add(
                ViewElement::circle()
                    .set("r", radius)
                    .set("class", "viz-signal-shape"),
            );

        vec![
            ViewElement::group()
                .set("transform", format!("translate({}, {})", position.x(), position.y()))
                .add(dot),
        ]
    }
}
