//! The `"grid-labels"` overlay.

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

use vizkit_core::draw::ViewElement;

use super::{OverlayContext, OverlayRenderer};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridLabelsParams {
    #[serde(default)]
    col_labels: IndexMap<String, String>,
    #[serde(default)]
    row_labels: IndexMap<String, String>,
    #[serde(default = "default_offset")]
    x_offset: f64,
    #[serde(default = "default_offset")]
    y_offset: f64,
}

fn default_offset() -> f64 {
    20.0
}

/// Captions for the columns and rows of the scene grid.
///
/// Params: `{ "colLabels"?: {index: text}, "rowLabels"?: {index: text},
/// "xOffset"?: 20, "yOffset"?: 20 }`. Column labels are centered over their
/// cell at `y = yOffset`; row labels sit at `x = xOffset` beside the cell
/// center. Nothing is rendered when the scene has no grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridLabelsOverlay;

impl GridLabelsOverlay {
    pub const KIND: &'static str = "grid-labels";
    pub const CLASS: &'static str = "viz-grid-label";
}

impl OverlayRenderer for GridLabelsOverlay {
    fn render(&self, ctx: &OverlayContext<'_>) -> Vec<ViewElement> {
        let Some(grid) = ctx.scene.grid() else {
            return Vec::new();
        };
        let Some(params) = ctx.params::<GridLabelsParams>() else {
            return Vec::new();
        };

        let view_box = ctx.scene.view_box();
        let class = ctx.class_or(Self::CLASS);
        let mut out = Vec::with_capacity(params.col_labels.len() + params.row_labels.len());

        for (column, text) in &params.col_labels {
            let Some(column) = parse_index(column) else {
                continue;
            };
            let center = grid.cell_center(view_box, column, 0.0);
            out.push(
                ViewElement::text(text.as_str())
                    .set("x", center.x())
                    .set("y", params.y_offset)
                    .set("class", class)
                    .set("text-anchor", "middle"),
            );
        }

        for (row, text) in &params.row_labels {
            let Some(row) = parse_index(row) else {
                continue;
            };
            let center = grid.cell_center(view_box, 0.0, row);
            out.push(
                ViewElement::text(text.as_str())
                    .set("x", params.x_offset)
                    .set("y", center.y())
                    .set("dy", ".35em")
                    .set("class", class)
                    .set("text-anchor", "middle"),
            );
        }

        out
    }
}

fn parse_index(key: &str) -> Option<f64> {
    match key.trim().parse::<u32>() {
        Ok(index) => Some(f64::from(index)),
        Err(err) => {
            warn!(key, err:%; "Skipping grid label with a non-numeric index");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use indexmap::IndexMap;
    use serde_json::json;

    use vizkit_core::{
        geometry::{Padding, ViewBox},
        grid::GridConfig,
        scene::{OverlaySpec, Scene},
    };

    use super::*;

    fn render(grid: Option<GridConfig>, spec: OverlaySpec) -> Vec<ViewElement> {
        let scene = Scene::new(ViewBox::default(), grid, IndexMap::new(), IndexMap::new(), Vec::new());
        GridLabelsOverlay.render(&OverlayContext::new(&spec, &scene))
    }

    fn grid() -> Option<GridConfig> {
        GridConfig::new(4, 2, Padding::new(50.0, 50.0)).ok()
    }

    #[test]
    fn test_column_labels() {
        let out = render(
            grid(),
            OverlaySpec::new(
                "grid-labels",
                json!({"colLabels": {"0": "Input Layer", "3": "Output Layer"}}),
            ),
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text_content(), Some("Input Layer"));
        assert_approx_eq!(f64, out[0].number("x").unwrap(), 137.5, epsilon = 1e-9);
        assert_approx_eq!(f64, out[0].number("y").unwrap(), 20.0, epsilon = 1e-9);
        assert_approx_eq!(f64, out[1].number("x").unwrap(), 662.5, epsilon = 1e-9);
        assert_eq!(out[1].attr("class"), Some("viz-grid-label"));
        assert_eq!(out[1].attr("text-anchor"), Some("middle"));
    }

    #[test]
    fn test_row_labels_with_offsets() {
        let out = render(
            grid(),
            OverlaySpec::new(
                "grid-labels",
                json!({"rowLabels": {"1": "bottom"}, "xOffset": 12, "yOffset": 5}),
            )
            .with_class("caption"),
        );
        assert_eq!(out.len(), 1);
        assert_approx_eq!(f64, out[0].number("x").unwrap(), 12.0, epsilon = 1e-9);
        assert_approx_eq!(f64, out[0].number("y").unwrap(), 425.0, epsilon = 1e-9);
        assert_eq!(out[0].attr("dy"), Some(".35em"));
        assert_eq!(out[0].attr("class"), Some("caption"));
    }

    #[test]
    fn test_no_grid_renders_nothing() {
        let out = render(
            None,
            OverlaySpec::new("grid-labels", json!({"colLabels": {"0": "A"}})),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_non_numeric_index_is_skipped() {
        let out = render(
            grid(),
            OverlaySpec::new("grid-labels", json!({"colLabels": {"first": "A", "1": "B"}})),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text_content(), Some("B"));
    }
}
