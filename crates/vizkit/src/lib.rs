//! Vizkit - A scene builder and renderer for step-by-step visualizations.
//!
//! Models describe each frame as a [`Scene`](scene::Scene) of nodes, edges and
//! overlays through the fluent [`SceneBuilder`]. Nodes may be placed in
//! absolute coordinates or in cells of a uniform grid. Animations and overlays
//! are open sets: each kind is resolved through an [`animation::AnimationRegistry`]
//! or an [`overlay::OverlayRegistry`], so models can add their own without
//! touching the renderer.
//!
//! Rendering happens in two steps. The [`render::Renderer`] turns a scene into
//! a retained [`view::ViewTree`] whose elements carry click targets, and the
//! [`export::SvgExporter`] serializes a view tree into SVG markup.
//!
//! # Example
//!
//! ```
//! use vizkit::{SceneBuilder, geometry::Padding, grid::Align};
//! use serde_json::json;
//!
//! let mut builder = SceneBuilder::new();
//! builder.set_grid(3, 1, Padding::new(50.0, 50.0));
//!
//! let svg = builder
//!     .node("a")
//!     .set_cell(0.0, 0.0, Align::Center)
//!     .set_label("A")
//!     .node("b")
//!     .set_cell(2.0, 0.0, Align::Center)
//!     .edge("a", "b", None)
//!     .set_arrow(true)
//!     .add_animation("flow", json!({"duration": "1s"}))
//!     .overlay("signal", json!({"from": "a", "to": "b", "progress": 0.5}), None)
//!     .render_svg()
//!     .unwrap();
//!
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains(r#"class="viz-edge-group viz-anim-flow""#));
//! ```

pub mod animation;
pub mod builder;
pub mod config;
pub mod export;
pub mod overlay;
pub mod render;
pub mod view;

mod error;

pub use vizkit_core::{color, draw, geometry, grid, identifier, scene};

pub use builder::{EdgeBuilder, NodeBuilder, SceneBuilder};
pub use error::VizError;
