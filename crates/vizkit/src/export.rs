//! Markup export.
//!
//! The SVG backend serializes a bound [`ViewTree`](crate::view::ViewTree)
//! into a self-contained document with the `svg` crate. The document carries
//! the scene's view box, the default stylesheet, the arrow marker
//! definitions that `viz-edge` lines reference, and an optional background.
//!
//! # Pipeline Position
//!
//! ```text
//! SceneBuilder
//!     ↓ build
//! Scene
//!     ↓ Renderer::layers
//! LayeredOutput
//!     ↓ ViewTree::bind
//! ViewTree ──→ GUI binding
//!     ↓ export (this module)
//! SVG markup
//! ```

mod stylesheet;
mod svg;

pub use self::{stylesheet::DEFAULT_STYLESHEET, svg::SvgExporter};
