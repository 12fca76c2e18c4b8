//! Retained view elements and their render layers.

mod layer;
mod view;

pub use layer::{LayeredOutput, RenderLayer};
pub use view::{ClickTarget, ElementKind, ViewElement};
