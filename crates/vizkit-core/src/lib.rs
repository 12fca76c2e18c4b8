//! Vizkit Core Types and Definitions
//!
//! This crate provides the foundational types shared by every vizkit scene.
//! It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes and the view box ([`geometry`] module)
//! - **Grid**: Grid layout resolution from cells to pixels ([`grid`] module)
//! - **Scene**: The immutable scene model of nodes, edges and overlays ([`scene`] module)
//! - **Draw**: Retained view elements grouped by render layer ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod grid;
pub mod identifier;
pub mod scene;
