//! Default stylesheet inlined into exported documents.

/// CSS for the classes emitted by the renderer and the built-in animations
/// and overlays.
pub const DEFAULT_STYLESHEET: &str = r#"
.viz-canvas { font-family: system-ui, sans-serif; font-size: 12px; color: #334155; }
.viz-edge { stroke-width: 1.5; opacity: 0.6; }
.viz-edge-hit { cursor: pointer; }
.viz-edge-label { font-size: 10px; fill: currentColor; }
.viz-node-shape { fill: #ffffff; stroke: currentColor; stroke-width: 2; }
.viz-node-label { fill: currentColor; }
.viz-anim-flow .viz-edge {
  stroke-dasharray: 6 4;
  animation: viz-flow var(--viz-anim-duration, 2s) linear infinite;
}
@keyframes viz-flow { to { stroke-dashoffset: -20; } }
.viz-signal-shape { fill: #f59e0b; stroke: #b45309; stroke-width: 1; }
.viz-grid-label { font-size: 13px; font-weight: 600; fill: #64748b; }
.viz-data-point { fill: #6366f1; stroke: #ffffff; stroke-width: 1.5; }
"#;
