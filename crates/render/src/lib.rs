//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers cannot mutate simulation state.
//! - Render state derives from the scene, the aircraft, and a view.
//!
//! The debug text renderer keeps the CLI and tests free of any GPU
//! dependency; the wgpu backend lives in its own crate behind the same trait.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "flyover-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
