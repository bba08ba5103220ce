//! wgpu render backend for the flyover demo.
//!
//! Renders the generated city as instanced boxes over a street grid, the
//! plane as a box assembly with a spinning propeller, and clouds as white
//! boxes against a sky-colored clear.
//!
//! # Invariants
//! - The renderer never mutates simulation state.
//! - The view camera is fed by the chase rig (or the external viewpoint);
//!   no camera motion originates here.

mod camera;
mod gpu;
mod shaders;

pub use camera::ViewCamera;
pub use gpu::WgpuRenderer;
