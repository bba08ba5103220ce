//! Chase camera: follows a target transform with smoothed lag, placed behind
//! and above it with a pitch-dependent bias.
//!
//! # Invariants
//! - Smoothed values converge geometrically toward desired values; they snap
//!   only on the first update after construction or `reset()`.
//! - The camera never mutates the target; data flows one way.
//! - A missing target is a no-op, not an error.

pub mod chase;

pub use chase::{CameraMode, CameraPose, ChaseCamera, ChaseConfig};

pub fn crate_info() -> &'static str {
    "flyover-camera v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("camera"));
    }
}
