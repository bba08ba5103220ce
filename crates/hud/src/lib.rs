//! HUD snapshots: read-only views of the simulation for display layers.
//!
//! The simulation never depends on this crate; data flows one way, once per
//! frame.

pub mod snapshot;

pub use snapshot::{HudSnapshot, KeyIndicator};

pub fn crate_info() -> &'static str {
    "flyover-hud v0.1.0"
}
