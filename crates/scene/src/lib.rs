//! Set-dressing for the flyover demo: a procedurally generated city, drifting
//! clouds, and the box-part assembly of the plane itself.
//!
//! Everything here is plain data for a renderer to consume; no GPU types.
//!
//! # Invariants
//! - Generation is deterministic: the same seed produces an identical scene
//!   on every platform.
//! - Scene data never reaches back into the simulation.

mod rng;

pub mod city;
pub mod plane;
pub mod sky;

pub use city::{City, CityConfig, Instance};
pub use plane::{PlaneModel, PlanePart, SPAWN_ALTITUDE};
pub use sky::{Cloud, Clouds, SKY_HORIZON, SKY_TOP};

pub fn crate_info() -> &'static str {
    "flyover-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
