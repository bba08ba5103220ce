//! Flight kernel: converts held controls into smoothed orientation, position,
//! and speed, once per rendered frame.
//!
//! # Invariants
//! - `update` is the only mutation path for aircraft state.
//! - Speed stays within `[min_speed, max_speed]` after every update.
//! - Bank angle stays within `[-bank_limit, bank_limit]` and returns to
//!   exactly zero when no yaw control is held.
//! - Incremental rotations compose in the fixed order pitch, yaw, roll.

pub mod model;

pub use model::{Aircraft, FlightConfig, FlightModel};
