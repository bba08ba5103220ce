//! Shared types for the flyover demo.
//!
//! # Invariants
//! - `Transform::rotation` is kept unit-length by its producers.
//! - This crate holds plain data only; no per-frame logic lives here.

pub mod types;

pub use types::Transform;
