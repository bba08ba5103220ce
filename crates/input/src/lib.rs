//! Flight controls: named controls and the boolean held-state the simulation
//! polls once per frame.
//!
//! # Invariants
//! - The simulation reads `ControlState` and never mutates it.
//! - Host key mapping happens outside this crate; unrecognized keys never
//!   produce a `Control`.

pub mod control;

pub use control::{Control, ControlState};

pub fn crate_info() -> &'static str {
    "flyover-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
