use serde::{Deserialize, Serialize};

/// A named flight control.
///
/// The windowing layer maps physical keys to these; the simulation only ever
/// sees the named control, never a key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    PitchDown,
    PitchUp,
    YawLeft,
    YawRight,
    ThrottleUp,
    ThrottleDown,
    CameraToggle,
}

impl Control {
    /// All controls, in HUD display order.
    pub const ALL: [Control; 7] = [
        Control::PitchDown,
        Control::PitchUp,
        Control::YawLeft,
        Control::YawRight,
        Control::ThrottleUp,
        Control::ThrottleDown,
        Control::CameraToggle,
    ];

    /// Short label for HUD key indicators.
    pub fn label(self) -> &'static str {
        match self {
            Control::PitchDown => "W",
            Control::PitchUp => "S",
            Control::YawLeft => "A",
            Control::YawRight => "D",
            Control::ThrottleUp => "Q",
            Control::ThrottleDown => "E",
            Control::CameraToggle => "C",
        }
    }

    fn index(self) -> usize {
        match self {
            Control::PitchDown => 0,
            Control::PitchUp => 1,
            Control::YawLeft => 2,
            Control::YawRight => 3,
            Control::ThrottleUp => 4,
            Control::ThrottleDown => 5,
            Control::CameraToggle => 6,
        }
    }
}

/// Held-state for every control.
///
/// Mutated by discrete press/release events from the host event loop, read
/// once per frame by the simulation. Single boolean writes; no torn reads are
/// possible under the single-threaded frame loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    held: [bool; Control::ALL.len()],
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a control as held.
    pub fn press(&mut self, control: Control) {
        self.held[control.index()] = true;
        tracing::trace!(?control, "control pressed");
    }

    /// Mark a control as released.
    pub fn release(&mut self, control: Control) {
        self.held[control.index()] = false;
        tracing::trace!(?control, "control released");
    }

    /// Whether a control is currently held.
    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    /// Release everything (used when the window loses focus).
    pub fn clear(&mut self) {
        self.held = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_all_released() {
        let s = ControlState::new();
        for c in Control::ALL {
            assert!(!s.is_held(c));
        }
    }

    #[test]
    fn press_and_release() {
        let mut s = ControlState::new();
        s.press(Control::ThrottleUp);
        assert!(s.is_held(Control::ThrottleUp));
        assert!(!s.is_held(Control::ThrottleDown));

        s.release(Control::ThrottleUp);
        assert!(!s.is_held(Control::ThrottleUp));
    }

    #[test]
    fn press_is_idempotent() {
        let mut s = ControlState::new();
        s.press(Control::YawLeft);
        s.press(Control::YawLeft);
        assert!(s.is_held(Control::YawLeft));
        s.release(Control::YawLeft);
        assert!(!s.is_held(Control::YawLeft));
    }

    #[test]
    fn clear_releases_everything() {
        let mut s = ControlState::new();
        for c in Control::ALL {
            s.press(c);
        }
        s.clear();
        for c in Control::ALL {
            assert!(!s.is_held(c));
        }
    }

    #[test]
    fn labels_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for c in Control::ALL {
            assert!(seen.insert(c.label()));
        }
    }
}
