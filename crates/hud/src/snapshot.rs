use flyover_camera::CameraMode;
use flyover_flight::{Aircraft, FlightConfig};
use flyover_input::{Control, ControlState};

/// One key indicator: HUD label plus held state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyIndicator {
    pub control: Control,
    pub label: &'static str,
    pub held: bool,
}

/// Per-frame snapshot of everything the display layers show.
#[derive(Debug, Clone)]
pub struct HudSnapshot {
    pub speed: f32,
    /// Speed as a floored percentage of maximum, 0..=100.
    pub speed_percent: u32,
    pub keys: [KeyIndicator; Control::ALL.len()],
    pub camera_mode: CameraMode,
}

impl HudSnapshot {
    /// Capture the current frame's display state.
    pub fn capture(
        aircraft: &Aircraft,
        config: &FlightConfig,
        controls: &ControlState,
        camera_mode: CameraMode,
    ) -> Self {
        let speed_percent = ((aircraft.speed / config.max_speed) * 100.0).floor() as u32;
        let keys = Control::ALL.map(|control| KeyIndicator {
            control,
            label: control.label(),
            held: controls.is_held(control),
        });
        Self {
            speed: aircraft.speed,
            speed_percent,
            keys,
            camera_mode,
        }
    }
}

impl std::fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "speed={:.3} ({}%) camera={}",
            self.speed,
            self.speed_percent,
            self.camera_mode.label()
        )?;
        write!(f, " keys=[")?;
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if key.held {
                write!(f, "{}", key.label)?;
            } else {
                write!(f, "·")?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyover_flight::FlightModel;

    #[test]
    fn percentage_floors() {
        let model = FlightModel::default();
        let mut aircraft = Aircraft::new(&model.config);
        aircraft.speed = 0.333; // 66.6% of 0.5

        let snap = HudSnapshot::capture(
            &aircraft,
            &model.config,
            &ControlState::new(),
            CameraMode::Follow,
        );
        assert_eq!(snap.speed_percent, 66);
    }

    #[test]
    fn min_speed_is_ten_percent_of_default_max() {
        let model = FlightModel::default();
        let aircraft = Aircraft::new(&model.config);
        let snap = HudSnapshot::capture(
            &aircraft,
            &model.config,
            &ControlState::new(),
            CameraMode::Follow,
        );
        assert_eq!(snap.speed_percent, 10);
    }

    #[test]
    fn key_indicators_mirror_control_state() {
        let model = FlightModel::default();
        let aircraft = Aircraft::new(&model.config);
        let mut controls = ControlState::new();
        controls.press(Control::ThrottleUp);

        let snap =
            HudSnapshot::capture(&aircraft, &model.config, &controls, CameraMode::External);

        for key in &snap.keys {
            assert_eq!(key.held, key.control == Control::ThrottleUp);
        }
        assert_eq!(snap.camera_mode, CameraMode::External);
    }

    #[test]
    fn display_is_stable() {
        let model = FlightModel::default();
        let aircraft = Aircraft::new(&model.config);
        let snap = HudSnapshot::capture(
            &aircraft,
            &model.config,
            &ControlState::new(),
            CameraMode::Follow,
        );
        let text = snap.to_string();
        assert!(text.contains("speed=0.050"));
        assert!(text.contains("(10%)"));
        assert!(text.contains("FOLLOW MODE"));
    }
}
