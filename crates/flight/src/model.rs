use flyover_common::Transform;
use flyover_input::{Control, ControlState};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Tuning for the flight kernel. Defaults are the values the demo ships with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightConfig {
    pub max_speed: f32,
    pub min_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// Per-frame incremental rotation about the local lateral axis.
    pub pitch_rate: f32,
    /// Per-frame incremental rotation about the local vertical axis.
    pub yaw_rate: f32,
    /// Per-frame incremental rotation about the local longitudinal axis.
    pub roll_rate: f32,
    /// Leveling roll impulse applied while no yaw control is held.
    pub auto_level_rate: f32,
    /// Bank angle change per frame of held yaw input.
    pub bank_increment: f32,
    /// Bank angle clamp, radians.
    pub bank_limit: f32,
    /// Below this magnitude the bank angle snaps to exactly zero.
    pub bank_epsilon: f32,
    /// Base factor for the orientation slerp; scaled by `dt * 60` each frame.
    pub rotation_smoothing: f32,
    /// Upper clamp on the per-frame delta time, absorbing stalled frames.
    pub max_delta_time: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            max_speed: 0.5,
            min_speed: 0.05,
            acceleration: 0.01,
            deceleration: 0.005,
            pitch_rate: 0.03,
            yaw_rate: 0.02,
            roll_rate: 0.04,
            auto_level_rate: 0.02,
            bank_increment: 0.05,
            bank_limit: std::f32::consts::FRAC_PI_4,
            bank_epsilon: 0.01,
            rotation_smoothing: 0.1,
            max_delta_time: 0.1,
        }
    }
}

/// The flyable body: world transform plus the scalar state the kernel owns.
///
/// `bank_angle` is transient turn state used only to shape roll; it is
/// re-derived each frame from its own previous value and the current yaw
/// input, never from the persisted orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aircraft {
    pub transform: Transform,
    pub speed: f32,
    pub bank_angle: f32,
    /// Cosmetic propeller rotation, radians. Consumed by the renderer.
    pub propeller_angle: f32,
}

impl Aircraft {
    /// Aircraft at the identity transform, flying at minimum speed.
    pub fn new(config: &FlightConfig) -> Self {
        Self {
            transform: Transform::default(),
            speed: config.min_speed,
            bank_angle: 0.0,
            propeller_angle: 0.0,
        }
    }

    /// Aircraft spawned at a position, flying at minimum speed.
    pub fn at_position(config: &FlightConfig, position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            ..Self::new(config)
        }
    }
}

/// Per-frame flight update.
///
/// Consumes held control flags and a delta time, and mutates the aircraft in
/// place: orientation (incremental pitch/yaw/roll composed onto the previous
/// orientation, then slerped), speed (throttle ramp with idle decay), and
/// position (forward translation).
#[derive(Debug, Clone, Default)]
pub struct FlightModel {
    pub config: FlightConfig,
}

impl FlightModel {
    pub fn new(config: FlightConfig) -> Self {
        Self { config }
    }

    /// Advance the aircraft by one frame.
    ///
    /// `dt` is clamped into `[0, max_delta_time]`; a stalled frame produces a
    /// bounded step instead of a jump. The orientation blend factor
    /// `rotation_smoothing * dt * 60` is deliberately not clamped to `[0, 1]`:
    /// with the default config it stays below one for any clamped `dt`, and a
    /// hotter config overshoots rather than snapping.
    pub fn update(&self, aircraft: &mut Aircraft, controls: &ControlState, dt: f32) {
        let dt = dt.clamp(0.0, self.config.max_delta_time);

        let target = self.compose_rotation(aircraft, controls);
        let blend = self.config.rotation_smoothing * dt * 60.0;
        aircraft.transform.rotation = aircraft.transform.rotation.slerp(target, blend);

        self.update_speed(aircraft, controls, dt);
        self.update_position(aircraft, dt);
    }

    /// Build the target orientation from this frame's control flags.
    ///
    /// Pitch is first-match-wins (pitch-down shadows pitch-up); yaw is a
    /// coordinated bank (roll and yaw together, with the bank angle tracking
    /// the turn); with no yaw held the bank auto-levels. The three
    /// incremental rotations compose onto the previous orientation in the
    /// fixed order pitch, yaw, roll.
    fn compose_rotation(&self, aircraft: &mut Aircraft, controls: &ControlState) -> Quat {
        let cfg = &self.config;

        let pitch_q = if controls.is_held(Control::PitchDown) {
            Quat::from_rotation_x(cfg.pitch_rate)
        } else if controls.is_held(Control::PitchUp) {
            Quat::from_rotation_x(-cfg.pitch_rate)
        } else {
            Quat::IDENTITY
        };

        let mut yaw_q = Quat::IDENTITY;
        let mut roll_q = Quat::IDENTITY;

        if controls.is_held(Control::YawLeft) {
            roll_q = Quat::from_rotation_z(-cfg.roll_rate);
            yaw_q = Quat::from_rotation_y(cfg.yaw_rate);
            aircraft.bank_angle = (aircraft.bank_angle - cfg.bank_increment).max(-cfg.bank_limit);
        } else if controls.is_held(Control::YawRight) {
            roll_q = Quat::from_rotation_z(cfg.roll_rate);
            yaw_q = Quat::from_rotation_y(-cfg.yaw_rate);
            aircraft.bank_angle = (aircraft.bank_angle + cfg.bank_increment).min(cfg.bank_limit);
        } else if aircraft.bank_angle.abs() > cfg.bank_epsilon {
            // Auto-level. The impulse is capped at the remaining bank so the
            // decay is monotonic and never swings past level.
            let magnitude = cfg.auto_level_rate.min(aircraft.bank_angle.abs());
            let impulse = -aircraft.bank_angle.signum() * magnitude;
            aircraft.bank_angle += impulse;
            roll_q = Quat::from_rotation_z(impulse);
        } else {
            aircraft.bank_angle = 0.0;
        }

        aircraft.transform.rotation * pitch_q * yaw_q * roll_q
    }

    /// Throttle ramp. Up and down are independent checks and can both apply
    /// in the same frame; idle decays toward minimum at half the
    /// deceleration rate.
    fn update_speed(&self, aircraft: &mut Aircraft, controls: &ControlState, dt: f32) {
        let cfg = &self.config;
        let scaled = dt * 60.0;

        let up = controls.is_held(Control::ThrottleUp);
        let down = controls.is_held(Control::ThrottleDown);

        if up {
            aircraft.speed = (aircraft.speed + cfg.acceleration * scaled).min(cfg.max_speed);
            tracing::trace!(speed = aircraft.speed, "throttle up");
        }
        if down {
            aircraft.speed = (aircraft.speed - cfg.deceleration * scaled).max(cfg.min_speed);
            tracing::trace!(speed = aircraft.speed, "throttle down");
        }
        if !up && !down {
            if aircraft.speed > cfg.min_speed {
                aircraft.speed =
                    (aircraft.speed - cfg.deceleration * 0.5 * scaled).max(cfg.min_speed);
            } else {
                aircraft.speed = cfg.min_speed;
            }
        }

        // Propeller spin is per frame, not per second: it tracks apparent
        // speed, not simulation time.
        aircraft.propeller_angle += 0.2 + (aircraft.speed / cfg.max_speed) * 0.8;
    }

    /// Translate along the current forward vector.
    fn update_position(&self, aircraft: &mut Aircraft, dt: f32) {
        let forward = aircraft.transform.forward().normalize();
        aircraft.transform.position += forward * (aircraft.speed * dt * 60.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 60.0;

    fn held(controls: &[Control]) -> ControlState {
        let mut s = ControlState::new();
        for &c in controls {
            s.press(c);
        }
        s
    }

    #[test]
    fn speed_stays_bounded_for_any_valid_dt() {
        let model = FlightModel::default();
        let combos: [&[Control]; 4] = [
            &[],
            &[Control::ThrottleUp],
            &[Control::ThrottleDown],
            &[Control::ThrottleUp, Control::ThrottleDown],
        ];
        for dt in [0.001, STEP, 0.05, 0.1] {
            for combo in combos {
                let mut aircraft = Aircraft::new(&model.config);
                let controls = held(combo);
                for _ in 0..500 {
                    model.update(&mut aircraft, &controls, dt);
                    assert!(aircraft.speed >= model.config.min_speed);
                    assert!(aircraft.speed <= model.config.max_speed);
                }
            }
        }
    }

    #[test]
    fn throttle_up_converges_to_exactly_max_within_a_second() {
        let model = FlightModel::default();
        let mut aircraft = Aircraft::new(&model.config);
        let controls = held(&[Control::ThrottleUp]);

        // 0.01 per 1/60 s step from 0.05: 45 steps to reach 0.5.
        for _ in 0..60 {
            model.update(&mut aircraft, &controls, STEP);
        }
        assert_eq!(aircraft.speed, model.config.max_speed);
    }

    #[test]
    fn throttle_down_converges_to_exactly_min() {
        let model = FlightModel::default();
        let mut aircraft = Aircraft::new(&model.config);
        aircraft.speed = model.config.max_speed;
        let controls = held(&[Control::ThrottleDown]);

        for _ in 0..120 {
            model.update(&mut aircraft, &controls, STEP);
        }
        assert_eq!(aircraft.speed, model.config.min_speed);
    }

    #[test]
    fn idle_decays_at_half_rate_and_floors_at_min() {
        let model = FlightModel::default();
        let mut aircraft = Aircraft::new(&model.config);
        aircraft.speed = model.config.max_speed;
        let controls = ControlState::new();

        model.update(&mut aircraft, &controls, STEP);
        let expected = model.config.max_speed - model.config.deceleration * 0.5;
        assert!((aircraft.speed - expected).abs() < 1e-6);

        for _ in 0..500 {
            model.update(&mut aircraft, &controls, STEP);
        }
        assert_eq!(aircraft.speed, model.config.min_speed);
    }

    // Opposite throttle inputs are additive, unlike pitch. Locked in on
    // purpose: the two components resolve simultaneous opposites differently.
    #[test]
    fn both_throttles_apply_in_the_same_frame() {
        let model = FlightModel::default();
        let mut aircraft = Aircraft::new(&model.config);
        let controls = held(&[Control::ThrottleUp, Control::ThrottleDown]);

        model.update(&mut aircraft, &controls, STEP);
        let net = model.config.acceleration - model.config.deceleration;
        assert!((aircraft.speed - (model.config.min_speed + net)).abs() < 1e-6);
    }

    #[test]
    fn pitch_down_shadows_pitch_up() {
        let model = FlightModel::default();
        let controls_both = held(&[Control::PitchDown, Control::PitchUp]);
        let controls_down = held(&[Control::PitchDown]);

        let mut a = Aircraft::new(&model.config);
        let mut b = Aircraft::new(&model.config);
        model.update(&mut a, &controls_both, STEP);
        model.update(&mut b, &controls_down, STEP);

        assert_eq!(a.transform.rotation, b.transform.rotation);
    }

    #[test]
    fn bank_angle_clamps_at_limit() {
        let model = FlightModel::default();
        let mut aircraft = Aircraft::new(&model.config);
        let controls = held(&[Control::YawLeft]);

        for _ in 0..100 {
            model.update(&mut aircraft, &controls, STEP);
            assert!(aircraft.bank_angle >= -model.config.bank_limit);
        }
        assert_eq!(aircraft.bank_angle, -model.config.bank_limit);

        let controls = held(&[Control::YawRight]);
        for _ in 0..100 {
            model.update(&mut aircraft, &controls, STEP);
            assert!(aircraft.bank_angle <= model.config.bank_limit);
        }
        assert_eq!(aircraft.bank_angle, model.config.bank_limit);
    }

    #[test]
    fn auto_level_is_monotonic_and_reaches_exactly_zero() {
        let model = FlightModel::default();
        let mut aircraft = Aircraft::new(&model.config);
        aircraft.bank_angle = 0.05;
        let controls = ControlState::new();

        let mut prev = aircraft.bank_angle;
        for _ in 0..20 {
            model.update(&mut aircraft, &controls, STEP);
            // Never crosses zero, never grows.
            assert!(aircraft.bank_angle >= 0.0);
            assert!(aircraft.bank_angle <= prev);
            prev = aircraft.bank_angle;
        }
        assert_eq!(aircraft.bank_angle, 0.0);
    }

    #[test]
    fn rotations_compose_pitch_then_yaw_then_roll() {
        // A blend factor of exactly 1 makes the slerp land on the target, so
        // the composed orientation is directly observable.
        let config = FlightConfig {
            rotation_smoothing: 1.0 / 6.0,
            ..FlightConfig::default()
        };
        let model = FlightModel::new(config);
        let mut aircraft = Aircraft::new(&model.config);
        let controls = held(&[Control::PitchDown, Control::YawLeft]);

        model.update(&mut aircraft, &controls, 0.1);

        let pitch_q = Quat::from_rotation_x(model.config.pitch_rate);
        let yaw_q = Quat::from_rotation_y(model.config.yaw_rate);
        let roll_q = Quat::from_rotation_z(-model.config.roll_rate);
        let expected = Quat::IDENTITY * pitch_q * yaw_q * roll_q;

        assert!(aircraft.transform.rotation.dot(expected).abs() > 1.0 - 1e-6);
    }

    #[test]
    fn oversized_dt_clamps_to_max_delta_time() {
        let model = FlightModel::default();
        let controls = held(&[Control::ThrottleUp, Control::PitchDown]);

        let mut a = Aircraft::new(&model.config);
        let mut b = Aircraft::new(&model.config);
        model.update(&mut a, &controls, 10.0);
        model.update(&mut b, &controls, model.config.max_delta_time);

        assert_eq!(a, b);
    }

    #[test]
    fn negative_dt_is_inert_for_speed_and_position() {
        let model = FlightModel::default();
        let mut aircraft = Aircraft::new(&model.config);
        let start = aircraft.transform.position;
        model.update(&mut aircraft, &ControlState::new(), -1.0);
        assert_eq!(aircraft.transform.position, start);
        assert_eq!(aircraft.speed, model.config.min_speed);
    }

    #[test]
    fn moves_along_forward_axis() {
        let model = FlightModel::default();
        let mut aircraft = Aircraft::new(&model.config);
        let controls = ControlState::new();

        model.update(&mut aircraft, &controls, STEP);

        // Identity orientation: one step of min speed along +Z.
        let expected = model.config.min_speed;
        assert!((aircraft.transform.position.z - expected).abs() < 1e-6);
        assert!(aircraft.transform.position.x.abs() < 1e-6);
        assert!(aircraft.transform.position.y.abs() < 1e-6);
    }

    #[test]
    fn propeller_spins_faster_with_speed() {
        let model = FlightModel::default();
        let controls = ControlState::new();

        let mut slow = Aircraft::new(&model.config);
        let mut fast = Aircraft::new(&model.config);
        fast.speed = model.config.max_speed;

        model.update(&mut slow, &controls, STEP);
        model.update(&mut fast, &controls, STEP);

        assert!(fast.propeller_angle > slow.propeller_angle);
        // Idle floor: spin never stops entirely.
        assert!(slow.propeller_angle >= 0.2);
    }

    #[test]
    fn hot_rotation_smoothing_overshoots_instead_of_snapping() {
        // rotation_smoothing 0.2 at the clamped dt gives a blend of 1.2.
        let config = FlightConfig {
            rotation_smoothing: 0.2,
            ..FlightConfig::default()
        };
        let model = FlightModel::new(config);
        let mut aircraft = Aircraft::new(&model.config);
        let controls = held(&[Control::PitchDown]);

        model.update(&mut aircraft, &controls, 0.1);

        let (_, angle) = aircraft.transform.rotation.to_axis_angle();
        assert!(angle > model.config.pitch_rate + 1e-4);
    }
}
