use flyover_common::Transform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which camera is driving the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    /// Chase camera tracking the aircraft.
    Follow,
    /// Static external viewpoint.
    External,
}

impl CameraMode {
    pub fn name(self) -> &'static str {
        match self {
            CameraMode::Follow => "follow",
            CameraMode::External => "external",
        }
    }

    /// HUD display text.
    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Follow => "FOLLOW MODE",
            CameraMode::External => "EXTERNAL VIEW",
        }
    }
}

/// Tuning for the chase rig.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaseConfig {
    /// Closest the desired position gets to the target.
    pub min_distance: f32,
    /// Furthest the desired position gets from the target.
    pub max_distance: f32,
    /// Base height above the target, before the pitch bias.
    pub height_offset: f32,
    /// Base factor for position smoothing; scaled by `dt * 60` each frame.
    pub damping: f32,
    /// Base factor for look-at smoothing; independently configurable.
    pub rotation_damping: f32,
    /// How far ahead of the target the camera gazes.
    pub look_ahead: f32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            min_distance: 6.0,
            max_distance: 12.0,
            height_offset: 2.0,
            damping: 0.05,
            rotation_damping: 0.08,
            look_ahead: 10.0,
        }
    }
}

/// Final camera placement for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub look_at: Vec3,
}

/// Chase camera rig.
///
/// Each update computes a desired eye and look-at from the target's
/// transform, then moves smoothed copies toward them. A zero-length smoothed
/// value means "uninitialized": the next update snaps instead of lerping,
/// which is also how mode switches avoid a visible jump (`reset()` re-arms
/// the snap).
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    pub config: ChaseConfig,
    current_position: Vec3,
    current_look_at: Vec3,
}

impl ChaseCamera {
    pub fn new(config: ChaseConfig) -> Self {
        Self {
            config,
            current_position: Vec3::ZERO,
            current_look_at: Vec3::ZERO,
        }
    }

    /// Advance the rig toward the target's current transform.
    ///
    /// `None` leaves the rig untouched. The smoothing factors
    /// `damping * dt * 60` are not clamped to `[0, 1]`; a hot config
    /// overshoots the desired point rather than snapping onto it.
    pub fn update(&mut self, target: Option<&Transform>, dt: f32) {
        let Some(target) = target else {
            return;
        };

        let forward = target.rotation * Vec3::Z;
        let backward = target.rotation * Vec3::NEG_Z;

        // Placement bias only; the target's real orientation is untouched.
        let pitch = forward.y.clamp(-1.0, 1.0).asin();

        // Linear in pitch, then clamped: the raw formula can escape its own
        // bounds at extreme pitch.
        let raw_distance = self.config.min_distance
            + (self.config.max_distance - self.config.min_distance) * (0.5 - pitch);
        let distance = raw_distance.clamp(self.config.min_distance, self.config.max_distance);
        let height = self.config.height_offset - pitch * 3.0;

        let desired = target.position + backward * distance + Vec3::Y * height;
        let look_at = target.position + forward * self.config.look_ahead;

        if self.current_position.length_squared() == 0.0 {
            self.current_position = desired;
        } else {
            self.current_position = self
                .current_position
                .lerp(desired, self.config.damping * dt * 60.0);
        }

        if self.current_look_at.length_squared() == 0.0 {
            self.current_look_at = look_at;
        } else {
            self.current_look_at = self
                .current_look_at
                .lerp(look_at, self.config.rotation_damping * dt * 60.0);
        }

        tracing::trace!(eye = ?self.current_position, "chase camera updated");
    }

    /// Current smoothed placement.
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.current_position,
            look_at: self.current_look_at,
        }
    }

    /// Zero the smoothed values so the next update snaps to the desired
    /// placement. Called when re-entering follow mode.
    pub fn reset(&mut self) {
        self.current_position = Vec3::ZERO;
        self.current_look_at = Vec3::ZERO;
    }
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self::new(ChaseConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn first_update_snaps_to_desired_placement() {
        let mut rig = ChaseCamera::default();
        let target = Transform::default();

        rig.update(Some(&target), 1.0 / 60.0);

        // Level target at origin: 6 + (12-6)*0.5 = 9 back, 2 up, gaze 10 ahead.
        assert_eq!(rig.pose().eye, Vec3::new(0.0, 2.0, -9.0));
        assert_eq!(rig.pose().look_at, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn missing_target_is_a_noop() {
        let mut rig = ChaseCamera::default();
        rig.update(Some(&Transform::default()), 1.0 / 60.0);
        let before = rig.pose();

        rig.update(None, 1.0 / 60.0);

        assert_eq!(rig.pose(), before);
    }

    #[test]
    fn smoothing_converges_geometrically() {
        let mut rig = ChaseCamera::default();
        let mut target = Transform::default();
        rig.update(Some(&target), 1.0 / 60.0);

        target.position = Vec3::new(20.0, 0.0, 0.0);
        let desired = Vec3::new(20.0, 2.0, -9.0);

        let mut last_gap = (rig.pose().eye - desired).length();
        for _ in 0..50 {
            rig.update(Some(&target), 1.0 / 60.0);
            let gap = (rig.pose().eye - desired).length();
            assert!(gap < last_gap);
            last_gap = gap;
        }
        assert!(last_gap < 2.0);
    }

    #[test]
    fn reset_rearms_the_snap() {
        let mut rig = ChaseCamera::default();
        let target = Transform::default();
        rig.update(Some(&target), 1.0 / 60.0);

        let far = Transform::from_position(Vec3::new(100.0, 50.0, 100.0));
        rig.reset();
        rig.update(Some(&far), 1.0 / 60.0);

        assert_eq!(rig.pose().eye, far.position + Vec3::new(0.0, 2.0, -9.0));
    }

    #[test]
    fn pitch_bias_follows_the_linear_formulas() {
        // Nose-up target: forward gains +Y, so (0.5 - pitch) shrinks the
        // distance and the height drops below the base offset.
        let mut level = ChaseCamera::default();
        let mut climbing = ChaseCamera::default();

        let target_level = Transform::default();
        let target_up = Transform {
            rotation: Quat::from_rotation_x(-0.4),
            ..Transform::default()
        };

        level.update(Some(&target_level), 1.0 / 60.0);
        climbing.update(Some(&target_up), 1.0 / 60.0);

        let level_dist = (level.pose().eye - target_level.position).length();
        let climb_dist = (climbing.pose().eye - target_up.position).length();
        assert!(climb_dist < level_dist);
        assert!(climbing.pose().eye.y < level.pose().eye.y);
    }

    #[test]
    fn extreme_pitch_keeps_distance_within_bounds() {
        let mut rig = ChaseCamera::default();
        for angle in [-1.5f32, -1.0, -0.5, 0.5, 1.0, 1.5] {
            rig.reset();
            let target = Transform {
                rotation: Quat::from_rotation_x(angle),
                ..Transform::default()
            };
            rig.update(Some(&target), 1.0 / 60.0);

            // Strip the height term, then measure along the backward axis.
            let forward = target.rotation * Vec3::Z;
            let pitch = forward.y.clamp(-1.0, 1.0).asin();
            let height = rig.config.height_offset - pitch * 3.0;
            let backward = target.rotation * Vec3::NEG_Z;
            let along = (rig.pose().eye - target.position - Vec3::Y * height).dot(backward);
            assert!(along >= rig.config.min_distance - 1e-4);
            assert!(along <= rig.config.max_distance + 1e-4);
        }
    }

    #[test]
    fn hot_damping_overshoots_the_desired_point() {
        // damping 0.3 at dt = 0.1 gives a lerp factor of 1.8.
        let config = ChaseConfig {
            damping: 0.3,
            ..ChaseConfig::default()
        };
        let mut rig = ChaseCamera::new(config);
        let mut target = Transform::default();
        rig.update(Some(&target), 0.1);

        target.position.z += 1.0;
        rig.update(Some(&target), 0.1);

        // Desired eye moved to z = -8; an unclamped factor lands past it.
        assert!(rig.pose().eye.z > -8.0);
    }

    #[test]
    fn mode_names() {
        assert_eq!(CameraMode::Follow.name(), "follow");
        assert_eq!(CameraMode::External.label(), "EXTERNAL VIEW");
    }
}
