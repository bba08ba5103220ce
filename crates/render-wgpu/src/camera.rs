use flyover_camera::CameraPose;
use glam::{Mat4, Vec3};

/// Look-at view camera with projection parameters.
///
/// Holds whatever pose the active camera mode computed this frame; it has no
/// motion model of its own.
pub struct ViewCamera {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(15.0, 15.0, 30.0),
            look_at: Vec3::ZERO,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl ViewCamera {
    /// Adopt the pose the chase rig (or external mode) computed.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.eye = pose.eye;
        self.look_at = pose.look_at;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_at, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_produces_valid_matrix() {
        let cam = ViewCamera::default();
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn set_pose_moves_the_view() {
        let mut cam = ViewCamera::default();
        let before = cam.view_matrix();
        cam.set_pose(CameraPose {
            eye: Vec3::new(0.0, 2.0, -9.0),
            look_at: Vec3::new(0.0, 0.0, 10.0),
        });
        assert_ne!(cam.view_matrix(), before);
        assert_eq!(cam.eye, Vec3::new(0.0, 2.0, -9.0));
    }
}
