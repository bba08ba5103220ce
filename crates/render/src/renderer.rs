use flyover_flight::Aircraft;
use flyover_scene::City;
use glam::Vec3;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(15.0, 15.0, 30.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the generated scene, the aircraft, and a view, then
/// produces output. It never mutates simulation state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, city: &City, aircraft: &Aircraft, view: &RenderView) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable description of the frame. Used by the CLI, by
/// logging, and by tests exercising the render interface headlessly.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, city: &City, aircraft: &Aircraft, view: &RenderView) -> String {
        let mut out = String::new();
        let p = aircraft.transform.position;
        out.push_str(&format!(
            "=== Frame (buildings={}, trees={}) ===\n",
            city.buildings.len(),
            city.trees.len()
        ));
        out.push_str(&format!(
            "Aircraft: pos=({:.2}, {:.2}, {:.2}) speed={:.3} bank={:.3}\n",
            p.x, p.y, p.z, aircraft.speed, aircraft.bank_angle
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyover_flight::FlightModel;
    use flyover_scene::CityConfig;

    #[test]
    fn debug_renderer_describes_the_frame() {
        let city = City::generate(CityConfig::default());
        let model = FlightModel::default();
        let aircraft = Aircraft::new(&model.config);
        let view = RenderView::default();

        let output = DebugTextRenderer::new().render(&city, &aircraft, &view);

        assert!(output.contains("Aircraft:"));
        assert!(output.contains("speed=0.050"));
        assert!(output.contains("fov=75"));
        assert!(output.contains(&format!("buildings={}", city.buildings.len())));
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 75.0);
        assert_eq!(view.target, Vec3::ZERO);
    }
}
