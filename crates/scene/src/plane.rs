use glam::Vec3;

/// Spawn height of the plane above the city.
pub const SPAWN_ALTITUDE: f32 = 10.0;

const METAL: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
const BLADE: [f32; 4] = [0.25, 0.25, 0.25, 1.0];

/// One box of the plane assembly, in aircraft-local space.
///
/// `roll` is a fixed rotation about the local Z axis (the second propeller
/// blade is the first turned a quarter turn); parts with `spins` set are
/// additionally rotated by the aircraft's propeller angle each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanePart {
    pub offset: Vec3,
    pub size: Vec3,
    pub color: [f32; 4],
    pub roll: f32,
    pub spins: bool,
}

/// Box-part assembly of the plane.
#[derive(Debug, Clone)]
pub struct PlaneModel {
    pub parts: Vec<PlanePart>,
}

impl PlaneModel {
    /// The demo's single-prop plane: fuselage, two wings, tail fin and
    /// tailplane, propeller hub and two spinning blades. Nose points +Z.
    pub fn standard() -> Self {
        let fixed = |offset: Vec3, size: Vec3| PlanePart {
            offset,
            size,
            color: METAL,
            roll: 0.0,
            spins: false,
        };

        let parts = vec![
            // Fuselage
            fixed(Vec3::ZERO, Vec3::new(0.6, 0.6, 4.0)),
            // Wings
            fixed(Vec3::new(-1.5, -0.1, 0.0), Vec3::new(2.4, 0.1, 0.8)),
            fixed(Vec3::new(1.5, -0.1, 0.0), Vec3::new(2.4, 0.1, 0.8)),
            // Tail fin
            fixed(Vec3::new(0.0, 0.2, -1.8), Vec3::new(0.1, 0.8, 0.6)),
            // Tailplane
            fixed(Vec3::new(0.0, 0.1, -1.8), Vec3::new(1.5, 0.1, 0.4)),
            // Propeller hub
            fixed(Vec3::new(0.0, 0.0, 2.1), Vec3::new(0.24, 0.24, 0.15)),
            // Propeller blades
            PlanePart {
                offset: Vec3::new(0.0, 0.0, 2.2),
                size: Vec3::new(1.2, 0.15, 0.05),
                color: BLADE,
                roll: 0.0,
                spins: true,
            },
            PlanePart {
                offset: Vec3::new(0.0, 0.0, 2.2),
                size: Vec3::new(1.2, 0.15, 0.05),
                color: BLADE,
                roll: std::f32::consts::FRAC_PI_2,
                spins: true,
            },
        ];

        Self { parts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_plane_has_spinning_blades() {
        let model = PlaneModel::standard();
        let blades: Vec<_> = model.parts.iter().filter(|p| p.spins).collect();
        assert_eq!(blades.len(), 2);
        // The two blades form a cross.
        assert_ne!(blades[0].roll, blades[1].roll);
    }

    #[test]
    fn wings_are_symmetric() {
        let model = PlaneModel::standard();
        let wings: Vec<_> = model
            .parts
            .iter()
            .filter(|p| p.size == Vec3::new(2.4, 0.1, 0.8))
            .collect();
        assert_eq!(wings.len(), 2);
        assert_eq!(wings[0].offset.x, -wings[1].offset.x);
    }

    #[test]
    fn nose_parts_sit_forward_of_tail_parts() {
        let model = PlaneModel::standard();
        let nose_z = model
            .parts
            .iter()
            .filter(|p| p.spins)
            .map(|p| p.offset.z)
            .fold(f32::MIN, f32::max);
        let tail_z = model
            .parts
            .iter()
            .map(|p| p.offset.z)
            .fold(f32::MAX, f32::min);
        assert!(nose_z > 0.0);
        assert!(tail_z < 0.0);
    }
}
