use crate::rng::SplitMix64;
use glam::Vec3;

/// Sky gradient endpoints, linear RGB. The renderer blends or picks one for
/// its clear color.
pub const SKY_TOP: [f32; 3] = [0.0, 0.47, 1.0];
pub const SKY_HORIZON: [f32; 3] = [0.85, 0.93, 1.0];

/// One cloud puff. `phase` fixes its drift direction for the whole session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub position: Vec3,
    pub size: f32,
    pub phase: f32,
}

/// Drifting cloud layer.
#[derive(Debug, Clone)]
pub struct Clouds {
    pub puffs: Vec<Cloud>,
}

impl Clouds {
    /// Scatter `count` puffs in a band above the city.
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = SplitMix64::new(seed);
        let mut puffs = Vec::with_capacity(count);
        for _ in 0..count {
            let radius = rng.range(100.0, 300.0);
            let theta = rng.range(0.0, std::f32::consts::TAU);
            let size = rng.range(10.0, 30.0);
            let phase = rng.range(0.0, std::f32::consts::TAU);
            puffs.push(Cloud {
                position: Vec3::new(
                    radius * theta.cos(),
                    rng.range(20.0, 70.0),
                    radius * theta.sin(),
                ),
                size,
                phase,
            });
        }
        Self { puffs }
    }

    /// Advance the slow horizontal drift by one frame. Altitude never
    /// changes; each puff keeps the heading its phase gave it.
    pub fn drift(&mut self) {
        for puff in &mut self.puffs {
            puff.position.x += puff.phase.sin() * 0.05;
            puff.position.z += puff.phase.cos() * 0.05;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let a = Clouds::generate(40, 3);
        let b = Clouds::generate(40, 3);
        assert_eq!(a.puffs, b.puffs);
        assert_eq!(a.puffs.len(), 40);
    }

    #[test]
    fn puffs_sit_in_the_sky_band() {
        let clouds = Clouds::generate(100, 5);
        for puff in &clouds.puffs {
            assert!((20.0..70.0).contains(&puff.position.y));
            assert!((10.0..30.0).contains(&puff.size));
        }
    }

    #[test]
    fn drift_moves_horizontally_only() {
        let mut clouds = Clouds::generate(10, 8);
        let before = clouds.puffs.clone();
        clouds.drift();
        for (a, b) in before.iter().zip(&clouds.puffs) {
            assert_eq!(a.position.y, b.position.y);
            assert_ne!(
                (a.position.x, a.position.z),
                (b.position.x, b.position.z)
            );
        }
    }
}
