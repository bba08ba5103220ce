use crate::rng::SplitMix64;
use flyover_common::Transform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One renderable box: a transform (scale carries the box size) and a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub transform: Transform,
    pub color: [f32; 4],
}

const GROUND_COLOR: [f32; 4] = [0.56, 0.93, 0.56, 1.0];
const BUILDING_COLOR: [f32; 4] = [0.63, 0.63, 0.63, 1.0];
const TRUNK_COLOR: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
const FOLIAGE_COLOR: [f32; 4] = [0.13, 0.55, 0.13, 1.0];

/// City generation tuning. Defaults reproduce the demo's layout: a jittered
/// building grid over a 100-unit ground slab with trees scattered between.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityConfig {
    pub seed: u64,
    /// Ground slab edge length, centered on the origin.
    pub ground_size: f32,
    /// Ground surface height.
    pub ground_level: f32,
    /// Building grid half extent.
    pub building_extent: i32,
    /// Building grid spacing.
    pub building_step: i32,
    /// Probability a grid cell stays empty.
    pub building_skip: f32,
    /// Tree grid half extent.
    pub tree_extent: i32,
    /// Tree grid spacing.
    pub tree_step: i32,
    /// Probability a tree cell stays empty.
    pub tree_skip: f32,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ground_size: 100.0,
            ground_level: -5.0,
            building_extent: 40,
            building_step: 10,
            building_skip: 0.3,
            tree_extent: 45,
            tree_step: 8,
            tree_skip: 0.7,
        }
    }
}

/// A building footprint: a single box resting on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Building {
    pub center: Vec3,
    pub size: Vec3,
}

/// A tree: trunk box plus foliage box above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    pub position: Vec3,
}

/// Generated city: ground slab, buildings, trees.
#[derive(Debug, Clone)]
pub struct City {
    pub config: CityConfig,
    pub buildings: Vec<Building>,
    pub trees: Vec<Tree>,
}

impl City {
    /// Generate a city from the config's seed. Same config, same city.
    pub fn generate(config: CityConfig) -> Self {
        let mut rng = SplitMix64::new(config.seed);

        let mut buildings = Vec::new();
        let mut x = -config.building_extent;
        while x <= config.building_extent {
            let mut z = -config.building_extent;
            while z <= config.building_extent {
                if !rng.chance(config.building_skip) {
                    let height = rng.range(5.0, 15.0);
                    let width = rng.range(2.0, 4.0);
                    let depth = rng.range(2.0, 4.0);
                    let jitter_x = rng.range(-2.5, 2.5);
                    let jitter_z = rng.range(-2.5, 2.5);
                    buildings.push(Building {
                        center: Vec3::new(
                            x as f32 + jitter_x,
                            config.ground_level + height / 2.0,
                            z as f32 + jitter_z,
                        ),
                        size: Vec3::new(width, height, depth),
                    });
                }
                z += config.building_step;
            }
            x += config.building_step;
        }

        let mut trees = Vec::new();
        let mut x = -config.tree_extent;
        while x <= config.tree_extent {
            let mut z = -config.tree_extent;
            while z <= config.tree_extent {
                if !rng.chance(config.tree_skip) {
                    let jitter_x = rng.range(-1.5, 1.5);
                    let jitter_z = rng.range(-1.5, 1.5);
                    trees.push(Tree {
                        position: Vec3::new(
                            x as f32 + jitter_x,
                            config.ground_level + 0.5,
                            z as f32 + jitter_z,
                        ),
                    });
                }
                z += config.tree_step;
            }
            x += config.tree_step;
        }

        tracing::debug!(
            seed = config.seed,
            buildings = buildings.len(),
            trees = trees.len(),
            "city generated"
        );

        Self {
            config,
            buildings,
            trees,
        }
    }

    /// Flatten the city into renderable box instances: ground slab first,
    /// then buildings, then tree trunks and foliage.
    pub fn instances(&self) -> Vec<Instance> {
        let mut out = Vec::with_capacity(1 + self.buildings.len() + self.trees.len() * 2);

        out.push(Instance {
            transform: Transform {
                position: Vec3::new(0.0, self.config.ground_level - 0.05, 0.0),
                scale: Vec3::new(self.config.ground_size, 0.1, self.config.ground_size),
                ..Transform::default()
            },
            color: GROUND_COLOR,
        });

        for b in &self.buildings {
            out.push(Instance {
                transform: Transform {
                    position: b.center,
                    scale: b.size,
                    ..Transform::default()
                },
                color: BUILDING_COLOR,
            });
        }

        for t in &self.trees {
            out.push(Instance {
                transform: Transform {
                    position: t.position,
                    scale: Vec3::new(0.4, 1.0, 0.4),
                    ..Transform::default()
                },
                color: TRUNK_COLOR,
            });
            out.push(Instance {
                transform: Transform {
                    position: t.position + Vec3::new(0.0, 1.5, 0.0),
                    scale: Vec3::new(1.6, 2.0, 1.6),
                    ..Transform::default()
                },
                color: FOLIAGE_COLOR,
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_produces_identical_city() {
        let a = City::generate(CityConfig::default());
        let b = City::generate(CityConfig::default());
        assert_eq!(a.buildings, b.buildings);
        assert_eq!(a.trees, b.trees);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = City::generate(CityConfig::default());
        let b = City::generate(CityConfig {
            seed: 1,
            ..CityConfig::default()
        });
        assert_ne!(a.buildings, b.buildings);
    }

    #[test]
    fn buildings_rest_on_the_ground() {
        let city = City::generate(CityConfig::default());
        assert!(!city.buildings.is_empty());
        for b in &city.buildings {
            let base = b.center.y - b.size.y / 2.0;
            assert!((base - city.config.ground_level).abs() < 1e-4);
            assert!((5.0..15.0).contains(&b.size.y));
        }
    }

    #[test]
    fn buildings_stay_near_their_grid() {
        let city = City::generate(CityConfig::default());
        let bound = city.config.building_extent as f32 + 2.5;
        for b in &city.buildings {
            assert!(b.center.x.abs() <= bound);
            assert!(b.center.z.abs() <= bound);
        }
    }

    #[test]
    fn skip_rate_leaves_gaps_in_the_grid() {
        let city = City::generate(CityConfig::default());
        let cells = {
            let per_axis = (2 * city.config.building_extent / city.config.building_step + 1) as usize;
            per_axis * per_axis
        };
        assert!(city.buildings.len() < cells);
        assert!(city.buildings.len() > cells / 3);
    }

    #[test]
    fn instances_cover_ground_buildings_and_trees() {
        let city = City::generate(CityConfig::default());
        let instances = city.instances();
        assert_eq!(
            instances.len(),
            1 + city.buildings.len() + city.trees.len() * 2
        );
        // Ground slab spans the configured size.
        assert_eq!(instances[0].transform.scale.x, city.config.ground_size);
    }
}
