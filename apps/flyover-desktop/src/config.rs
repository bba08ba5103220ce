use flyover_camera::ChaseConfig;
use flyover_flight::FlightConfig;
use flyover_scene::CityConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from tuning-file loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Demo tuning, loadable from a JSON file. Missing fields fall back to the
/// shipped defaults, so a tuning file only has to name what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub flight: FlightConfig,
    pub chase: ChaseConfig,
    pub city: CityConfig,
    pub cloud_count: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            flight: FlightConfig::default(),
            // The demo flies with a tighter rig than the chase defaults.
            chase: ChaseConfig {
                min_distance: 5.0,
                max_distance: 10.0,
                height_offset: 1.5,
                damping: 0.04,
                rotation_damping: 0.06,
                look_ahead: 10.0,
            },
            city: CityConfig::default(),
            cloud_count: 40,
        }
    }
}

impl DemoConfig {
    /// Load a tuning file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let file = std::fs::File::open(path)?;
                Ok(serde_json::from_reader(file)?)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_the_tight_rig() {
        let cfg = DemoConfig::default();
        assert_eq!(cfg.chase.min_distance, 5.0);
        assert_eq!(cfg.cloud_count, 40);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: DemoConfig = serde_json::from_str(r#"{"cloud_count": 10}"#).unwrap();
        assert_eq!(cfg.cloud_count, 10);
        assert_eq!(cfg.flight.max_speed, FlightConfig::default().max_speed);
    }
}
