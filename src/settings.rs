//! Simulation settings
//!
//! Every knob the world is built from, persisted as a JSON file next to the
//! binary. Defaults reproduce the stock scene.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Simulation tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of bodies to pack into the enclosure
    pub body_count: usize,
    /// Sphere diameter
    pub body_diameter: f64,
    /// Gap between neighboring spheres in the starting grid
    pub initial_spacing: f64,
    /// Cube edge length
    pub edge_length: f64,
    /// Fixed integration step size
    pub tick_dt: f64,
    /// Speed the governor drives every body toward
    pub target_speed: f64,
    /// Starting velocity, applied to every body as-is when no seed is set
    pub initial_velocity: [f64; 3],
    /// Seed for scattering starting velocity directions; `None` keeps the
    /// fixed `initial_velocity` for every body
    #[serde(default)]
    pub velocity_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            body_count: consts::BODY_COUNT,
            body_diameter: consts::BODY_DIAMETER,
            initial_spacing: consts::INITIAL_SPACING,
            edge_length: consts::EDGE_LENGTH,
            tick_dt: consts::TICK_DT,
            target_speed: consts::TARGET_SPEED,
            initial_velocity: consts::INITIAL_VELOCITY,
            velocity_seed: None,
        }
    }
}

impl SimConfig {
    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded settings from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
