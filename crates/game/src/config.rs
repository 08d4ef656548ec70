//! Demo configuration. Loaded from a RON file at startup.

use crate::script::{default_script, ScriptedEvent};
use controller::CharacterTuning;
use glam::Vec3;
use physics::{SteeringMovement, SupportConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one headless run. Every field falls back to a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Fixed physics rate in Hz.
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
    /// Number of ticks to simulate.
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Print a status line every this many ticks (0 = never).
    #[serde(default = "default_log_every")]
    pub log_every: u64,
    /// Start with the simulation clock paused.
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub character: CharacterTuning,
    #[serde(default)]
    pub movement: SteeringMovement,
    #[serde(default)]
    pub support: SupportConfig,
    /// Where the character's feet start.
    #[serde(default = "default_spawn")]
    pub spawn: Vec3,
    #[serde(default = "default_capsule_height")]
    pub capsule_height: f32,
    #[serde(default = "default_capsule_radius")]
    pub capsule_radius: f32,
    #[serde(default = "default_camera_position")]
    pub camera_position: Vec3,
    #[serde(default = "default_orbit_sensitivity")]
    pub orbit_sensitivity: f32,
    #[serde(default = "default_script")]
    pub script: Vec<ScriptedEvent>,
}

fn default_tick_rate() -> f64 {
    60.0
}
fn default_ticks() -> u64 {
    600
}
fn default_log_every() -> u64 {
    30
}
fn default_spawn() -> Vec3 {
    Vec3::new(3.0, 0.3, -8.0)
}
fn default_capsule_height() -> f32 {
    1.8
}
fn default_capsule_radius() -> f32 {
    0.6
}
fn default_camera_position() -> Vec3 {
    Vec3::new(-0.032, 0.977, -9.907)
}
fn default_orbit_sensitivity() -> f32 {
    0.02
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
            ticks: default_ticks(),
            log_every: default_log_every(),
            paused: false,
            character: CharacterTuning::default(),
            movement: SteeringMovement::default(),
            support: SupportConfig::default(),
            spawn: default_spawn(),
            capsule_height: default_capsule_height(),
            capsule_radius: default_capsule_radius(),
            camera_position: default_camera_position(),
            orbit_sensitivity: default_orbit_sensitivity(),
            script: default_script(),
        }
    }
}

impl GameConfig {
    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            },
            Err(e) => log::info!("No config at {:?} ({}), using defaults", path, e),
        }
        Self::default()
    }

    /// Seconds per fixed tick.
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.tick_rate
    }
}

/// `config.ron` in the current directory.
pub fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.ron")
}
