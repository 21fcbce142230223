//! Spawn point settings - store shape, effect parameters, consumer bindings.
//! Persisted as JSON; missing fields take their defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::binding::{BindingConfig, EffectParams};
use crate::constants::*;
use crate::coord::WorldRange;
use crate::gpu::ring::StoreLayout;

#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SpawnSettings {
    // Ring
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    // World rectangle
    #[serde(default)]
    pub world_x_range: WorldRange,
    #[serde(default)]
    pub world_y_range: WorldRange,
    #[serde(default)]
    pub world_z: f32,
    // Seeded line
    #[serde(default = "default_seed_step")]
    pub seed_step: f32,
    #[serde(default = "default_seed_y_offset")]
    pub seed_y_offset: f32,
    // Effect parameters
    #[serde(default = "default_lifetime")]
    pub lifetime: f32,
    #[serde(default = "default_fade_out")]
    pub fade_out_duration: f32,
    #[serde(default = "default_particle_size")]
    pub particle_size: f32,
    // Consumers
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

fn default_capacity() -> usize { DEFAULT_CAPACITY }
fn default_seed_step() -> f32 { SEED_STEP }
fn default_seed_y_offset() -> f32 { SEED_Y_OFFSET }
fn default_lifetime() -> f32 { DEFAULT_LIFETIME }
fn default_fade_out() -> f32 { DEFAULT_FADE_OUT_DURATION }
fn default_particle_size() -> f32 { DEFAULT_PARTICLE_SIZE }

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            world_x_range: WorldRange::default(),
            world_y_range: WorldRange::default(),
            world_z: 0.0,
            seed_step: SEED_STEP,
            seed_y_offset: SEED_Y_OFFSET,
            lifetime: DEFAULT_LIFETIME,
            fade_out_duration: DEFAULT_FADE_OUT_DURATION,
            particle_size: DEFAULT_PARTICLE_SIZE,
            bindings: Vec::new(),
        }
    }
}

impl SpawnSettings {
    pub fn layout(&self) -> StoreLayout {
        StoreLayout {
            seed_step: self.seed_step,
            seed_y_offset: self.seed_y_offset,
            ..StoreLayout::new(self.capacity, self.world_x_range, self.world_y_range, self.world_z)
        }
    }

    pub fn effect_params(&self) -> EffectParams {
        EffectParams {
            lifetime: self.lifetime,
            fade_out_duration: self.fade_out_duration,
            particle_size: self.particle_size,
        }
    }
}

pub fn save_settings(path: &Path, settings: &SpawnSettings) {
    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                warn!("Failed to save spawn settings: {}", e);
            }
        }
        Err(e) => warn!("Failed to serialize spawn settings: {}", e),
    }
}

/// Missing file → defaults. Malformed file → defaults with a warning.
pub fn load_settings(path: &Path) -> SpawnSettings {
    let Ok(json) = std::fs::read_to_string(path) else {
        return SpawnSettings::default();
    };
    match serde_json::from_str(&json) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Malformed spawn settings {}: {}", path.display(), e);
            SpawnSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("spawn_points_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: SpawnSettings = serde_json::from_str(
            r#"{"capacity": 4, "world_x_range": {"min": -1.0, "max": 2.0}, "bindings": [{}]}"#,
        )
        .unwrap();
        assert_eq!(settings.capacity, 4);
        assert_eq!(settings.world_x_range, WorldRange::new(-1.0, 2.0));
        assert_eq!(settings.world_y_range, WorldRange::default());
        assert_eq!(settings.seed_y_offset, SEED_Y_OFFSET);
        assert_eq!(settings.bindings, vec![BindingConfig::default()]);
    }

    #[test]
    fn save_then_load_restores_settings() {
        let path = temp_path("roundtrip");
        let settings = SpawnSettings {
            capacity: 32,
            world_z: 2.5,
            bindings: vec![BindingConfig { send_event: false, ..Default::default() }],
            ..Default::default()
        };
        save_settings(&path, &settings);
        assert_eq!(load_settings(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_or_malformed_file_falls_back_to_defaults() {
        let path = temp_path("missing");
        assert_eq!(load_settings(&path), SpawnSettings::default());

        let path = temp_path("malformed");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings(&path), SpawnSettings::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn layout_carries_seed_settings() {
        let settings = SpawnSettings { seed_step: 1.0, seed_y_offset: 0.0, ..Default::default() };
        let layout = settings.layout();
        assert_eq!(layout.capacity, DEFAULT_CAPACITY);
        assert_eq!(layout.seed(2).x, -1.0);
        assert_eq!(layout.seed(2).y, -3.0);
    }
}
