use std::path::Path;

use bevy_ecs::prelude::Resource;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GardenError;
use crate::world::Bounds;

/// Hydration and growth parameters for the plant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    pub hydration_max: f32,
    /// Hydration lost per second
    pub hydration_decay_rate: f32,
    /// Below this the plant is thirsty
    pub low_hydration_threshold: f32,
    /// Energy needed for the first level-up
    pub base_energy_requirement: f32,
    /// Multiplier applied to the threshold after every level-up
    pub threshold_growth_factor: f32,
    /// Per-level size multiplier (compounds)
    pub scale_factor: Vec3,
    pub max_growth_level: u32,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            hydration_max: 100.0,
            hydration_decay_rate: 1.0,
            low_hydration_threshold: 30.0,
            base_energy_requirement: 50.0,
            threshold_growth_factor: 1.2,
            scale_factor: Vec3::splat(1.05),
            max_growth_level: 18,
        }
    }
}

/// Template every spawned fairy is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FairyConfig {
    /// World units per second
    pub speed: f32,
    /// Distance under which a new waypoint is picked
    pub retarget_distance: f32,
    /// Energy handed to the plant on collection
    pub energy_value: f32,
}

impl Default for FairyConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            retarget_distance: 0.5,
            energy_value: 5.0,
        }
    }
}

/// Spawn cadence and admission control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// `None` leaves the spawner unconfigured; it then produces nothing.
    pub spawn_region: Option<Bounds>,
    /// Seconds before the first spawn attempt
    pub initial_delay: f32,
    /// Seconds between later spawn attempts
    pub spawn_interval: f32,
    pub max_active_fairies: usize,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            spawn_region: Some(Bounds::from_corners(
                Vec2::new(-4.0, -3.0),
                Vec2::new(4.0, 3.0),
            )),
            initial_delay: 2.0,
            spawn_interval: 5.0,
            max_active_fairies: 3,
        }
    }
}

/// Complete garden configuration
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    pub plant: PlantConfig,
    pub fairy: FairyConfig,
    pub spawner: SpawnerConfig,
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
    /// Ticks between status log lines (0 disables them)
    pub status_log_interval: u64,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            plant: PlantConfig::default(),
            fairy: FairyConfig::default(),
            spawner: SpawnerConfig::default(),
            seed: None,
            status_log_interval: 300,
        }
    }
}

impl GardenConfig {
    /// Staged growth up to level 18 with gentle per-level scaling
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Earlier tuning: ten levels, each one noticeably larger
    pub fn classic() -> Self {
        let mut config = Self::default();
        config.plant.max_growth_level = 10;
        config.plant.scale_factor = Vec3::splat(1.2);
        config
    }

    /// Quick sessions for demos: more fairies, worth more, spawning faster
    pub fn fast_growth() -> Self {
        let mut config = Self::default();
        config.fairy.energy_value = 15.0;
        config.fairy.speed = 3.0;
        config.spawner.initial_delay = 0.5;
        config.spawner.spawn_interval = 1.5;
        config.spawner.max_active_fairies = 6;
        config.plant.hydration_decay_rate = 2.0;
        config
    }

    pub fn from_json_str(json: &str) -> Result<Self, GardenError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GardenError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| GardenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Reject values that would break the simulation invariants.
    ///
    /// A missing spawn region is allowed here; the spawner reports it at
    /// runtime and keeps the session alive.
    pub fn validate(&self) -> Result<(), GardenError> {
        let plant = &self.plant;
        require(plant.hydration_max > 0.0, "plant.hydration_max", "must be positive")?;
        require(
            plant.hydration_decay_rate >= 0.0,
            "plant.hydration_decay_rate",
            "must not be negative",
        )?;
        require(
            plant.base_energy_requirement > 0.0,
            "plant.base_energy_requirement",
            "must be positive",
        )?;
        require(
            plant.threshold_growth_factor >= 1.0,
            "plant.threshold_growth_factor",
            "must be at least 1.0",
        )?;
        require(
            plant.scale_factor.cmpgt(Vec3::ZERO).all(),
            "plant.scale_factor",
            "every axis must be positive",
        )?;

        let fairy = &self.fairy;
        require(fairy.speed > 0.0, "fairy.speed", "must be positive")?;
        require(
            fairy.retarget_distance > 0.0,
            "fairy.retarget_distance",
            "must be positive",
        )?;
        require(fairy.energy_value >= 0.0, "fairy.energy_value", "must not be negative")?;

        let spawner = &self.spawner;
        require(
            spawner.initial_delay >= 0.0,
            "spawner.initial_delay",
            "must not be negative",
        )?;
        require(
            spawner.spawn_interval > 0.0,
            "spawner.spawn_interval",
            "must be positive",
        )?;
        require(
            spawner.max_active_fairies > 0,
            "spawner.max_active_fairies",
            "must be at least 1",
        )?;
        Ok(())
    }
}

fn require(condition: bool, field: &'static str, reason: &'static str) -> Result<(), GardenError> {
    if condition {
        Ok(())
    } else {
        Err(GardenError::Invalid { field, reason })
    }
}
