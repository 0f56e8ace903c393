use bevy_ecs::prelude::Component;
use glam::Vec3;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::PlantConfig;

/// Coarse visual grouping of growth levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum GrowthStage {
    Seed,       // levels 0-3
    Sprout,     // levels 4-6
    YoungPlant, // levels 7-9
    AdultPlant, // levels 10-12
    Flower,     // levels 13-15
    Fruit,      // levels 16+
}

impl GrowthStage {
    const LEVELS_PER_STAGE: u32 = 3;

    pub fn from_level(level: u32) -> Self {
        match level.saturating_sub(1) / Self::LEVELS_PER_STAGE {
            0 => GrowthStage::Seed,
            1 => GrowthStage::Sprout,
            2 => GrowthStage::YoungPlant,
            3 => GrowthStage::AdultPlant,
            4 => GrowthStage::Flower,
            _ => GrowthStage::Fruit,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Result of depositing energy into a plant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsorbOutcome {
    /// Plant is at its level cap; nothing changed
    Capped,
    /// Energy was stored without reaching the next threshold
    Stored,
    /// One or more level-ups happened in this deposit
    Grew { levels: u32, stage_changed: bool },
}

/// The garden's plant: decaying hydration plus energy-driven growth levels
#[derive(Component, Debug, Clone)]
pub struct Plant {
    hydration: f32,
    hydration_max: f32,
    hydration_decay_rate: f32,
    low_hydration_threshold: f32,

    energy: f32,
    growth_level: u32,
    max_growth_level: u32,
    growth_threshold: f32,
    threshold_growth_factor: f32,

    scale: Vec3,
    scale_factor: Vec3,
}

impl Plant {
    /// Fresh plant: full hydration, no energy, level 0
    pub fn new(config: &PlantConfig) -> Self {
        Self {
            hydration: config.hydration_max,
            hydration_max: config.hydration_max,
            hydration_decay_rate: config.hydration_decay_rate,
            low_hydration_threshold: config.low_hydration_threshold,
            energy: 0.0,
            growth_level: 0,
            max_growth_level: config.max_growth_level,
            growth_threshold: config.base_energy_requirement,
            threshold_growth_factor: config.threshold_growth_factor,
            scale: Vec3::ONE,
            scale_factor: config.scale_factor,
        }
    }

    /// Lose hydration over `dt` seconds
    pub fn tick_decay(&mut self, dt: f32) {
        if self.hydration <= 0.0 || dt <= 0.0 {
            return;
        }
        let was_thirsty = self.is_thirsty();
        self.hydration = (self.hydration - self.hydration_decay_rate * dt)
            .clamp(0.0, self.hydration_max);
        if !was_thirsty && self.is_thirsty() {
            debug!("Plant is thirsty (hydration {:.1})", self.hydration);
        }
    }

    pub fn give_hydration(&mut self, amount: f32) {
        self.hydration = (self.hydration + amount).clamp(0.0, self.hydration_max);
        debug!(
            "Gave {:.1} hydration, now {:.1}/{:.1}",
            amount, self.hydration, self.hydration_max
        );
    }

    /// Deposit energy and settle any level-ups it pays for
    pub fn absorb_energy(&mut self, amount: f32) -> AbsorbOutcome {
        if self.is_fully_grown() {
            debug!("Plant already at max level {}", self.max_growth_level);
            return AbsorbOutcome::Capped;
        }

        self.energy += amount;
        debug!("Absorbed {:.1} energy, now {:.1}", amount, self.energy);

        let stage_before = self.stage();
        let levels = self.settle_growth();
        let stage_after = self.stage();
        if stage_after != stage_before {
            info!(
                "Plant stage changed: {:?} -> {:?} at level {}",
                stage_before, stage_after, self.growth_level
            );
        }

        if levels == 0 {
            AbsorbOutcome::Stored
        } else {
            AbsorbOutcome::Grew {
                levels,
                stage_changed: stage_after != stage_before,
            }
        }
    }

    /// Convert stored energy into as many level-ups as it covers.
    /// Each pass consumes a full threshold, so the loop ends at the cap or
    /// once energy drops below the (growing) threshold.
    fn settle_growth(&mut self) -> u32 {
        let mut levels = 0;
        while self.energy >= self.growth_threshold && self.growth_level < self.max_growth_level {
            self.energy -= self.growth_threshold;
            self.growth_level += 1;
            self.scale *= self.scale_factor;
            self.growth_threshold *= self.threshold_growth_factor;
            levels += 1;

            info!(
                "Plant grew to level {}! Next level needs {:.1} energy",
                self.growth_level, self.growth_threshold
            );
        }
        // Leftover from a deposit that crossed the cap
        self.energy = self.energy.clamp(0.0, self.growth_threshold);
        levels
    }

    pub fn hydration(&self) -> f32 {
        self.hydration
    }

    pub fn hydration_ratio(&self) -> f32 {
        if self.hydration_max > 0.0 {
            self.hydration / self.hydration_max
        } else {
            0.0
        }
    }

    pub fn is_thirsty(&self) -> bool {
        self.hydration < self.low_hydration_threshold
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn energy_ratio(&self) -> f32 {
        if self.growth_threshold > 0.0 {
            self.energy / self.growth_threshold
        } else {
            0.0
        }
    }

    pub fn growth_level(&self) -> u32 {
        self.growth_level
    }

    pub fn max_growth_level(&self) -> u32 {
        self.max_growth_level
    }

    pub fn growth_threshold(&self) -> f32 {
        self.growth_threshold
    }

    pub fn is_fully_grown(&self) -> bool {
        self.growth_level >= self.max_growth_level
    }

    pub fn stage(&self) -> GrowthStage {
        GrowthStage::from_level(self.growth_level)
    }

    /// Cumulative size multiplier from all level-ups so far
    pub fn scale(&self) -> Vec3 {
        self.scale
    }
}
