//! Simulation core of an idle plant-growing game.
//!
//! A single [`Plant`] loses hydration over time and grows through levels as
//! collected [`Fairy`]s feed it energy. A [`FairySpawner`] keeps a capped
//! population of fairies wandering inside a spawn region. [`GardenPlugin`]
//! wires everything into a Bevy app; the plain types can also be driven by
//! hand.

pub mod config;
pub mod error;
pub mod fairies;
pub mod plant;
pub mod registry;
pub mod stats;
pub mod world;

use bevy::prelude::*;

pub use config::{FairyConfig, GardenConfig, PlantConfig, SpawnerConfig};
pub use error::GardenError;
pub use fairies::{
    CollectFairy, EnergyTransfer, Facing, Fairy, FairyCollected, FairySpawner, FairyState,
    SpawnCadence, SpawnRequest,
};
pub use plant::{AbsorbOutcome, GrowthStage, Plant, PlantLeveledUp, WaterPlant};
pub use registry::GardenRegistry;
pub use stats::{GardenStats, PlantSnapshot};
pub use world::{Bounds, GardenRng, RandomSource};

/// Ordering of the garden's per-frame work
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GardenSet {
    /// Hydration decay and watering
    Plant,
    /// Fairy movement and spawning
    Fairies,
    /// Collect requests
    Collection,
    /// Snapshot and status logging
    Report,
}

/// Installs the garden resources, events and systems.
///
/// Expects the host app to provide `Time` (e.g. through `MinimalPlugins`).
/// Uses the `GardenConfig` resource if one was inserted beforehand,
/// otherwise the default configuration.
pub struct GardenPlugin;

impl Plugin for GardenPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world
            .get_resource::<GardenConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(GardenRng::from_seed_option(config.seed))
            .insert_resource(FairySpawner::new(&config.spawner))
            .insert_resource(config)
            .init_resource::<GardenRegistry>()
            .init_resource::<GardenStats>()
            .configure_sets(
                Update,
                (
                    GardenSet::Plant,
                    GardenSet::Fairies,
                    GardenSet::Collection,
                    GardenSet::Report,
                )
                    .chain(),
            )
            .add_plugins((plant::PlantPlugin, fairies::FairyPlugin))
            .add_systems(
                Update,
                (
                    // Fairies spawned this frame must exist before collection runs
                    apply_deferred
                        .after(GardenSet::Fairies)
                        .before(GardenSet::Collection),
                    stats::report_garden_status.in_set(GardenSet::Report),
                ),
            );
    }
}
