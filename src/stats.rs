use bevy::prelude::*;
use glam::Vec3;
use serde::Serialize;

use crate::config::GardenConfig;
use crate::fairies::FairySpawner;
use crate::plant::{GrowthStage, Plant};
use crate::registry::GardenRegistry;

/// Read-only view of the plant for an external renderer or UI
#[derive(Resource, Debug, Clone, PartialEq, Serialize)]
pub struct PlantSnapshot {
    pub growth_level: u32,
    pub max_growth_level: u32,
    pub stage: GrowthStage,
    pub stage_index: usize,
    pub hydration_ratio: f32,
    pub energy_ratio: f32,
    pub thirsty: bool,
    pub scale: Vec3,
    pub live_fairies: usize,
}

impl PlantSnapshot {
    pub fn capture(plant: &Plant, live_fairies: usize) -> Self {
        let stage = plant.stage();
        Self {
            growth_level: plant.growth_level(),
            max_growth_level: plant.max_growth_level(),
            stage,
            stage_index: stage.index(),
            hydration_ratio: plant.hydration_ratio(),
            energy_ratio: plant.energy_ratio(),
            thirsty: plant.is_thirsty(),
            scale: plant.scale(),
            live_fairies,
        }
    }
}

/// Running session counters
#[derive(Resource, Debug, Default)]
pub struct GardenStats {
    pub tick_counter: u64,
    pub fairies_spawned: u32,
    pub fairies_collected: u32,
    /// Energy actually delivered to a plant
    pub energy_delivered: f32,
    /// Collections whose energy found no plant
    pub undelivered_collections: u32,
}

/// Refresh the snapshot every tick and log a summary periodically
pub fn report_garden_status(
    mut commands: Commands,
    mut stats: ResMut<GardenStats>,
    snapshot: Option<ResMut<PlantSnapshot>>,
    registry: Res<GardenRegistry>,
    spawner: Res<FairySpawner>,
    config: Res<GardenConfig>,
    plants: Query<&Plant>,
) {
    stats.tick_counter += 1;

    let Some(plant) = registry.plant().and_then(|entity| plants.get(entity).ok()) else {
        return;
    };
    let current = PlantSnapshot::capture(plant, registry.live_count());

    match snapshot {
        Some(mut snapshot) => {
            if *snapshot != current {
                *snapshot = current.clone();
            }
        }
        None => commands.insert_resource(current.clone()),
    }

    let interval = config.status_log_interval;
    if interval == 0 || stats.tick_counter % interval != 0 {
        return;
    }

    info!(
        "[GARDEN] Tick {} | Level {}/{} ({:?}) | Hydration {:.0}% | Energy {:.0}% | Fairies {}/{} | Collected {} | Next spawn in {:.1}s",
        stats.tick_counter,
        current.growth_level,
        current.max_growth_level,
        current.stage,
        current.hydration_ratio * 100.0,
        current.energy_ratio * 100.0,
        current.live_fairies,
        spawner.max_active_fairies(),
        stats.fairies_collected,
        spawner.cadence().time_until_next(),
    );
    match serde_json::to_string(&current) {
        Ok(json) => debug!("[GARDEN] Snapshot {json}"),
        Err(err) => error!("Failed to serialise plant snapshot: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlantConfig;

    #[test]
    fn snapshot_reflects_plant_state() {
        let mut plant = Plant::new(&PlantConfig::default());
        plant.tick_decay(75.0);
        plant.absorb_energy(125.0);

        let snapshot = PlantSnapshot::capture(&plant, 2);
        assert_eq!(snapshot.growth_level, 2);
        assert_eq!(snapshot.stage, GrowthStage::Seed);
        assert_eq!(snapshot.stage_index, 0);
        assert!(snapshot.thirsty);
        assert!((snapshot.hydration_ratio - 0.25).abs() < 1e-5);
        assert!((snapshot.energy_ratio - 15.0 / 72.0).abs() < 1e-3);
        assert_eq!(snapshot.live_fairies, 2);
    }

    #[test]
    fn snapshot_serialises_for_external_consumers() {
        let plant = Plant::new(&PlantConfig::default());
        let json = serde_json::to_value(PlantSnapshot::capture(&plant, 0)).unwrap();
        assert_eq!(json["growth_level"], 0);
        assert_eq!(json["stage"], "Seed");
        assert_eq!(json["thirsty"], false);
        assert_eq!(json["scale"], serde_json::json!([1.0, 1.0, 1.0]));
    }
}
