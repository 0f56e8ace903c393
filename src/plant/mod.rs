mod components;

use bevy::prelude::*;
pub use components::*;

use crate::config::GardenConfig;
use crate::registry::GardenRegistry;
use crate::GardenSet;

/// Request to water the plant
#[derive(Event, Debug, Clone, Copy)]
pub struct WaterPlant {
    pub amount: f32,
}

/// Emitted whenever a deposit produces level-ups
#[derive(Event, Debug, Clone, Copy)]
pub struct PlantLeveledUp {
    pub plant: Entity,
    pub level: u32,
    pub levels_gained: u32,
    pub stage: GrowthStage,
    pub stage_changed: bool,
}

pub struct PlantPlugin;

impl Plugin for PlantPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WaterPlant>()
            .add_event::<PlantLeveledUp>()
            .add_systems(Startup, spawn_plant)
            .add_systems(
                Update,
                (decay_hydration, apply_watering).chain().in_set(GardenSet::Plant),
            );
    }
}

/// Create the session's single plant
fn spawn_plant(
    mut commands: Commands,
    mut registry: ResMut<GardenRegistry>,
    config: Res<GardenConfig>,
) {
    let plant = Plant::new(&config.plant);
    let entity = commands.spawn(plant).id();
    registry.set_plant(entity);
    info!(
        "[GARDEN] Plant planted: hydration {:.0}, first level needs {:.0} energy, max level {}",
        config.plant.hydration_max,
        config.plant.base_energy_requirement,
        config.plant.max_growth_level
    );
}

fn decay_hydration(mut plants: Query<&mut Plant>, time: Res<Time>) {
    let dt = time.delta_seconds();
    for mut plant in plants.iter_mut() {
        plant.tick_decay(dt);
    }
}

fn apply_watering(mut events: EventReader<WaterPlant>, mut plants: Query<&mut Plant>) {
    for event in events.read() {
        let mut watered = false;
        for mut plant in plants.iter_mut() {
            plant.give_hydration(event.amount);
            watered = true;
        }
        if !watered {
            warn!("[GARDEN] Watering requested but there is no plant");
        }
    }
}
