use bevy::prelude::*;
use glam::Vec2;

use crate::config::GardenConfig;
use crate::fairies::components::{EnergyTransfer, Fairy};
use crate::fairies::spawner::FairySpawner;
use crate::plant::{AbsorbOutcome, Plant, PlantLeveledUp};
use crate::registry::GardenRegistry;
use crate::stats::GardenStats;
use crate::world::GardenRng;

/// Input trigger: the player tapped this fairy
#[derive(Event, Debug, Clone, Copy)]
pub struct CollectFairy {
    pub fairy: Entity,
}

/// Emitted after a fairy has been collected and removed, for effects/audio
#[derive(Event, Debug, Clone, Copy)]
pub struct FairyCollected {
    pub fairy: Entity,
    pub position: Vec2,
    pub energy: f32,
    /// Plant that received the energy, if any could be found
    pub plant: Option<Entity>,
}

/// Advance every live fairy's wander movement
pub fn move_fairies(
    mut fairies: Query<&mut Fairy>,
    mut rng: ResMut<GardenRng>,
    time: Res<Time>,
) {
    let dt = time.delta_seconds();
    let rng = &mut *rng;
    for mut fairy in fairies.iter_mut() {
        fairy.tick(dt, rng);
    }
}

/// Run the spawn cadence and create fairies while there is room
pub fn spawn_fairies(
    mut commands: Commands,
    mut spawner: ResMut<FairySpawner>,
    mut registry: ResMut<GardenRegistry>,
    mut rng: ResMut<GardenRng>,
    mut stats: ResMut<GardenStats>,
    config: Res<GardenConfig>,
    time: Res<Time>,
) {
    let due = spawner.advance(time.delta_seconds());
    for _ in 0..due {
        let Some(request) = spawner.maybe_spawn(registry.live_count(), &mut *rng) else {
            continue;
        };

        let mut fairy = Fairy::new(request.position, &config.fairy);
        fairy.initialize(registry.plant(), Some(request.bounds), &mut *rng);
        let entity = commands.spawn(fairy).id();
        registry.register_fairy(entity);
        stats.fairies_spawned += 1;

        info!(
            "[SPAWNER] Fairy {:?} appeared at ({:.2}, {:.2}), {} live",
            entity,
            request.position.x,
            request.position.y,
            registry.live_count()
        );
    }
}

/// Hand collected fairies' energy to their plant and remove them
pub fn collect_fairies(
    mut commands: Commands,
    mut requests: EventReader<CollectFairy>,
    mut collected: EventWriter<FairyCollected>,
    mut level_ups: EventWriter<PlantLeveledUp>,
    mut fairies: Query<&mut Fairy>,
    mut plants: Query<&mut Plant>,
    mut registry: ResMut<GardenRegistry>,
    mut stats: ResMut<GardenStats>,
) {
    for request in requests.read() {
        let entity = request.fairy;
        if !registry.is_live(entity) {
            debug!("[FAIRY] {:?} is not a live fairy, ignoring collect", entity);
            continue;
        }
        let Ok(mut fairy) = fairies.get_mut(entity) else {
            warn!("[FAIRY] {:?} is registered but has no fairy data", entity);
            registry.remove_fairy(entity);
            continue;
        };
        let Some(transfer) = fairy.collect() else {
            continue;
        };
        let position = fairy.position;

        let plant = resolve_plant(&transfer, &registry, &plants);
        match plant {
            Some(plant_entity) => {
                if let Ok(mut plant) = plants.get_mut(plant_entity) {
                    let outcome = plant.absorb_energy(transfer.amount);
                    if outcome != AbsorbOutcome::Capped {
                        stats.energy_delivered += transfer.amount;
                    }
                    if let AbsorbOutcome::Grew { levels, stage_changed } = outcome {
                        level_ups.send(PlantLeveledUp {
                            plant: plant_entity,
                            level: plant.growth_level(),
                            levels_gained: levels,
                            stage: plant.stage(),
                            stage_changed,
                        });
                    }
                }
            }
            None => {
                warn!("[FAIRY] No plant found for collected fairy {:?}, energy lost", entity);
                stats.undelivered_collections += 1;
            }
        }

        registry.remove_fairy(entity);
        commands.entity(entity).despawn();
        stats.fairies_collected += 1;
        collected.send(FairyCollected {
            fairy: entity,
            position,
            energy: transfer.amount,
            plant,
        });
    }
}

/// The fairy's own plant if it still exists, otherwise the session plant
fn resolve_plant(
    transfer: &EnergyTransfer,
    registry: &GardenRegistry,
    plants: &Query<&mut Plant>,
) -> Option<Entity> {
    if let Some(owner) = transfer.owner {
        if plants.contains(owner) {
            return Some(owner);
        }
        debug!("[FAIRY] Owner {:?} is gone, falling back to the session plant", owner);
    }
    registry.plant().filter(|plant| plants.contains(*plant))
}
