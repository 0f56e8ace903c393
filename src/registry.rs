use std::collections::HashSet;

use bevy_ecs::prelude::{Entity, Resource};

/// Driver-owned record of the session's plant and its live fairies.
///
/// Fairy and spawner code never touch this; the systems in
/// [`crate::fairies`] update it when they spawn or collect.
#[derive(Resource, Debug, Default)]
pub struct GardenRegistry {
    plant: Option<Entity>,
    fairies: HashSet<Entity>,
    /// Insertion order, oldest first
    spawn_order: Vec<Entity>,
}

impl GardenRegistry {
    pub fn set_plant(&mut self, plant: Entity) {
        self.plant = Some(plant);
    }

    /// The session plant, used when a fairy's own owner cannot be resolved
    pub fn plant(&self) -> Option<Entity> {
        self.plant
    }

    pub fn register_fairy(&mut self, fairy: Entity) {
        if self.fairies.insert(fairy) {
            self.spawn_order.push(fairy);
        }
    }

    /// Returns false if the fairy was not live
    pub fn remove_fairy(&mut self, fairy: Entity) -> bool {
        let removed = self.fairies.remove(&fairy);
        if removed {
            self.spawn_order.retain(|e| *e != fairy);
        }
        removed
    }

    pub fn is_live(&self, fairy: Entity) -> bool {
        self.fairies.contains(&fairy)
    }

    pub fn live_count(&self) -> usize {
        self.fairies.len()
    }

    pub fn oldest_fairy(&self) -> Option<Entity> {
        self.spawn_order.first().copied()
    }
}
