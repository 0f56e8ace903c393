mod behavior;
mod components;
mod spawner;
mod systems;

use bevy::prelude::*;
pub use behavior::*;
pub use components::*;
pub use spawner::*;
pub use systems::{CollectFairy, FairyCollected};

use crate::GardenSet;

pub struct FairyPlugin;

impl Plugin for FairyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollectFairy>()
            .add_event::<FairyCollected>()
            .add_systems(
                Update,
                (
                    (systems::move_fairies, systems::spawn_fairies)
                        .chain()
                        .in_set(GardenSet::Fairies),
                    systems::collect_fairies.in_set(GardenSet::Collection),
                ),
            );
    }
}
