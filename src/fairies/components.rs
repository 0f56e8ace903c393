use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

use crate::config::FairyConfig;
use crate::fairies::behavior::{Facing, FairyState};
use crate::world::Bounds;

/// A wandering fairy that feeds its plant when collected
#[derive(Component, Debug, Clone)]
pub struct Fairy {
    pub position: Vec2,
    /// Current wander waypoint
    pub target: Vec2,
    /// World units per second
    pub speed: f32,
    /// Distance under which a new waypoint is picked
    pub retarget_distance: f32,
    /// Confinement region; `None` means jitter around the current position
    pub bounds: Option<Bounds>,
    /// Energy handed over on collection
    pub energy_value: f32,
    /// Plant this fairy feeds. Only a relation; the driver resolves it.
    pub owner: Option<Entity>,
    pub facing: Facing,
    pub(crate) state: FairyState,
}

impl Fairy {
    /// Uninitialised fairy at `position`; it stays put until `initialize`.
    pub fn new(position: Vec2, config: &FairyConfig) -> Self {
        Self {
            position,
            target: position,
            speed: config.speed,
            retarget_distance: config.retarget_distance,
            bounds: None,
            energy_value: config.energy_value,
            owner: None,
            facing: Facing::Right,
            state: FairyState::Dormant,
        }
    }

    pub fn state(&self) -> FairyState {
        self.state
    }

    pub fn is_collected(&self) -> bool {
        self.state == FairyState::Collected
    }
}

/// Energy a collected fairy owes its plant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyTransfer {
    /// `None` when the fairy never had an owner; the driver falls back
    pub owner: Option<Entity>,
    pub amount: f32,
}
