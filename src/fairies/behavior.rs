use bevy_ecs::prelude::Entity;
use glam::Vec2;
use tracing::{debug, warn};

use crate::fairies::components::{EnergyTransfer, Fairy};
use crate::world::{Bounds, RandomSource};

/// Fairy lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FairyState {
    /// Spawned but not yet initialised; ticks are ignored
    Dormant,
    /// Wandering between random waypoints
    Seeking,
    /// Terminal: energy has been handed over
    Collected,
}

/// Horizontal orientation, used by the renderer for mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Half-width of the square used for jitter targets when no bounds are set
pub const JITTER_RADIUS: f32 = 1.0;

/// Choose the next waypoint.
///
/// Memoryless: a uniform point inside `bounds`, or a uniform offset of up to
/// `JITTER_RADIUS` per axis around `position` when there are no bounds.
pub fn pick_wander_target(
    position: Vec2,
    bounds: Option<&Bounds>,
    rng: &mut impl RandomSource,
) -> Vec2 {
    match bounds {
        Some(bounds) => bounds.sample(rng),
        None => {
            let dx = rng.range(-JITTER_RADIUS, JITTER_RADIUS);
            let dy = rng.range(-JITTER_RADIUS, JITTER_RADIUS);
            position + Vec2::new(dx, dy)
        }
    }
}

/// Move `from` toward `to` by at most `max_step`, never overshooting.
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= max_step || distance <= f32::EPSILON {
        to
    } else {
        from + delta / distance * max_step
    }
}

impl Fairy {
    /// Bind the fairy to its plant and region and start wandering.
    pub fn initialize(
        &mut self,
        owner: Option<Entity>,
        bounds: Option<Bounds>,
        rng: &mut impl RandomSource,
    ) {
        self.owner = owner;
        self.bounds = bounds;
        if self.bounds.is_none() {
            warn!("[FAIRY] No movement bounds configured, wandering locally");
        }
        self.target = pick_wander_target(self.position, self.bounds.as_ref(), rng);
        self.state = FairyState::Seeking;
    }

    /// Advance movement by `dt` seconds. Only seeking fairies move.
    pub fn tick(&mut self, dt: f32, rng: &mut impl RandomSource) {
        if self.state != FairyState::Seeking {
            return;
        }

        let distance = self.position.distance(self.target);
        if distance < self.retarget_distance {
            self.target = pick_wander_target(self.position, self.bounds.as_ref(), rng);
            return;
        }

        self.position = step_toward(self.position, self.target, self.speed * dt.max(0.0));
        self.facing = if self.target.x < self.position.x {
            Facing::Left
        } else {
            Facing::Right
        };
    }

    /// Mark the fairy collected and hand back what it owes.
    ///
    /// Returns `None` if it was already collected. Removing the entity is
    /// up to the caller.
    pub fn collect(&mut self) -> Option<EnergyTransfer> {
        if self.state == FairyState::Collected {
            return None;
        }
        self.state = FairyState::Collected;
        debug!(
            "[FAIRY] Collected at ({:.2}, {:.2}) carrying {:.1} energy",
            self.position.x, self.position.y, self.energy_value
        );
        Some(EnergyTransfer {
            owner: self.owner,
            amount: self.energy_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FairyConfig;
    use crate::world::random::ScriptedSource;
    use crate::world::GardenRng;

    fn region() -> Bounds {
        Bounds::new(-4.0, -3.0, 4.0, 3.0)
    }

    fn fairy_at(x: f32, y: f32) -> Fairy {
        Fairy::new(Vec2::new(x, y), &FairyConfig::default())
    }

    #[test]
    fn dormant_fairy_does_not_move() {
        let mut fairy = fairy_at(1.0, 1.0);
        let mut rng = GardenRng::seeded(3);
        fairy.tick(1.0, &mut rng);
        assert_eq!(fairy.position, Vec2::new(1.0, 1.0));
        assert_eq!(fairy.state(), FairyState::Dormant);
    }

    #[test]
    fn initialize_targets_inside_bounds() {
        let mut fairy = fairy_at(0.0, 0.0);
        let owner = Entity::from_raw(7);
        let mut rng = ScriptedSource::new(vec![1.0, 0.0]);
        fairy.initialize(Some(owner), Some(region()), &mut rng);
        assert_eq!(fairy.state(), FairyState::Seeking);
        assert_eq!(fairy.owner, Some(owner));
        assert_eq!(fairy.target, Vec2::new(4.0, -3.0));
    }

    #[test]
    fn missing_bounds_falls_back_to_jitter() {
        let mut fairy = fairy_at(10.0, 10.0);
        let mut rng = ScriptedSource::new(vec![0.0, 1.0]);
        fairy.initialize(None, None, &mut rng);
        assert_eq!(fairy.state(), FairyState::Seeking);
        assert_eq!(fairy.target, Vec2::new(9.0, 11.0));

        let mut rng = GardenRng::seeded(11);
        for _ in 0..100 {
            let target = pick_wander_target(fairy.position, None, &mut rng);
            let offset = target - fairy.position;
            assert!(offset.x.abs() <= JITTER_RADIUS && offset.y.abs() <= JITTER_RADIUS);
        }
    }

    #[test]
    fn moves_toward_target_at_speed() {
        let mut fairy = fairy_at(0.0, 0.0);
        fairy.state = FairyState::Seeking;
        fairy.target = Vec2::new(3.0, 0.0);
        let mut rng = GardenRng::seeded(0);

        fairy.tick(0.5, &mut rng);
        assert!((fairy.position.x - 1.0).abs() < 1e-5);
        assert_eq!(fairy.position.y, 0.0);
        assert_eq!(fairy.facing, Facing::Right);
    }

    #[test]
    fn movement_never_overshoots() {
        let mut fairy = fairy_at(0.0, 0.0);
        fairy.state = FairyState::Seeking;
        fairy.target = Vec2::new(-1.0, 0.0);
        let mut rng = GardenRng::seeded(0);

        fairy.tick(10.0, &mut rng);
        assert_eq!(fairy.position, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn faces_left_when_heading_left() {
        let mut fairy = fairy_at(2.0, 0.0);
        fairy.state = FairyState::Seeking;
        fairy.target = Vec2::new(-2.0, 1.0);
        let mut rng = GardenRng::seeded(0);

        fairy.tick(0.1, &mut rng);
        assert_eq!(fairy.facing, Facing::Left);
    }

    #[test]
    fn retargets_without_moving_when_close() {
        let mut fairy = fairy_at(1.0, 1.0);
        fairy.state = FairyState::Seeking;
        fairy.bounds = Some(region());
        fairy.target = Vec2::new(1.2, 1.0);
        let mut rng = ScriptedSource::new(vec![0.5, 0.5]);

        fairy.tick(1.0, &mut rng);
        assert_eq!(fairy.position, Vec2::new(1.0, 1.0));
        assert_eq!(fairy.target, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn stays_inside_bounds_over_long_walks() {
        for seed in 0..8 {
            let mut rng = GardenRng::seeded(seed);
            let bounds = region();
            let start = bounds.sample(&mut rng);
            let mut fairy = fairy_at(start.x, start.y);
            fairy.initialize(None, Some(bounds), &mut rng);

            for step in 0..5_000 {
                let dt = [0.016, 0.033, 0.25, 1.5][step % 4];
                fairy.tick(dt, &mut rng);
                assert!(
                    bounds.contains(fairy.position),
                    "seed {seed} step {step}: {:?}",
                    fairy.position
                );
            }
        }
    }

    #[test]
    fn collect_is_one_shot() {
        let owner = Entity::from_raw(3);
        let mut fairy = fairy_at(0.0, 0.0);
        let mut rng = GardenRng::seeded(5);
        fairy.initialize(Some(owner), Some(region()), &mut rng);

        let transfer = fairy.collect();
        assert_eq!(transfer, Some(EnergyTransfer { owner: Some(owner), amount: 5.0 }));
        assert!(fairy.is_collected());
        assert_eq!(fairy.collect(), None);

        let position = fairy.position;
        fairy.tick(1.0, &mut rng);
        assert_eq!(fairy.position, position);
    }

    #[test]
    fn collect_without_owner_leaves_resolution_to_driver() {
        let mut fairy = fairy_at(0.0, 0.0);
        let mut rng = GardenRng::seeded(5);
        fairy.initialize(None, Some(region()), &mut rng);
        assert_eq!(
            fairy.collect(),
            Some(EnergyTransfer { owner: None, amount: 5.0 })
        );
    }

    #[test]
    fn step_toward_handles_zero_distance() {
        let p = Vec2::new(1.0, 2.0);
        assert_eq!(step_toward(p, p, 1.0), p);
        assert_eq!(step_toward(p, p, 0.0), p);
    }
}
