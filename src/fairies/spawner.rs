use bevy_ecs::prelude::Resource;
use glam::Vec2;
use tracing::{debug, warn};

use crate::config::SpawnerConfig;
use crate::world::{Bounds, RandomSource};

/// Where a new fairy should appear and the region it should wander in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub position: Vec2,
    pub bounds: Bounds,
}

/// Elapsed-time schedule: first attempt after `initial_delay`, then one
/// every `interval`. Independent of frame rate.
#[derive(Debug, Clone)]
pub struct SpawnCadence {
    interval: f32,
    /// Time left until the next attempt is due
    until_next: f32,
}

impl SpawnCadence {
    pub fn new(initial_delay: f32, interval: f32) -> Self {
        Self {
            interval,
            until_next: initial_delay.max(0.0),
        }
    }

    /// Accumulate `dt` seconds and return how many attempts fell due.
    ///
    /// Computed in closed form, not by stepping through intervals; saturates
    /// at `u32::MAX`.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if dt <= 0.0 || self.interval <= 0.0 {
            return 0;
        }
        if dt < self.until_next {
            self.until_next -= dt;
            return 0;
        }

        let past_first = dt - self.until_next;
        let extra = (past_first / self.interval).floor();
        let leftover = (past_first - extra * self.interval).clamp(0.0, self.interval);
        self.until_next = self.interval - leftover;
        // Float-to-int casts saturate
        1u32.saturating_add(extra as u32)
    }

    pub fn time_until_next(&self) -> f32 {
        self.until_next
    }
}

/// Periodic, capacity-limited source of new fairies.
///
/// Never counts fairies itself: callers pass the live count from their
/// registry on every attempt.
#[derive(Resource, Debug, Clone)]
pub struct FairySpawner {
    spawn_region: Option<Bounds>,
    max_active_fairies: usize,
    cadence: SpawnCadence,
    missing_region_reported: bool,
}

impl FairySpawner {
    pub fn new(config: &SpawnerConfig) -> Self {
        Self {
            spawn_region: config.spawn_region,
            max_active_fairies: config.max_active_fairies,
            cadence: SpawnCadence::new(config.initial_delay, config.spawn_interval),
            missing_region_reported: false,
        }
    }

    pub fn max_active_fairies(&self) -> usize {
        self.max_active_fairies
    }

    pub fn cadence(&self) -> &SpawnCadence {
        &self.cadence
    }

    /// Advance the spawn clock; see [`SpawnCadence::advance`].
    ///
    /// Capped at `max_active_fairies`: more attempts than that in one step
    /// could never all succeed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let cap = u32::try_from(self.max_active_fairies).unwrap_or(u32::MAX);
        self.cadence.advance(dt).min(cap)
    }

    /// Decide whether one more fairy may appear.
    ///
    /// At capacity this is an ordinary `None`. Without a spawn region it is
    /// also `None`, with a warning logged the first time only.
    pub fn maybe_spawn(
        &mut self,
        live_fairies: usize,
        rng: &mut impl RandomSource,
    ) -> Option<SpawnRequest> {
        if live_fairies >= self.max_active_fairies {
            debug!(
                "[SPAWNER] At capacity ({}/{}), skipping",
                live_fairies, self.max_active_fairies
            );
            return None;
        }

        let Some(region) = self.spawn_region else {
            if !self.missing_region_reported {
                warn!("[SPAWNER] No spawn region configured, fairies will not spawn");
                self.missing_region_reported = true;
            }
            return None;
        };

        Some(SpawnRequest {
            position: region.sample(rng),
            bounds: region,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GardenConfig;
    use crate::world::GardenRng;

    fn spawner(max: usize) -> FairySpawner {
        FairySpawner::new(&SpawnerConfig {
            max_active_fairies: max,
            ..SpawnerConfig::default()
        })
    }

    #[test]
    fn three_fairy_cap() {
        let mut spawner = spawner(3);
        let mut rng = GardenRng::seeded(1);
        assert!(spawner.maybe_spawn(3, &mut rng).is_none());

        let request = spawner.maybe_spawn(2, &mut rng).expect("room for one more");
        let region = SpawnerConfig::default().spawn_region.unwrap();
        assert!(region.contains(request.position));
        assert_eq!(request.bounds, region);
    }

    #[test]
    fn never_spawns_at_or_over_capacity() {
        for max in 1..=6 {
            let mut spawner = spawner(max);
            let mut rng = GardenRng::seeded(max as u64);
            for live in 0..=2 * max {
                let request = spawner.maybe_spawn(live, &mut rng);
                assert_eq!(request.is_some(), live < max, "max {max} live {live}");
            }
        }
    }

    #[test]
    fn missing_region_keeps_returning_nothing() {
        let mut spawner = FairySpawner::new(&SpawnerConfig {
            spawn_region: None,
            ..SpawnerConfig::default()
        });
        let mut rng = GardenRng::seeded(2);
        for _ in 0..5 {
            assert!(spawner.maybe_spawn(0, &mut rng).is_none());
        }
        assert!(spawner.missing_region_reported);
    }

    #[test]
    fn cadence_waits_for_initial_delay() {
        let mut cadence = SpawnCadence::new(2.0, 5.0);
        assert_eq!(cadence.advance(1.0), 0);
        assert_eq!(cadence.advance(0.5), 0);
        assert_eq!(cadence.advance(0.5), 1);
        assert!((cadence.time_until_next() - 5.0).abs() < 1e-5);
        assert_eq!(cadence.advance(4.0), 0);
        assert_eq!(cadence.advance(1.0), 1);
    }

    #[test]
    fn cadence_is_frame_rate_independent() {
        let mut coarse = SpawnCadence::new(2.0, 5.0);
        let mut fine = SpawnCadence::new(2.0, 5.0);

        let coarse_total: u32 = (0..24).map(|_| coarse.advance(1.0)).sum();
        let fine_total: u32 = (0..24 * 64).map(|_| fine.advance(1.0 / 64.0)).sum();
        // Due at 2, 7, 12, 17, 22
        assert_eq!(coarse_total, 5);
        assert_eq!(fine_total, 5);
    }

    #[test]
    fn large_step_catches_up() {
        let mut cadence = SpawnCadence::new(2.0, 5.0);
        assert_eq!(cadence.advance(12.5), 3);
        assert!((cadence.time_until_next() - 4.5).abs() < 1e-5);
    }

    #[test]
    fn zero_delay_fires_on_first_positive_step() {
        let mut cadence = SpawnCadence::new(0.0, 1.0);
        assert_eq!(cadence.advance(0.0), 0);
        assert_eq!(cadence.advance(0.1), 1);
        assert!((cadence.time_until_next() - 0.9).abs() < 1e-5);
    }

    #[test]
    fn tiny_interval_counts_without_looping() {
        let mut cadence = SpawnCadence::new(0.0, 1e-8);
        let due = cadence.advance(1.0);
        assert!(due > 1_000_000, "{due}");
        assert!(cadence.time_until_next() >= 0.0);
        assert!(cadence.time_until_next() <= 1e-8);

        let mut cadence = SpawnCadence::new(0.0, f32::MIN_POSITIVE);
        assert_eq!(cadence.advance(1.0e30), u32::MAX);
    }

    #[test]
    fn spawner_caps_attempts_per_step() {
        let config = GardenConfig::from_json_str(
            r#"{ "spawner": { "spawn_interval": 1e-8, "initial_delay": 0.0 } }"#,
        )
        .unwrap();
        let mut spawner = FairySpawner::new(&config.spawner);
        assert_eq!(spawner.advance(1.0), 3);
        assert_eq!(spawner.advance(1.0 / 60.0), 3);
        assert_eq!(spawner.advance(0.0), 0);
    }
}
