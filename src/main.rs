use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use fairy_garden::{
    CollectFairy, FairyCollected, GardenConfig, GardenPlugin, GardenRegistry, GardenSet,
    PlantLeveledUp, PlantSnapshot, WaterPlant,
};
use tracing_subscriber::EnvFilter;

/// Shortest wait between simulated taps on the oldest fairy
const COLLECT_EVERY: f32 = 2.0;
/// Extra random wait added to each tap, up to this many seconds
const COLLECT_JITTER: f32 = 2.0;
/// Hydration poured in whenever the plant turns thirsty
const WATERING_AMOUNT: f32 = 40.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = load_config();

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
            Duration::from_secs_f64(1.0 / 60.0),
        )))
        .insert_resource(config)
        .add_plugins(GardenPlugin)
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                demo_gardener.before(GardenSet::Plant),
                log_garden_events.after(GardenSet::Collection),
            ),
        )
        .run();
}

/// Config from the file named by `GARDEN_CONFIG`, or the balanced preset
fn load_config() -> GardenConfig {
    let Ok(path) = std::env::var("GARDEN_CONFIG") else {
        return GardenConfig::balanced();
    };
    match GardenConfig::load(&path) {
        Ok(config) => {
            info!("Loaded garden config from {path}");
            config
        }
        Err(err) => {
            error!("{err}; using the default config");
            GardenConfig::balanced()
        }
    }
}

fn setup() {
    info!("Fairy garden initialized");
}

/// Stands in for the player: taps a fairy at an uneven pace and waters the
/// plant when it gets thirsty.
fn demo_gardener(
    mut next_collect: Local<f32>,
    time: Res<Time>,
    registry: Res<GardenRegistry>,
    snapshot: Option<Res<PlantSnapshot>>,
    mut collect: EventWriter<CollectFairy>,
    mut water: EventWriter<WaterPlant>,
) {
    *next_collect -= time.delta_seconds();
    if *next_collect <= 0.0 {
        if let Some(fairy) = registry.oldest_fairy() {
            collect.send(CollectFairy { fairy });
            *next_collect = COLLECT_EVERY + fastrand::f32() * COLLECT_JITTER;
        }
    }

    if snapshot.is_some_and(|s| s.thirsty) {
        water.send(WaterPlant {
            amount: WATERING_AMOUNT,
        });
    }
}

fn log_garden_events(
    mut collected: EventReader<FairyCollected>,
    mut level_ups: EventReader<PlantLeveledUp>,
) {
    for event in collected.read() {
        info!(
            "Collected fairy {:?} at ({:.1}, {:.1}) worth {:.1} energy",
            event.fairy, event.position.x, event.position.y, event.energy
        );
    }
    for event in level_ups.read() {
        if event.stage_changed {
            info!("Plant reached level {} and is now a {:?}!", event.level, event.stage);
        } else {
            info!("Plant reached level {}", event.level);
        }
    }
}
