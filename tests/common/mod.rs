//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - `salvo::game::configure_headless` installs gameplay plugins.
//! - Time advances a fixed 16 ms per `update()`.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use salvo::plugins::player::Player;
use salvo::plugins::projectiles::{BulletPool, Projectiles};
use salvo::plugins::weapons::{MountedWeapon, WeaponTrigger};

pub const FRAME: Duration = Duration::from_millis(16);

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

    salvo::game::configure_headless(&mut app);
    // `App::run` does this; tests drive `update()` directly, so finish plugin
    // setup here (avian registers its diagnostics resources in `finish`).
    app.finish();
    app.cleanup();
    app
}

/// Headless app that has entered `InGame` and spawned the player.
pub fn app_in_game() -> App {
    let mut app = app_headless();
    app.update();
    app
}

pub fn tick(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

pub fn player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .expect("exactly one player")
}

pub fn hold_trigger(app: &mut App, held: bool) {
    let e = player(app);
    app.world_mut()
        .get_mut::<WeaponTrigger>(e)
        .expect("player has a trigger")
        .held = held;
}

pub fn weapon(app: &mut App) -> &MountedWeapon {
    let e = player(app);
    app.world().get::<MountedWeapon>(e).expect("player is armed")
}

pub fn live_projectiles(app: &App) -> usize {
    app.world().resource::<Projectiles>().active_count()
}

pub fn free_bodies(app: &App) -> usize {
    app.world().resource::<BulletPool>().free.len()
}
