use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::config::Arsenal;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::Projectiles;
use crate::plugins::visuals::SpriteCatalog;
use crate::plugins::weapons::{MountedWeapon, WeaponEvents, WeaponTrigger};

fn spawn_world(tunables: Tunables) -> World {
    let arsenal = Arsenal::builtin();
    let mut world = World::new();
    world.insert_resource(SpriteCatalog::from_arsenal(&arsenal));
    world.insert_resource(arsenal);
    world.insert_resource(tunables);
    world.init_resource::<Projectiles>();
    world.init_resource::<WeaponEvents>();
    world
}

#[test]
fn spawn_creates_an_armed_player() {
    let mut world = spawn_world(Tunables::default());
    run_system_once(&mut world, super::spawn);

    let mut q = world.query_filtered::<(&MountedWeapon, &WeaponTrigger), With<super::Player>>();
    let (weapon, trigger) = q.single(&world).expect("one player");
    assert_eq!(weapon.definition().projectile_key, "bolt");
    assert!(!trigger.held);
    assert!(weapon.overlay_entity().is_some());
}

#[test]
fn unknown_starting_weapon_leaves_the_player_unarmed() {
    let mut world = spawn_world(Tunables { starting_weapon: "nope".into(), ..default() });
    run_system_once(&mut world, super::spawn);

    assert_eq!(world.query::<&super::Player>().iter(&world).count(), 1);
    assert_eq!(world.query::<&MountedWeapon>().iter(&world).count(), 0);
}

#[test]
fn input_reaches_the_trigger() {
    let mut world = World::new();
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::Space);
    keys.press(KeyCode::KeyD);
    keys.press(KeyCode::KeyQ);
    world.insert_resource(keys);
    world.insert_resource(super::PlayerInput::default());
    let player = world.spawn((super::Player, WeaponTrigger::default())).id();

    run_system_once(&mut world, super::gather_input);
    run_system_once(&mut world, super::apply_trigger);

    let input = world.resource::<super::PlayerInput>();
    assert_eq!(input.move_axis, Vec2::X);
    assert_eq!(input.turn, 1.0);
    assert!(world.get::<WeaponTrigger>(player).unwrap().held);
}

#[test]
fn apply_movement_sets_velocities() {
    let mut world = World::new();
    world.insert_resource(Tunables { host_speed: 100.0, host_turn_speed: 2.0, ..default() });
    world.insert_resource(super::PlayerInput { move_axis: Vec2::new(1.0, 0.0), turn: -1.0, fire: false });
    world.spawn((super::Player, LinearVelocity::ZERO, AngularVelocity::ZERO));

    run_system_once(&mut world, super::apply_movement);

    let (v, w) = world
        .query::<(&LinearVelocity, &AngularVelocity)>()
        .single(&world)
        .expect("one player");
    assert_eq!(v.0, Vec2::new(100.0, 0.0));
    assert_eq!(w.0, -2.0);
}
