//! Player plugin: the host that carries a weapon.
//!
//! Pipeline:
//! - Update: sample input into `PlayerInput`, copy the fire button into the
//!   host's `WeaponTrigger` (before the weapons plugin configures and fires)
//! - FixedUpdate: apply linear and angular velocity to the kinematic body
//!
//! Input systems only run when an input backend is installed, so headless
//! apps can drive `WeaponTrigger` directly.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::config::Arsenal;
use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::projectiles::Projectiles;
use crate::plugins::visuals::SpriteCatalog;
use crate::plugins::weapons::{mount_weapon, systems::shutdown_weapons, WeaponEvents, WeaponSystems, WeaponTrigger};

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: Vec2,
    /// -1 clockwise, +1 counter-clockwise.
    turn: f32,
    fire: bool,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(OnExit(GameState::InGame), despawn.after(shutdown_weapons))
        .add_systems(
            Update,
            (gather_input, apply_trigger)
                .chain()
                .before(WeaponSystems::Configure)
                .run_if(resource_exists::<ButtonInput<KeyCode>>),
        )
        .add_systems(FixedUpdate, apply_movement);
}

fn spawn(
    mut commands: Commands,
    tunables: Res<Tunables>,
    arsenal: Res<Arsenal>,
    catalog: Res<SpriteCatalog>,
    mut projectiles: ResMut<Projectiles>,
    mut events: ResMut<WeaponEvents>,
) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Target]);
    let tf = Transform::from_xyz(0.0, 0.0, 1.0);

    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            Sprite {
                color: Color::srgb(0.2, 0.75, 0.9),
                custom_size: Some(Vec2::splat(26.0)),
                ..default()
            },
            tf,
            RigidBody::Kinematic,
            Collider::circle(13.0),
            layers,
            LinearVelocity::ZERO,
            AngularVelocity::ZERO,
            WeaponTrigger::default(),
        ))
        .id();

    let Some(definition) = arsenal.weapon(&tunables.starting_weapon) else {
        warn!("starting weapon '{}' is not in the arsenal; player is unarmed", tunables.starting_weapon);
        return;
    };
    let weapon = mount_weapon(
        &mut commands,
        &tf,
        definition.clone(),
        &catalog,
        &mut projectiles,
        &mut events,
    );
    commands.entity(player).insert(weapon);
}

/// Runs after weapon shutdown, so the weapon is already released.
fn despawn(mut commands: Commands, q_player: Query<Entity, With<Player>>) {
    for e in &q_player {
        commands.entity(e).despawn();
    }
}

fn gather_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    mut input: ResMut<PlayerInput>,
) {
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();

    input.turn = match (keys.pressed(KeyCode::KeyQ), keys.pressed(KeyCode::KeyE)) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    };

    input.fire = keys.pressed(KeyCode::Space)
        || mouse.is_some_and(|m| m.pressed(MouseButton::Left));
}

fn apply_trigger(input: Res<PlayerInput>, mut q_player: Query<&mut WeaponTrigger, With<Player>>) {
    let Ok(mut trigger) = q_player.single_mut() else {
        return;
    };
    trigger.held = input.fire;
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut LinearVelocity, &mut AngularVelocity), With<Player>>,
) {
    let Ok((mut vel, mut ang)) = q_player.single_mut() else {
        return;
    };
    vel.0 = input.move_axis * tunables.host_speed;
    ang.0 = input.turn * tunables.host_turn_speed;
}

#[cfg(test)]
mod tests;
