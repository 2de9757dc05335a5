//! World plugin: arena walls and target dummies.
//!
//! Walls and targets both stop projectiles; dummies also count what hit them.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::plugins::projectiles::collision::mark_projectile_hits;
use crate::plugins::projectiles::ProjectileImpact;

const TILE: i32 = 64;
const HALF_W: i32 = TILE * 10;
const HALF_H: i32 = TILE * 6;

/// Dummies sit in front of the spawn point, along the default firing line.
const DUMMY_ROW_Y: f32 = -220.0;
const DUMMY_SPACING: f32 = 160.0;
const DUMMY_COUNT: i32 = 3;

#[derive(Component, Debug, Default)]
pub struct TargetDummy {
    pub hits: u32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_dummies))
        .add_systems(FixedPostUpdate, count_target_hits.after(mark_projectile_hits));
}

fn spawn_arena(mut commands: Commands) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let thickness = 30.0;

    let wall_layers = CollisionLayers::new(Layer::World, [Layer::Player, Layer::PlayerProjectile]);

    let mut spawn_wall = |name: &'static str, pos: Vec3, size: Vec2| {
        commands.spawn((
            Name::new(name),
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
            DespawnOnExit(GameState::InGame),
        ));
    };

    let (w, h) = (HALF_W as f32, HALF_H as f32);
    spawn_wall(
        "WallTop",
        Vec3::new(0.0, h + thickness * 0.5, 0.0),
        Vec2::new(w * 2.0 + thickness * 2.0, thickness),
    );
    spawn_wall(
        "WallBottom",
        Vec3::new(0.0, -h - thickness * 0.5, 0.0),
        Vec2::new(w * 2.0 + thickness * 2.0, thickness),
    );
    spawn_wall("WallLeft", Vec3::new(-w - thickness * 0.5, 0.0, 0.0), Vec2::new(thickness, h * 2.0));
    spawn_wall("WallRight", Vec3::new(w + thickness * 0.5, 0.0, 0.0), Vec2::new(thickness, h * 2.0));
}

fn spawn_dummies(mut commands: Commands) {
    let layers = CollisionLayers::new(Layer::Target, [Layer::Player, Layer::PlayerProjectile]);

    for i in 0..DUMMY_COUNT {
        let x = (i - DUMMY_COUNT / 2) as f32 * DUMMY_SPACING;
        commands.spawn((
            Name::new("TargetDummy"),
            TargetDummy::default(),
            Sprite {
                color: Color::srgb(0.85, 0.35, 0.3),
                custom_size: Some(Vec2::splat(32.0)),
                ..default()
            },
            Transform::from_xyz(x, DUMMY_ROW_Y, 0.5),
            RigidBody::Static,
            Collider::rectangle(32.0, 32.0),
            layers,
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn count_target_hits(mut impacts: MessageReader<ProjectileImpact>, mut q_dummies: Query<&mut TargetDummy>) {
    for impact in impacts.read() {
        if let Ok(mut dummy) = q_dummies.get_mut(impact.struck) {
            dummy.hits += 1;
        }
    }
}
