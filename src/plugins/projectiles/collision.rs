//! Collision resolve: live projectiles stop at walls and targets.
//!
//! This only marks bodies `PendingReturn`. The commit step does the actual
//! hand-back, through the lifecycle manager.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use super::components::{BulletState, PooledBullet};
use super::messages::ProjectileImpact;
use crate::common::layers::Layer;

#[derive(Clone, Copy, Debug)]
struct CollisionSide {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionSide {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn sides(ev: &CollisionStart) -> (CollisionSide, CollisionSide) {
    (
        CollisionSide { collider: ev.collider1, body: ev.body1 },
        CollisionSide { collider: ev.collider2, body: ev.body2 },
    )
}

#[inline]
fn stops_projectiles(layers: &CollisionLayers) -> bool {
    layers.memberships.has_all(Layer::World) || layers.memberships.has_all(Layer::Target)
}

pub fn mark_projectile_hits(
    mut started: MessageReader<CollisionStart>,
    q_is_bullet: Query<(), With<PooledBullet>>,
    mut q_state: Query<&mut BulletState, With<PooledBullet>>,
    q_layers: Query<&CollisionLayers>,
    mut impacts: MessageWriter<ProjectileImpact>,
    // Per-frame dedupe
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (s1, s2) = sides(ev);

        let b1 = q_is_bullet.contains(s1.collider);
        let b2 = q_is_bullet.contains(s2.collider);
        if !(b1 ^ b2) {
            continue; // exactly one projectile
        }
        let (projectile, other) = if b1 { (s1, s2) } else { (s2, s1) };

        if !seen.insert(projectile.collider) {
            continue;
        }

        let Ok(other_layers) = q_layers.get(other.collider) else {
            continue;
        };
        if !stops_projectiles(other_layers) {
            continue;
        }

        let Ok(mut state) = q_state.get_mut(projectile.collider) else {
            continue;
        };
        if *state != BulletState::Active {
            continue;
        }

        *state = BulletState::PendingReturn;
        impacts.write(ProjectileImpact {
            projectile: projectile.collider,
            struck: other.gameplay_owner(),
        });
    }
}
