//! Projectile body pool.
//!
//! # Inactive invariant
//! An inactive body is hidden, motionless, and collides with nothing (empty
//! filters). Only [`BulletBodies`] writes these components, so the invariant
//! has one owner.
//!
//! Bodies are never despawned; "destroy" returns them to the free list.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::{BulletState, PooledBullet};
use crate::common::layers::Layer;
use crate::plugins::visuals::SpriteVisual;
use crate::weapons::{BodyHandle, FrameId, Spawner};

pub const PROJECTILE_Z: f32 = 2.0;
pub const PROJECTILE_RADIUS: f32 = 4.0;
const DEFAULT_TINT: Color = Color::WHITE;

#[derive(Resource, Debug)]
pub struct BulletPool {
    pub free: Vec<Entity>,
    pub capacity: usize,
}

impl BulletPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<Entity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, e: Entity) {
        self.free.push(e);
    }
}

#[inline]
pub fn active_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerProjectile, [Layer::World, Layer::Target])
}

#[inline]
pub fn inactive_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerProjectile, [] as [Layer; 0])
}

#[inline]
pub fn handle_of(e: Entity) -> BodyHandle {
    BodyHandle(e.to_bits())
}

#[inline]
pub fn entity_of(body: BodyHandle) -> Entity {
    Entity::from_bits(body.0)
}

/// Pre-spawn pooled bodies (inactive).
pub fn init_bullet_pool(mut commands: Commands, mut pool: ResMut<BulletPool>) {
    pool.free.clear();
    let cap = pool.capacity;
    pool.free.reserve(cap);

    for _ in 0..cap {
        let e = commands
            .spawn((
                Name::new("Projectile(Pooled)"),
                PooledBullet,
                BulletState::Inactive,
                Sprite {
                    color: DEFAULT_TINT,
                    custom_size: Some(Vec2::splat(PROJECTILE_RADIUS * 2.0)),
                    ..default()
                },
                SpriteVisual::default(),
                Transform::from_xyz(0.0, 0.0, PROJECTILE_Z),
                Visibility::Hidden,
                RigidBody::Dynamic,
                Collider::circle(PROJECTILE_RADIUS),
                inactive_projectile_layers(),
                LinearVelocity(Vec2::ZERO),
                CollisionEventsEnabled,
            ))
            .id();

        pool.free.push(e);
    }
}

type BodyComponents = (
    Entity,
    &'static mut BulletState,
    &'static mut Transform,
    &'static mut LinearVelocity,
    &'static mut Visibility,
    &'static mut CollisionLayers,
    &'static mut Sprite,
    &'static mut SpriteVisual,
);

/// The pool seen through the `Spawner` port.
///
/// Handles are entity bits. Setters on a handle that is no longer a pooled
/// body are ignored.
#[derive(SystemParam)]
pub struct BulletBodies<'w, 's> {
    pool: ResMut<'w, BulletPool>,
    bodies: Query<'w, 's, BodyComponents, With<PooledBullet>>,
}

impl BulletBodies<'_, '_> {
    /// Bodies marked by collision resolution and not yet committed.
    pub fn pending_returns(&self) -> Vec<Entity> {
        self.bodies
            .iter()
            .filter(|(_, state, ..)| **state == BulletState::PendingReturn)
            .map(|(e, ..)| e)
            .collect()
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.pool.free.len()
    }

    fn with_transform(&mut self, body: BodyHandle, f: impl FnOnce(&mut Transform)) {
        if let Ok((_, _, mut tf, ..)) = self.bodies.get_mut(entity_of(body)) {
            f(&mut tf);
        }
    }

    fn with_visual(&mut self, body: BodyHandle, f: impl FnOnce(&mut SpriteVisual)) {
        if let Ok((.., mut visual)) = self.bodies.get_mut(entity_of(body)) {
            f(&mut visual);
        }
    }
}

impl Spawner for BulletBodies<'_, '_> {
    fn create_physics_object(&mut self, position: Vec2, resource_key: &str) -> Option<BodyHandle> {
        // Capacity decision, not a correctness failure.
        let e = self.pool.pop_free()?;

        let Ok((_, mut state, mut tf, mut vel, mut vis, mut layers, mut sprite, mut visual)) =
            self.bodies.get_mut(e)
        else {
            warn!("pool held {e:?}, which is not a pooled body; dropping it");
            return None;
        };

        *state = BulletState::Active;
        *tf = Transform::from_translation(position.extend(PROJECTILE_Z));
        vel.0 = Vec2::ZERO;
        *vis = Visibility::Visible;
        *layers = active_projectile_layers();
        sprite.color = DEFAULT_TINT;
        *visual = SpriteVisual::new(resource_key);

        Some(handle_of(e))
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec2) {
        self.with_transform(body, |tf| tf.translation = position.extend(PROJECTILE_Z));
    }

    fn set_rotation(&mut self, body: BodyHandle, rotation: f32) {
        self.with_transform(body, |tf| tf.rotation = Quat::from_rotation_z(rotation));
    }

    fn set_scale(&mut self, body: BodyHandle, scale: f32) {
        self.with_transform(body, |tf| tf.scale = Vec2::splat(scale).extend(1.0));
    }

    fn set_tint(&mut self, body: BodyHandle, tint: Color) {
        if let Ok((.., mut sprite, _)) = self.bodies.get_mut(entity_of(body)) {
            sprite.color = tint;
        }
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        if let Ok((_, _, _, mut vel, ..)) = self.bodies.get_mut(entity_of(body)) {
            vel.0 = velocity;
        }
    }

    fn set_frame(&mut self, body: BodyHandle, frame: &FrameId) {
        self.with_visual(body, |visual| visual.frame = frame.clone());
    }

    fn play_animation(&mut self, body: BodyHandle, animation: &str) {
        self.with_visual(body, |visual| visual.animation = Some(animation.to_owned()));
    }

    /// Return the body to the pool. Already-inactive bodies are left alone.
    fn destroy(&mut self, body: BodyHandle) {
        let e = entity_of(body);
        let Ok((_, mut state, _, mut vel, mut vis, mut layers, ..)) = self.bodies.get_mut(e) else {
            return;
        };
        if *state == BulletState::Inactive {
            return;
        }

        *state = BulletState::Inactive;
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        *layers = inactive_projectile_layers();

        self.pool.push_free(e);
    }
}
