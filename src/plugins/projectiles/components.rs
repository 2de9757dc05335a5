use bevy::prelude::*;
use std::ops::{Deref, DerefMut};

use crate::weapons::ProjectileLifecycleManager;

#[derive(Component)]
pub struct PooledBullet;

/// Pool-side state of a body.
///
/// `PendingReturn` is set by collision resolution and consumed by the commit
/// step, which hands the body back through the lifecycle manager.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

/// The one projectile lifecycle manager of the world.
#[derive(Resource, Debug, Default)]
pub struct Projectiles(pub ProjectileLifecycleManager);

impl Deref for Projectiles {
    type Target = ProjectileLifecycleManager;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Projectiles {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
