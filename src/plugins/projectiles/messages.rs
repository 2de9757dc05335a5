//! Projectile notifications for other plugins.

use bevy::prelude::*;

use super::components::Projectiles;
use crate::weapons::{ProjectileId, Retirement};

/// A projectile left the live set.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileRetired {
    pub id: ProjectileId,
    pub reason: Retirement,
}

/// A live projectile body struck something it collides with.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileImpact {
    pub projectile: Entity,
    /// Gameplay owner of the struck collider (its body, if it has one).
    pub struck: Entity,
}

pub fn publish_retirements(
    mut projectiles: ResMut<Projectiles>,
    mut writer: MessageWriter<ProjectileRetired>,
) {
    for (id, reason) in projectiles.drain_retired() {
        writer.write(ProjectileRetired { id, reason });
    }
}
