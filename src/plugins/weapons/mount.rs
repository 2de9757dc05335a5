//! Mounting and unmounting weapons on host entities.

use bevy::prelude::*;

use super::bus::WeaponEvents;
use super::components::MountedWeapon;
use crate::plugins::projectiles::Projectiles;
use crate::plugins::visuals::overlay::OVERLAY_Z;
use crate::plugins::visuals::{OverlaySprite, SpriteCatalog, SpriteVisual, WeaponOverlay};
use crate::weapons::{WeaponController, WeaponDefinition};

const OVERLAY_SIZE: Vec2 = Vec2::new(12.0, 30.0);

/// Build a controller for `definition`, spawning an overlay entity when the
/// weapon has a sprite.
pub fn mount_weapon(
    commands: &mut Commands,
    host: &Transform,
    definition: WeaponDefinition,
    catalog: &SpriteCatalog,
    projectiles: &mut Projectiles,
    events: &mut WeaponEvents,
) -> MountedWeapon {
    let overlay = definition.weapon_sprite_key.as_deref().map(|key| {
        let e = commands
            .spawn((
                Name::new(format!("WeaponOverlay({key})")),
                WeaponOverlay,
                SpriteVisual::new(key),
                Sprite {
                    color: Color::srgb(0.75, 0.78, 0.85),
                    custom_size: Some(OVERLAY_SIZE),
                    ..default()
                },
                Transform {
                    translation: host.translation.truncate().extend(OVERLAY_Z),
                    rotation: host.rotation,
                    ..default()
                },
                Visibility::Visible,
            ))
            .id();
        OverlaySprite::new(e)
    });

    MountedWeapon(WeaponController::mount(
        definition,
        overlay,
        projectiles.frame_cache_mut(),
        catalog,
        events,
    ))
}

/// Destroy the controller and despawn its overlay entity.
///
/// Projectiles it fired stay in flight.
pub fn unmount_weapon(commands: &mut Commands, weapon: &mut MountedWeapon, events: &mut WeaponEvents) {
    weapon.destroy(events);
    if let Some(e) = weapon.overlay_entity() {
        commands.entity(e).try_despawn();
    }
}
