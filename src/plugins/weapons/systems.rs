use bevy::prelude::*;

use super::bus::WeaponEvents;
use super::components::{MountedWeapon, PendingDespawn, TriggerEdge, WeaponTrigger};
use super::messages::{EquipWeapon, SetFireRateMultiplier};
use super::mount::{mount_weapon, unmount_weapon};
use crate::common::clock::elapsed_ms;
use crate::common::config::Arsenal;
use crate::plugins::projectiles::{BulletBodies, ExpiryTimers, PooledBullet, Projectiles};
use crate::plugins::visuals::overlay::OVERLAY_Z;
use crate::plugins::visuals::{SoundBank, SpriteCatalog, SpriteVisual, WeaponOverlay};
use crate::weapons::{HostTransform, WeaponPorts};

/// Trigger edges, then hold-to-fire, then the per-tick update.
pub fn drive_mounted_weapons(
    time: Res<Time>,
    catalog: Res<SpriteCatalog>,
    mut projectiles: ResMut<Projectiles>,
    mut timers: ResMut<ExpiryTimers>,
    mut audio: ResMut<SoundBank>,
    mut bodies: BulletBodies,
    mut hosts: Query<
        (&Transform, &mut MountedWeapon, Option<&mut WeaponTrigger>, Has<PendingDespawn>),
        Without<PooledBullet>,
    >,
) {
    let now = elapsed_ms(&time);

    for (tf, mut weapon, trigger, leaving) in &mut hosts {
        let held = match trigger {
            Some(mut trigger) => {
                match trigger.take_edge() {
                    Some(TriggerEdge::Pressed) => weapon.start_firing(&*catalog),
                    Some(TriggerEdge::Released) => weapon.stop_firing(),
                    None => {}
                }
                trigger.held
            }
            None => false,
        };

        if held {
            let host = HostTransform::from(tf).with_active(!leaving);
            let mut ports = WeaponPorts {
                spawner: &mut bodies,
                registry: &*catalog,
                timers: &mut *timers,
                audio: &mut *audio,
            };
            weapon.try_fire(now, &host, &mut projectiles.0, &mut ports);
        }

        weapon.update(now);
    }
}

pub fn apply_fire_rate_messages(
    mut reader: MessageReader<SetFireRateMultiplier>,
    mut hosts: Query<&mut MountedWeapon>,
) {
    for msg in reader.read() {
        let Ok(mut weapon) = hosts.get_mut(msg.host) else {
            debug!("fire-rate change for {:?}, which has no weapon", msg.host);
            continue;
        };
        weapon.set_fire_rate_multiplier(msg.multiplier);
    }
}

pub fn equip_weapons(
    mut commands: Commands,
    mut reader: MessageReader<EquipWeapon>,
    arsenal: Res<Arsenal>,
    catalog: Res<SpriteCatalog>,
    mut projectiles: ResMut<Projectiles>,
    mut events: ResMut<WeaponEvents>,
    mut hosts: Query<(&Transform, &mut MountedWeapon, Option<&mut WeaponTrigger>)>,
) {
    for msg in reader.read() {
        let Some(definition) = arsenal.weapon(&msg.weapon_id) else {
            warn!("cannot equip unknown weapon '{}'", msg.weapon_id);
            continue;
        };
        let Ok((tf, mut weapon, trigger)) = hosts.get_mut(msg.host) else {
            continue;
        };

        unmount_weapon(&mut commands, &mut weapon, &mut events);
        *weapon = mount_weapon(
            &mut commands,
            tf,
            definition.clone(),
            &catalog,
            &mut projectiles,
            &mut events,
        );

        // A still-held trigger counts as a fresh press for the new weapon.
        if let Some(mut trigger) = trigger {
            trigger.rearm();
        }
        debug!("{:?} equipped '{}'", msg.host, msg.weapon_id);
    }
}

/// Post-step dispatch: overlays of live subscriptions follow their host.
pub fn sync_overlays(events: Res<WeaponEvents>, mut hosts: Query<(&Transform, &mut MountedWeapon)>) {
    for (tf, mut weapon) in &mut hosts {
        let Some(id) = weapon.post_step_subscription() else {
            continue;
        };
        if events.is_live(id) {
            weapon.on_post_step(tf);
        }
    }
}

/// Apply what each overlay recorded to its entity.
pub fn present_overlays(
    hosts: Query<&MountedWeapon>,
    mut overlays: Query<(&mut Transform, &mut SpriteVisual, &mut Visibility), With<WeaponOverlay>>,
) {
    for weapon in &hosts {
        let Some(overlay) = weapon.overlay() else {
            continue;
        };
        let Ok((mut tf, mut visual, mut vis)) = overlays.get_mut(overlay.entity()) else {
            continue;
        };

        if overlay.is_released() {
            *vis = Visibility::Hidden;
            continue;
        }

        if let Some((position, rotation)) = overlay.pose() {
            tf.translation = position.extend(OVERLAY_Z);
            tf.rotation = Quat::from_rotation_z(rotation);
        }
        visual.frame = overlay.frame().clone();
        visual.animation = overlay.animation().map(str::to_owned);
    }
}

/// Shutdown dispatch: every mounted weapon is destroyed when play ends.
pub fn shutdown_weapons(
    mut commands: Commands,
    mut events: ResMut<WeaponEvents>,
    mut hosts: Query<&mut MountedWeapon>,
) {
    for mut weapon in &mut hosts {
        let subscribed = weapon.shutdown_subscription().is_some_and(|id| events.is_live(id));
        if subscribed {
            unmount_weapon(&mut commands, &mut weapon, &mut events);
        }
    }
}

pub fn destroy_marked_hosts(
    mut commands: Commands,
    mut events: ResMut<WeaponEvents>,
    mut hosts: Query<(Entity, Option<&mut MountedWeapon>), With<PendingDespawn>>,
) {
    for (e, weapon) in &mut hosts {
        if let Some(mut weapon) = weapon {
            unmount_weapon(&mut commands, &mut weapon, &mut events);
        }
        commands.entity(e).try_despawn();
    }
}
