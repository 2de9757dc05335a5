//! Weapons plugin: mounts controllers on hosts and wires them to the world.
//!
//! # Schedule
//! ```text
//!  Update       ProjectileTimers → Configure (swaps → buffs) → Fire (drive)
//!  PostUpdate   sync_overlays (post-step dispatch) → present_overlays
//!  OnExit(InGame)  shutdown_weapons (shutdown dispatch to live subscriptions)
//! ```
//!
//! Hosts marked `PendingDespawn` still take part in `Update` (their weapon
//! refuses to fire) and are removed at the end of the frame.

pub mod bus;
pub mod components;
pub mod messages;
pub mod mount;
pub mod systems;

use bevy::prelude::*;
use bevy::transform::TransformSystems;

use crate::common::state::GameState;
use crate::plugins::projectiles::ProjectileTimers;

pub use bus::WeaponEvents;
pub use components::{MountedWeapon, PendingDespawn, TriggerEdge, WeaponTrigger};
pub use messages::{EquipWeapon, SetFireRateMultiplier};
pub use mount::{mount_weapon, unmount_weapon};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponSystems {
    /// Weapon swaps, then fire-rate buffs.
    Configure,
    /// Trigger handling and firing.
    Fire,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<WeaponEvents>()
        .add_message::<SetFireRateMultiplier>()
        .add_message::<EquipWeapon>();

    app.configure_sets(
        Update,
        (ProjectileTimers, WeaponSystems::Configure, WeaponSystems::Fire).chain(),
    );

    app.add_systems(
        Update,
        (
            // Swaps first, so a buff written in the same frame lands on the new weapon.
            (systems::equip_weapons, systems::apply_fire_rate_messages)
                .chain()
                .in_set(WeaponSystems::Configure),
            systems::drive_mounted_weapons.in_set(WeaponSystems::Fire),
        )
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        (systems::sync_overlays, systems::present_overlays)
            .chain()
            .before(TransformSystems::Propagate),
    )
    .add_systems(Last, systems::destroy_marked_hosts)
    .add_systems(OnExit(GameState::InGame), systems::shutdown_weapons);
}
