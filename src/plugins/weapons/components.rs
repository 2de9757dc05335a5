use bevy::prelude::*;
use std::ops::{Deref, DerefMut};

use crate::plugins::visuals::OverlaySprite;
use crate::weapons::WeaponController;

/// The weapon mounted on a host entity.
#[derive(Component, Debug)]
pub struct MountedWeapon(pub WeaponController<OverlaySprite>);

impl MountedWeapon {
    /// Overlay entity, if the weapon has one.
    #[inline]
    pub fn overlay_entity(&self) -> Option<Entity> {
        self.0.overlay().map(OverlaySprite::entity)
    }
}

impl Deref for MountedWeapon {
    type Target = WeaponController<OverlaySprite>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MountedWeapon {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEdge {
    Pressed,
    Released,
}

/// Hold-to-fire input for a host. Whoever drives the host writes `held`.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct WeaponTrigger {
    pub held: bool,
    was_held: bool,
}

impl WeaponTrigger {
    /// Edge since the last call, if any.
    pub fn take_edge(&mut self) -> Option<TriggerEdge> {
        let edge = match (self.was_held, self.held) {
            (false, true) => Some(TriggerEdge::Pressed),
            (true, false) => Some(TriggerEdge::Released),
            _ => None,
        };
        self.was_held = self.held;
        edge
    }

    /// Forget the previous state so a held trigger reads as a fresh press.
    #[inline]
    pub fn rearm(&mut self) {
        self.was_held = false;
    }
}

/// Host scheduled for removal. Its weapon is destroyed before the despawn.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PendingDespawn;
