use bevy::prelude::*;

/// Scale a host's fire rate. Values below the floor are clamped by the weapon.
#[derive(Message, Clone, Copy, Debug)]
pub struct SetFireRateMultiplier {
    pub host: Entity,
    pub multiplier: f64,
}

/// Swap a host's weapon for an arsenal archetype.
#[derive(Message, Clone, Debug)]
pub struct EquipWeapon {
    pub host: Entity,
    pub weapon_id: String,
}
