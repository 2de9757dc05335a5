//! Weapon archetypes.

use bevy::prelude::*;
use serde::{Deserialize, Deserializer};

/// Firing point in the weapon's local, unscaled authoring space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct MuzzleOffset {
    pub x: f32,
    pub y: f32,
}

impl MuzzleOffset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

fn single_centre_muzzle() -> Vec<MuzzleOffset> {
    vec![MuzzleOffset::ZERO]
}

/// A weapon fires from at least one muzzle; an explicit empty list is a
/// configuration error, not a silent weapon.
fn at_least_one_muzzle<'de, D>(deserializer: D) -> Result<Vec<MuzzleOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let muzzles = Vec::<MuzzleOffset>::deserialize(deserializer)?;
    if muzzles.is_empty() {
        return Err(serde::de::Error::invalid_length(0, &"at least one muzzle offset"));
    }
    Ok(muzzles)
}

/// Immutable description of a weapon archetype.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponDefinition {
    /// Minimum interval between shots before the fire-rate multiplier applies.
    pub fire_rate_ms: f64,
    #[serde(default = "single_centre_muzzle", deserialize_with = "at_least_one_muzzle")]
    pub muzzle_offsets: Vec<MuzzleOffset>,
    pub projectile_key: String,
    #[serde(default)]
    pub weapon_sprite_key: Option<String>,
    #[serde(default)]
    pub sfx_key: Option<String>,
    pub projectile_speed: f32,
    pub projectile_lifetime_ms: f64,
    #[serde(default)]
    pub projectile_scale: Option<f32>,
    /// sRGB, each channel in `0..=1`.
    #[serde(default)]
    pub projectile_tint: Option<[f32; 3]>,
}

impl WeaponDefinition {
    /// Single centred muzzle, no overlay or sound.
    pub fn new(projectile_key: impl Into<String>, fire_rate_ms: f64) -> Self {
        Self {
            fire_rate_ms,
            muzzle_offsets: single_centre_muzzle(),
            projectile_key: projectile_key.into(),
            weapon_sprite_key: None,
            sfx_key: None,
            projectile_speed: 600.0,
            projectile_lifetime_ms: 1_000.0,
            projectile_scale: None,
            projectile_tint: None,
        }
    }

    /// Replace the muzzles. An empty list keeps the single centred muzzle.
    pub fn with_muzzles(mut self, muzzles: impl IntoIterator<Item = MuzzleOffset>) -> Self {
        let muzzles: Vec<_> = muzzles.into_iter().collect();
        self.muzzle_offsets = if muzzles.is_empty() { single_centre_muzzle() } else { muzzles };
        self
    }

    pub fn with_projectile(mut self, speed: f32, lifetime_ms: f64) -> Self {
        self.projectile_speed = speed;
        self.projectile_lifetime_ms = lifetime_ms;
        self
    }

    pub fn with_weapon_sprite(mut self, key: impl Into<String>) -> Self {
        self.weapon_sprite_key = Some(key.into());
        self
    }

    pub fn with_sfx(mut self, key: impl Into<String>) -> Self {
        self.sfx_key = Some(key.into());
        self
    }

    #[inline]
    pub fn tint_color(&self) -> Option<Color> {
        self.projectile_tint.map(|[r, g, b]| Color::srgb(r, g, b))
    }

    /// Name of the overlay's firing animation, if the weapon has an overlay sprite.
    pub fn firing_animation(&self) -> Option<String> {
        self.weapon_sprite_key.as_ref().map(|key| format!("{key}_fire"))
    }
}
