//! Arsenal configuration: weapon archetypes plus the sprite/sound names they use.
//!
//! The built-in arsenal is embedded from `assets/arsenal.json`. Parsing happens
//! once at startup; nothing here is touched on the fire path.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::Deserialize;

use crate::weapons::WeaponDefinition;

const BUILTIN_ARSENAL: &str = include_str!("../../assets/arsenal.json");

#[derive(Resource, Debug, Clone, Default, Deserialize)]
pub struct Arsenal {
    pub weapons: BTreeMap<String, WeaponDefinition>,
    /// Texture key -> frame names, in atlas order.
    #[serde(default)]
    pub textures: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub animations: Vec<String>,
    #[serde(default)]
    pub sounds: Vec<String>,
}

impl Arsenal {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The embedded arsenal. Falls back to an empty arsenal if it fails to parse.
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_ARSENAL) {
            Ok(arsenal) => arsenal,
            Err(e) => {
                warn!("built-in arsenal failed to parse, starting unarmed: {e}");
                Self::default()
            }
        }
    }

    #[inline]
    pub fn weapon(&self, id: &str) -> Option<&WeaponDefinition> {
        self.weapons.get(id)
    }
}
