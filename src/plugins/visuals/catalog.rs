//! Sprite catalog: the registry of textures (with frame names) and animations.
//!
//! Asset loading is someone else's job; this only answers "is it registered?"
//! and "what frames does it have?".

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::common::config::Arsenal;
use crate::weapons::ResourceRegistry;

#[derive(Resource, Debug, Default, Clone)]
pub struct SpriteCatalog {
    textures: HashMap<String, Vec<String>>,
    /// Registration order is the search order for substring lookups.
    animations: Vec<String>,
}

impl SpriteCatalog {
    pub fn from_arsenal(arsenal: &Arsenal) -> Self {
        let mut catalog = Self::default();
        for (key, frames) in &arsenal.textures {
            catalog.register_texture(key, frames.iter().cloned());
        }
        for name in &arsenal.animations {
            catalog.register_animation(name);
        }
        catalog
    }

    pub fn register_texture(&mut self, key: &str, frames: impl IntoIterator<Item = String>) {
        self.textures.insert(key.to_owned(), frames.into_iter().collect());
    }

    pub fn register_animation(&mut self, name: &str) {
        if !self.animations.iter().any(|a| a == name) {
            self.animations.push(name.to_owned());
        }
    }
}

impl ResourceRegistry for SpriteCatalog {
    fn exists(&self, name: &str) -> bool {
        self.textures.contains_key(name) || self.animations.iter().any(|a| a == name)
    }

    fn list_frame_names(&self, resource_key: &str) -> Vec<String> {
        self.textures.get(resource_key).cloned().unwrap_or_default()
    }

    fn list_animation_names(&self) -> Vec<String> {
        self.animations.clone()
    }
}
